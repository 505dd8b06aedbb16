//! Modal route handlers.
//!
//! Opening, closing and dismissing the receipt, cart and checkout modals.
//! Also home to the modal layer response shared by the cart handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use fabu_core::{Action, DismissInput, ModalKind, ProductId, UiSnapshot};
use tracing::instrument;

use super::HX_TRIGGER_AFTER_SWAP;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;
use crate::store::Outcome;
use crate::views::{ModalLayerView, client_events};

/// Modal layer fragment template (for HTMX).
///
/// `oob` adds the cart badge as an out-of-band swap.
#[derive(Template, WebTemplate)]
#[template(path = "partials/modal_layer.html")]
pub struct ModalLayerTemplate {
    pub layer: ModalLayerView,
    pub count: u64,
    pub oob: bool,
}

impl ModalLayerTemplate {
    #[must_use]
    pub fn new(state: &AppState, snapshot: &UiSnapshot, oob: bool) -> Self {
        Self {
            layer: ModalLayerView::new(snapshot, grace_ms(state)),
            count: snapshot.item_count,
            oob,
        }
    }
}

/// Grace period in whole milliseconds, for the client refresh delay.
#[must_use]
pub fn grace_ms(state: &AppState) -> u64 {
    u64::try_from(state.config().store.modal_grace.as_millis()).unwrap_or(u64::MAX)
}

/// Render the modal layer and badge after an action, with its client events.
pub fn layer_response(state: &AppState, outcome: &Outcome) -> Response {
    let events = client_events(&outcome.effects).map(|events| (HX_TRIGGER_AFTER_SWAP, events));
    (
        AppendHeaders(events),
        ModalLayerTemplate::new(state, &outcome.snapshot, true),
    )
        .into_response()
}

fn parse_kind(kind: &str) -> Result<ModalKind> {
    kind.parse::<ModalKind>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Current modal layer (HTMX).
///
/// Polled once after a grace period so the cleared modal drops out.
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn show(State(state): State<AppState>, visitor: Visitor) -> Result<ModalLayerTemplate> {
    let snapshot = visitor.store.snapshot().await?;
    Ok(ModalLayerTemplate::new(&state, &snapshot, true))
}

/// Open the receipt for a product (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn receipt(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<String>,
) -> Result<Response> {
    add_breadcrumb("modal", "Viewed product", Some(&[("product_id", id.as_str())]));
    let outcome = visitor
        .store
        .dispatch(Action::ViewReceipt(ProductId::new(id)))
        .await?;
    Ok(layer_response(&state, &outcome))
}

/// Close a modal from its close button (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn close(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(kind): Path<String>,
) -> Result<Response> {
    let kind = parse_kind(&kind)?;
    let outcome = visitor.store.dispatch(Action::CloseModal(kind)).await?;
    Ok(layer_response(&state, &outcome))
}

/// Close a modal from a backdrop click (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn dismiss(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(kind): Path<String>,
) -> Result<Response> {
    let kind = parse_kind(&kind)?;
    let outcome = visitor
        .store
        .dispatch(Action::Dismiss(kind, DismissInput::Backdrop))
        .await?;
    Ok(layer_response(&state, &outcome))
}

/// Escape key: close whatever is open (HTMX).
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn escape(State(state): State<AppState>, visitor: Visitor) -> Result<Response> {
    let outcome = visitor.store.dispatch(Action::EscapePressed).await?;
    Ok(layer_response(&state, &outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("receipt").ok(), Some(ModalKind::Receipt));
        assert_eq!(parse_kind("cart").ok(), Some(ModalKind::Cart));
        assert!(matches!(parse_kind("drawer"), Err(AppError::BadRequest(_))));
    }
}
