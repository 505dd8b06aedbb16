//! Fragment route handler.
//!
//! The page script posts `location.hash` here on load and on every
//! `hashchange`. The answer is the main region for the resolved view; the
//! scroll movement travels in the `HX-Trigger-After-Swap` header.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use fabu_core::{Action, Fragment};
use serde::Deserialize;
use tracing::instrument;

use super::HX_TRIGGER_AFTER_SWAP;
use super::home::main_view;
use crate::error::Result;
use crate::middleware::Visitor;
use crate::state::AppState;
use crate::views::{MainView, client_events};

/// Fragment form data. A missing field means "no fragment".
#[derive(Debug, Deserialize)]
pub struct FragmentForm {
    #[serde(default)]
    pub fragment: Option<String>,
}

/// Main content fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/main_content.html")]
pub struct MainContentTemplate {
    pub main: MainView,
}

/// Report a fragment change and get the matching main content.
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn change(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<FragmentForm>,
) -> Result<Response> {
    let fragment = Fragment::parse(form.fragment.as_deref());
    let outcome = visitor
        .store
        .dispatch(Action::FragmentChanged(fragment))
        .await?;

    let events = client_events(&outcome.effects).map(|events| (HX_TRIGGER_AFTER_SWAP, events));
    let main = main_view(&state, &outcome.snapshot);
    Ok((AppendHeaders(events), MainContentTemplate { main }).into_response())
}
