//! Home page route handler.
//!
//! Serves the full document. Which view the main region shows is decided
//! by the visitor's store; the browser reports its fragment separately
//! through `POST /view` once the page has loaded.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use fabu_core::{APP_NAME, NAVIGATION_LINKS, NavItem, UiSnapshot, route};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{CspNonce, Visitor};
use crate::state::AppState;
use crate::views::{MainView, ModalLayerView};

use super::modals::grace_ms;

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub app_name: &'static str,
    pub nav: &'static [NavItem],
    pub main: MainView,
    pub layer: ModalLayerView,
    pub count: u64,
    pub oob: bool,
    pub nonce: String,
}

impl HomeTemplate {
    #[must_use]
    pub fn new(state: &AppState, snapshot: &UiSnapshot, nonce: String) -> Self {
        Self {
            app_name: APP_NAME,
            nav: NAVIGATION_LINKS,
            main: main_view(state, snapshot),
            layer: ModalLayerView::new(snapshot, grace_ms(state)),
            count: snapshot.item_count,
            oob: false,
            nonce,
        }
    }
}

/// Main region for the snapshot's current view.
#[must_use]
pub fn main_view(state: &AppState, snapshot: &UiSnapshot) -> MainView {
    MainView::new(
        snapshot.view,
        state.catalog(),
        state.content().get_page(route::OUR_STORY),
    )
}

/// Display the home page.
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn home(
    State(state): State<AppState>,
    visitor: Visitor,
    CspNonce(nonce): CspNonce,
) -> Result<HomeTemplate> {
    let snapshot = visitor.store.snapshot().await?;
    Ok(HomeTemplate::new(&state, &snapshot, nonce))
}
