//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page (full document)
//! GET  /health                    - Health check
//! POST /view                      - Main content for a fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart/count                - Cart count badge (fragment)
//! POST /cart/add                  - Add one of a product
//! POST /cart/update               - Set a line quantity (<= 0 removes)
//! POST /cart/remove               - Remove a line
//! POST /cart/open                 - Open the cart drawer
//! POST /cart/checkout             - Place the order
//!
//! # Modals (HTMX fragments)
//! POST /products/{id}/receipt     - Open the product receipt
//! POST /modals/{kind}/close       - Close button
//! POST /modals/{kind}/dismiss     - Backdrop click
//! POST /modals/escape             - Escape key
//! GET  /modals                    - Current modal layer
//!
//! POST /contact                   - Contact form
//! ```
//!
//! Every state-changing cart or modal endpoint answers with the modal layer
//! and an out-of-band cart badge, plus an `HX-Trigger-After-Swap` header
//! carrying scroll events for the page script.

pub mod cart;
pub mod contact;
pub mod home;
pub mod modals;
pub mod view;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Response header htmx reads for events fired after the swap.
pub const HX_TRIGGER_AFTER_SWAP: &str = "HX-Trigger-After-Swap";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/checkout", post(cart::checkout))
}

/// Create the modal routes router.
pub fn modal_routes() -> Router<AppState> {
    Router::new()
        .route("/modals", get(modals::show))
        .route("/modals/escape", post(modals::escape))
        .route("/modals/{kind}/close", post(modals::close))
        .route("/modals/{kind}/dismiss", post(modals::dismiss))
        .route("/products/{id}/receipt", post(modals::receipt))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/view", post(view::change))
        .nest("/cart", cart_routes())
        .merge(modal_routes())
        .route("/contact", post(contact::submit))
}
