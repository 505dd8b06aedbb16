//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's store; every mutation answers with
//! the re-rendered modal layer (which holds the cart drawer) and the badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Response};
use fabu_core::{Action, ProductId};
use serde::Deserialize;
use tracing::instrument;

use super::modals::layer_response;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Form data naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

/// Update cart form data.
///
/// `quantity` is signed: the drawer's "-" button can submit 0, which
/// removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
    pub oob: bool,
}

/// Add one of a product to the cart (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn add(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", form.product_id.as_str())]),
    );
    let outcome = visitor
        .store
        .dispatch(Action::AddToCart(ProductId::new(form.product_id)))
        .await?;
    Ok(layer_response(&state, &outcome))
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn update(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let outcome = visitor
        .store
        .dispatch(Action::UpdateQuantity {
            product_id: ProductId::new(form.product_id),
            quantity: form.quantity,
        })
        .await?;
    Ok(layer_response(&state, &outcome))
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, visitor), fields(visitor = %visitor.id))]
pub async fn remove(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let outcome = visitor
        .store
        .dispatch(Action::RemoveItem(ProductId::new(form.product_id)))
        .await?;
    Ok(layer_response(&state, &outcome))
}

/// Open the cart drawer (HTMX).
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn open(State(state): State<AppState>, visitor: Visitor) -> Result<Response> {
    let outcome = visitor.store.dispatch(Action::OpenCart).await?;
    Ok(layer_response(&state, &outcome))
}

/// Place the order: snapshot the cart, empty it, show the receipt (HTMX).
///
/// An empty cart changes nothing; the unchanged layer is returned.
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn checkout(State(state): State<AppState>, visitor: Visitor) -> Result<Response> {
    add_breadcrumb("cart", "Proceeded to checkout", None);
    let outcome = visitor.store.dispatch(Action::ProceedToCheckout).await?;
    Ok(layer_response(&state, &outcome))
}

/// Get cart count badge (HTMX).
#[instrument(skip_all, fields(visitor = %visitor.id))]
pub async fn count(visitor: Visitor) -> Result<CartCountTemplate> {
    let snapshot = visitor.store.snapshot().await?;
    Ok(CartCountTemplate {
        count: snapshot.item_count,
        oob: false,
    })
}
