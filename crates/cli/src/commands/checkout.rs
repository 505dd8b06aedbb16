//! Offline checkout dry run.
//!
//! Drives the same state machine the storefront uses: one `AddToCart` per
//! id, then `ProceedToCheckout`.

use chrono::Utc;
use fabu_core::{Action, Catalog, CheckoutSnapshot, ProductId, UiState};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("none of the given product ids are in the catalog")]
    EmptyCart,
}

/// Place an order for `product_ids` and print the receipt.
///
/// Unknown ids are skipped with a warning.
///
/// # Errors
///
/// Returns an error if no id matched a product or JSON serialization fails.
#[allow(clippy::print_stdout)]
pub fn dry_run(product_ids: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::fabu()?;
    let order = place_order(&catalog, product_ids)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    info!("Order {}", order.order_number);
    info!("Placed {}", order.placed_at_display());
    for item in order.items() {
        info!(
            "  {} x{}  {}",
            item.product.name,
            item.quantity,
            item.line_total().display()
        );
    }
    let totals = order.totals();
    info!("Subtotal  {}", totals.subtotal.display());
    info!("Shipping  {}", totals.shipping.display());
    info!("Tax       {}", totals.tax.display());
    info!("Total     {}", totals.grand_total.display());
    Ok(())
}

fn place_order(
    catalog: &Catalog,
    product_ids: &[String],
) -> Result<CheckoutSnapshot, CheckoutError> {
    let mut state = UiState::new();

    for id in product_ids {
        let id = ProductId::new(id.as_str());
        if catalog.get(&id).is_none() {
            warn!(product_id = %id, "skipping unknown product");
            continue;
        }
        state.apply(catalog, Action::AddToCart(id), Utc::now());
    }

    state.apply(catalog, Action::ProceedToCheckout, Utc::now());
    state
        .checkout()
        .payload()
        .cloned()
        .ok_or(CheckoutError::EmptyCart)
}
