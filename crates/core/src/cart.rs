//! Cart contents and totals.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, one per product, kept in
//! first-add order. Operations on ids that are not in the cart are no-ops:
//! the presentation layer only ever sends catalog ids, and there is nothing
//! to corrupt if it doesn't.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Order totals derived from a list of cart items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub grand_total: Price,
}

/// Compute subtotal, shipping, tax and grand total for `items`.
///
/// Shipping and tax are fixed at zero. The function is pure; callers
/// recompute it from the current items instead of caching it.
///
/// ```
/// use fabu_core::{Catalog, Cart, ProductId, compute_totals};
///
/// let catalog = Catalog::fabu().unwrap();
/// let mut cart = Cart::new();
/// let blouse = catalog.get(&ProductId::new("1")).unwrap();
/// cart.add(blouse);
/// cart.add(blouse);
/// cart.add(catalog.get(&ProductId::new("3")).unwrap());
///
/// let totals = compute_totals(cart.items());
/// assert_eq!(totals.subtotal.to_string(), "$209.97");
/// assert_eq!(totals.grand_total, totals.subtotal);
/// ```
#[must_use]
pub fn compute_totals(items: &[CartItem]) -> Totals {
    let subtotal = items
        .iter()
        .map(CartItem::line_total)
        .fold(Price::zero(), |sum, line| sum + line);
    let shipping = Price::zero();
    let tax = Price::zero();

    Totals {
        subtotal,
        shipping,
        tax,
        grand_total: subtotal + shipping + tax,
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in first-add order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Quantity of `id` in the cart, or 0.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.position(id)
            .and_then(|idx| self.items.get(idx))
            .map_or(0, |item| item.quantity)
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items)
    }

    /// Add one of `product`: bump the quantity if it is already in the cart,
    /// otherwise append it with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.item_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Set the quantity of `id` in place.
    ///
    /// Any non-positive quantity removes the item. Values above `u32::MAX`
    /// saturate. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove(id);
            return;
        }

        if let Some(item) = self.item_mut(id) {
            item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove `id` from the cart. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != id);
        self.items.len() != before
    }

    /// Move every item out, leaving the cart empty.
    pub fn take(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.product.id == id)
    }

    fn item_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.product.id == id)
    }
}
