//! The static FABU product catalog.
//!
//! The catalog is built once at startup, validated, and never mutated. Every
//! other part of the system refers to products by [`ProductId`] and looks
//! them up here.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Brand name shown in the header, receipts and footer.
pub const APP_NAME: &str = "FABU";

/// Number of products shown in the "Curated Selection" section.
pub const FEATURED_COUNT: usize = 3;

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub image_url: String,
    pub description: String,
    /// Available sizes, in display order.
    pub sizes: Vec<String>,
    /// Available colors, in display order.
    pub colors: Vec<String>,
}

/// Catalog validation errors. These can only happen at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id must not be empty (product '{name}')")]
    EmptyId { name: String },
    #[error("duplicate product id '{0}'")]
    DuplicateId(ProductId),
    #[error("product '{id}' has a negative price ({price})")]
    NegativePrice { id: ProductId, price: Price },
}

/// An ordered, read-only list of products.
///
/// Cheap to clone: the product list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and non-empty and that
    /// no price is negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] encountered, in catalog order.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId {
                    name: product.name.clone(),
                });
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// The FABU collection.
    ///
    /// # Errors
    ///
    /// Only if the built-in product list is edited into an invalid state.
    pub fn fabu() -> Result<Self, CatalogError> {
        Self::new(fabu_products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The first few products, shown in the "Curated Selection" grid.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        let end = FEATURED_COUNT.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    cents: i64,
    image_url: &str,
    description: &str,
    sizes: &[&str],
    colors: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        price: Price::from_cents(cents),
        image_url: image_url.to_owned(),
        description: description.to_owned(),
        sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
        colors: colors.iter().map(|c| (*c).to_owned()).collect(),
    }
}

#[allow(clippy::too_many_lines)]
fn fabu_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Ethereal White Blouse",
            "Tops",
            7999,
            "https://res.cloudinary.com/ddfa67uba/image/upload/v1749713557/ac359f6b-3248-4431-aaa1-c3d745064312_zzi2i6.jpg",
            "A light and airy blouse, perfect for any occasion. Crafted from sustainable organic cotton.",
            &["XS", "S", "M", "L", "XL"],
            &["White", "Ivory"],
        ),
        product(
            "2",
            "Urban Flow Trousers",
            "Bottoms",
            11999,
            "https://res.cloudinary.com/ddfa67uba/image/upload/v1749713852/9bee35a0-64d1-4785-8c3c-74920310539a_vtffg0.jpg",
            "Comfortable and stylish wide-leg trousers for the modern urbanite. Made with a blend of linen and tencel.",
            &["S", "M", "L"],
            &["Charcoal", "Beige"],
        ),
        product(
            "3",
            "Celestial Silk Scarf",
            "Accessories",
            4999,
            "https://res.cloudinary.com/ddfa67uba/image/upload/v1749714024/bb5e139a-60bc-4a32-a3f3-fb30b7406088_glgcxg.jpg",
            "A luxurious 100% silk scarf with an abstract celestial print. Adds a touch of elegance to any outfit.",
            &["One Size"],
            &["Midnight Blue", "Gold Accent"],
        ),
        product(
            "4",
            "Geometric Knit Sweater",
            "Knitwear",
            14999,
            "https://res.cloudinary.com/ddfa67uba/image/upload/v1749714348/3a393c2e-2097-4271-af6c-f356dad9a30e_mcbzgj.jpg",
            "A cozy and chic knit sweater featuring a subtle geometric pattern. Perfect for cooler days.",
            &["S", "M", "L", "XL"],
            &["Forest Green", "Cream"],
        ),
        product(
            "5",
            "Avant-Garde Midi Dress",
            "Dresses",
            18999,
            "https://res.cloudinary.com/ddfa67uba/image/upload/v1749714601/Texturelabs_Fabric_161M_p2qo6g.png",
            "Make a statement with this uniquely structured midi dress, blending art and fashion.",
            &["XS", "S", "M", "L"],
            &["Black", "Deep Teal"],
        ),
        product(
            "6",
            "Minimalist Leather Tote",
            "Accessories",
            22000,
            "https://picsum.photos/seed/p6/600/800",
            "A timeless and spacious leather tote bag, designed for everyday elegance and functionality.",
            &["One Size"],
            &["Tan", "Black"],
        ),
    ]
}
