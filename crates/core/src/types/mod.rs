//! Core value types for the FABU storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod price;

pub use contact::{ContactError, ContactMessage};
pub use id::*;
pub use price::{CurrencyCode, Price};
