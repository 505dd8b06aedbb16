//! FABU Core - storefront state without I/O.
//!
//! This crate holds everything the FABU storefront knows about products,
//! carts and what the visitor currently sees:
//! - `fabu-storefront` - the public site, which renders this state
//! - `fabu-cli` - operator tooling for the catalog and scripted checkouts
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and a reducer - no
//! HTTP, no timers, no clocks. Time enters as a `DateTime<Utc>` argument and
//! deferred work leaves as [`store::Effect`] values the caller executes.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices and contact-form input
//! - [`catalog`] - the static product list
//! - [`cart`] - cart items, quantities and totals
//! - [`modal`] - modal lifecycle with a deferred payload clear
//! - [`checkout`] - order numbers and checkout snapshots
//! - [`route`] - fragment identifiers and the views they select
//! - [`store`] - the application state and its reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod modal;
pub mod route;
pub mod store;
pub mod types;

pub use cart::{Cart, CartItem, Totals, compute_totals};
pub use catalog::{APP_NAME, Catalog, CatalogError, Product};
pub use checkout::{CheckoutSnapshot, OrderNumber};
pub use modal::{GraceTicket, Modal, ModalPhase};
pub use route::{Fragment, NAVIGATION_LINKS, NavItem, ScrollEffect, View, resolve_view};
pub use store::{
    Action, DismissInput, Effect, ModalKind, ModalSnapshot, UiSnapshot, UiState, UnknownModal,
};
pub use types::*;
