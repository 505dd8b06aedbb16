//! Application state and its reducer.
//!
//! Everything the visitor sees is one [`UiState`]. Input events arrive as
//! [`Action`]s and are applied in delivery order by [`UiState::apply`],
//! which mutates the state and returns the [`Effect`]s the caller must carry
//! out (timers, scroll changes). No clock is read here: the caller passes
//! `now`.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::cart::{Cart, CartItem, Totals};
use crate::catalog::{Catalog, Product};
use crate::checkout::CheckoutSnapshot;
use crate::modal::{GraceTicket, Modal, ModalPhase};
use crate::route::{Fragment, ScrollEffect, View};
use crate::types::ProductId;

/// The three modals on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalKind {
    /// Single-product receipt opened by "View Product".
    Receipt,
    /// The cart drawer.
    Cart,
    /// Post-checkout receipt.
    Checkout,
}

impl ModalKind {
    pub const ALL: [Self; 3] = [Self::Receipt, Self::Cart, Self::Checkout];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modal name that doesn't match any [`ModalKind`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown modal '{0}'")]
pub struct UnknownModal(pub String);

impl FromStr for ModalKind {
    type Err = UnknownModal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownModal(s.to_owned()))
    }
}

/// How the visitor asked to close a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissInput {
    CloseButton,
    Escape,
    Backdrop,
}

/// Input events from the presentation layer, plus timer callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    AddToCart(ProductId),
    ViewReceipt(ProductId),
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    RemoveItem(ProductId),
    OpenCart,
    CloseModal(ModalKind),
    Dismiss(ModalKind, DismissInput),
    /// Escape with no particular target: closes every open modal.
    EscapePressed,
    ProceedToCheckout,
    FragmentChanged(Fragment),
    GraceElapsed(ModalKind, GraceTicket),
}

/// Work the caller must perform after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Start the grace timer; deliver `Action::GraceElapsed` when it fires.
    ScheduleGraceClear { modal: ModalKind, ticket: GraceTicket },
    /// A pending grace timer for this modal is obsolete.
    CancelGraceClear(ModalKind),
    /// Page background scrolling must be suppressed (`true`) or restored.
    ScrollLock(bool),
    /// Viewport movement after a fragment change.
    Scroll(ScrollEffect),
}

/// The whole visible state of one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    cart: Cart,
    receipt: Modal<Product>,
    cart_drawer: Modal<()>,
    checkout: Modal<CheckoutSnapshot>,
    fragment: Fragment,
    view: View,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a page loaded with `fragment`.
    #[must_use]
    pub fn with_fragment(fragment: Fragment) -> Self {
        Self {
            view: fragment.view(),
            fragment,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn receipt(&self) -> &Modal<Product> {
        &self.receipt
    }

    #[must_use]
    pub const fn cart_drawer(&self) -> &Modal<()> {
        &self.cart_drawer
    }

    #[must_use]
    pub const fn checkout(&self) -> &Modal<CheckoutSnapshot> {
        &self.checkout
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Phase of one modal.
    #[must_use]
    pub const fn modal_phase(&self, kind: ModalKind) -> ModalPhase {
        match kind {
            ModalKind::Receipt => self.receipt.phase(),
            ModalKind::Cart => self.cart_drawer.phase(),
            ModalKind::Checkout => self.checkout.phase(),
        }
    }

    #[must_use]
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.modal_phase(kind) == ModalPhase::Open
    }

    /// Background scroll is suppressed while any modal is open.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        ModalKind::ALL.into_iter().any(|kind| self.is_open(kind))
    }

    /// Apply one action and return the effects to carry out.
    ///
    /// Ids unknown to `catalog` and checkout with an empty cart are
    /// no-ops: no state change, no effects.
    pub fn apply(&mut self, catalog: &Catalog, action: Action, now: DateTime<Utc>) -> Vec<Effect> {
        let was_locked = self.scroll_locked();
        let mut effects = Vec::new();

        match action {
            Action::AddToCart(id) => match catalog.get(&id) {
                Some(product) => self.cart.add(product),
                None => debug!(product_id = %id, "add to cart ignored: unknown product"),
            },
            Action::ViewReceipt(id) => match catalog.get(&id) {
                Some(product) => {
                    if self.receipt.open(product.clone()) {
                        effects.push(Effect::CancelGraceClear(ModalKind::Receipt));
                    }
                }
                None => debug!(product_id = %id, "receipt ignored: unknown product"),
            },
            Action::UpdateQuantity {
                product_id,
                quantity,
            } => self.cart.update_quantity(&product_id, quantity),
            Action::RemoveItem(id) => {
                if !self.cart.remove(&id) {
                    debug!(product_id = %id, "remove ignored: not in cart");
                }
            }
            Action::OpenCart => {
                if self.cart_drawer.open(()) {
                    effects.push(Effect::CancelGraceClear(ModalKind::Cart));
                }
            }
            Action::CloseModal(kind) => self.request_close(kind, &mut effects),
            Action::Dismiss(kind, input) => {
                debug!(modal = %kind, ?input, "dismiss");
                self.request_close(kind, &mut effects);
            }
            Action::EscapePressed => {
                for kind in ModalKind::ALL {
                    self.request_close(kind, &mut effects);
                }
            }
            Action::ProceedToCheckout => self.proceed_to_checkout(now, &mut effects),
            Action::FragmentChanged(fragment) => {
                self.view = fragment.view();
                effects.push(Effect::Scroll(fragment.scroll_effect()));
                self.fragment = fragment;
            }
            Action::GraceElapsed(kind, ticket) => {
                let cleared = match kind {
                    ModalKind::Receipt => self.receipt.grace_elapsed(ticket),
                    ModalKind::Cart => self.cart_drawer.grace_elapsed(ticket),
                    ModalKind::Checkout => self.checkout.grace_elapsed(ticket),
                };
                if !cleared {
                    debug!(
                        modal = %kind,
                        generation = ticket.generation(),
                        "stale grace timer ignored"
                    );
                }
            }
        }

        let locked = self.scroll_locked();
        if locked != was_locked {
            effects.push(Effect::ScrollLock(locked));
        }
        effects
    }

    fn request_close(&mut self, kind: ModalKind, effects: &mut Vec<Effect>) {
        let ticket = match kind {
            ModalKind::Receipt => self.receipt.request_close(),
            ModalKind::Cart => self.cart_drawer.request_close(),
            ModalKind::Checkout => self.checkout.request_close(),
        };
        if let Some(ticket) = ticket {
            effects.push(Effect::ScheduleGraceClear { modal: kind, ticket });
        }
    }

    fn proceed_to_checkout(&mut self, now: DateTime<Utc>, effects: &mut Vec<Effect>) {
        if self.cart.is_empty() {
            debug!("checkout ignored: cart is empty");
            return;
        }

        let snapshot = CheckoutSnapshot::new(self.cart.take(), now);
        info!(
            order_number = %snapshot.order_number,
            items = snapshot.item_count(),
            total = %snapshot.totals().grand_total,
            "checkout placed"
        );

        if self.checkout.open(snapshot) {
            effects.push(Effect::CancelGraceClear(ModalKind::Checkout));
        }
        self.request_close(ModalKind::Cart, effects);
    }

    /// A render-ready copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            cart_items: self.cart.items().to_vec(),
            cart_totals: self.cart.totals(),
            item_count: self.cart.item_count(),
            receipt: ModalSnapshot::of(&self.receipt),
            cart_drawer: ModalSnapshot::of(&self.cart_drawer),
            checkout: ModalSnapshot::of(&self.checkout),
            view: self.view,
            fragment: self.fragment.clone(),
            scroll_locked: self.scroll_locked(),
        }
    }
}

/// Phase and payload of one modal, detached from the live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSnapshot<T> {
    pub phase: ModalPhase,
    pub payload: Option<T>,
}

impl<T: Clone> ModalSnapshot<T> {
    fn of(modal: &Modal<T>) -> Self {
        Self {
            phase: modal.phase(),
            payload: modal.payload().cloned(),
        }
    }
}

impl<T> ModalSnapshot<T> {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }
}

/// Everything a renderer needs, with derived values precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub cart_items: Vec<CartItem>,
    pub cart_totals: Totals,
    pub item_count: u64,
    pub receipt: ModalSnapshot<Product>,
    pub cart_drawer: ModalSnapshot<()>,
    pub checkout: ModalSnapshot<CheckoutSnapshot>,
    pub view: View,
    pub fragment: Fragment,
    pub scroll_locked: bool,
}

impl Default for UiSnapshot {
    fn default() -> Self {
        UiState::default().snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::fabu().unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_749_719_181_234).unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn apply(state: &mut UiState, action: Action) -> Vec<Effect> {
        state.apply(&catalog(), action, now())
    }

    fn ticket_for(effects: &[Effect], kind: ModalKind) -> GraceTicket {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleGraceClear { modal, ticket } if *modal == kind => Some(*ticket),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_add_to_cart_twice() {
        let mut state = UiState::new();
        apply(&mut state, Action::AddToCart(id("1")));
        apply(&mut state, Action::AddToCart(id("1")));
        assert_eq!(state.cart().items().len(), 1);
        assert_eq!(state.cart().quantity_of(&id("1")), 2);
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let mut state = UiState::new();
        let before = state.clone();
        assert!(apply(&mut state, Action::AddToCart(id("404"))).is_empty());
        assert!(apply(&mut state, Action::ViewReceipt(id("404"))).is_empty());
        assert!(apply(&mut state, Action::RemoveItem(id("404"))).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_view_receipt_locks_scroll() {
        let mut state = UiState::new();
        let effects = apply(&mut state, Action::ViewReceipt(id("3")));
        assert_eq!(effects, [Effect::ScrollLock(true)]);
        assert!(state.is_open(ModalKind::Receipt));
        assert_eq!(state.receipt().payload().unwrap().name, "Celestial Silk Scarf");
    }

    #[test]
    fn test_close_schedules_grace_and_unlocks() {
        let mut state = UiState::new();
        apply(&mut state, Action::ViewReceipt(id("3")));

        let effects = apply(&mut state, Action::CloseModal(ModalKind::Receipt));
        let ticket = ticket_for(&effects, ModalKind::Receipt);
        assert!(effects.contains(&Effect::ScrollLock(false)));
        assert_eq!(state.modal_phase(ModalKind::Receipt), ModalPhase::ClosingGrace);
        assert!(state.receipt().payload().is_some());

        assert!(apply(&mut state, Action::GraceElapsed(ModalKind::Receipt, ticket)).is_empty());
        assert_eq!(state.modal_phase(ModalKind::Receipt), ModalPhase::Closed);
        assert!(state.receipt().payload().is_none());
    }

    #[test]
    fn test_reopen_during_grace_keeps_new_payload() {
        let mut state = UiState::new();
        apply(&mut state, Action::ViewReceipt(id("1")));
        let effects = apply(&mut state, Action::CloseModal(ModalKind::Receipt));
        let stale = ticket_for(&effects, ModalKind::Receipt);

        let effects = apply(&mut state, Action::ViewReceipt(id("2")));
        assert!(effects.contains(&Effect::CancelGraceClear(ModalKind::Receipt)));

        apply(&mut state, Action::GraceElapsed(ModalKind::Receipt, stale));
        assert!(state.is_open(ModalKind::Receipt));
        assert_eq!(state.receipt().payload().unwrap().id, id("2"));
    }

    #[test]
    fn test_dismiss_ignored_while_closed() {
        let mut state = UiState::new();
        for input in [DismissInput::Escape, DismissInput::Backdrop, DismissInput::CloseButton] {
            assert!(apply(&mut state, Action::Dismiss(ModalKind::Cart, input)).is_empty());
        }
        assert!(apply(&mut state, Action::EscapePressed).is_empty());
    }

    #[test]
    fn test_backdrop_and_escape_close_open_modal() {
        let mut state = UiState::new();
        apply(&mut state, Action::OpenCart);
        let effects = apply(&mut state, Action::Dismiss(ModalKind::Cart, DismissInput::Backdrop));
        ticket_for(&effects, ModalKind::Cart);
        assert!(!state.is_open(ModalKind::Cart));

        apply(&mut state, Action::OpenCart);
        apply(&mut state, Action::ViewReceipt(id("1")));
        let effects = apply(&mut state, Action::EscapePressed);
        ticket_for(&effects, ModalKind::Cart);
        ticket_for(&effects, ModalKind::Receipt);
        assert!(!state.scroll_locked());
    }

    #[test]
    fn test_scroll_lock_rederived_across_modals() {
        let mut state = UiState::new();
        assert_eq!(apply(&mut state, Action::OpenCart), [Effect::ScrollLock(true)]);

        // A second modal opening doesn't change the lock.
        assert!(apply(&mut state, Action::ViewReceipt(id("4"))).is_empty());

        // Closing one of two keeps it locked.
        let effects = apply(&mut state, Action::CloseModal(ModalKind::Cart));
        assert!(!effects.iter().any(|e| matches!(e, Effect::ScrollLock(_))));
        assert!(state.scroll_locked());

        let effects = apply(&mut state, Action::CloseModal(ModalKind::Receipt));
        assert!(effects.contains(&Effect::ScrollLock(false)));
    }

    #[test]
    fn test_checkout_with_empty_cart_is_noop() {
        let mut state = UiState::new();
        apply(&mut state, Action::OpenCart);
        let before = state.clone();

        assert!(apply(&mut state, Action::ProceedToCheckout).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_checkout_moves_cart_into_snapshot() {
        let mut state = UiState::new();
        apply(&mut state, Action::AddToCart(id("1")));
        apply(&mut state, Action::AddToCart(id("1")));
        apply(&mut state, Action::AddToCart(id("3")));
        apply(&mut state, Action::OpenCart);
        let items_before = state.cart().items().to_vec();

        let effects = apply(&mut state, Action::ProceedToCheckout);

        assert!(state.cart().is_empty());
        assert!(state.is_open(ModalKind::Checkout));
        assert!(!state.is_open(ModalKind::Cart));
        ticket_for(&effects, ModalKind::Cart);

        let snapshot = state.checkout().payload().unwrap();
        assert_eq!(snapshot.items(), items_before.as_slice());
        assert_eq!(snapshot.order_number.as_str(), "ORD-19181234");
        assert_eq!(snapshot.totals().grand_total.to_string(), "$209.97");
        // Cart closed, checkout opened: still locked, no lock change.
        assert!(!effects.iter().any(|e| matches!(e, Effect::ScrollLock(_))));
    }

    #[test]
    fn test_checkout_without_open_drawer() {
        let mut state = UiState::new();
        apply(&mut state, Action::AddToCart(id("6")));
        let effects = apply(&mut state, Action::ProceedToCheckout);
        assert_eq!(effects, [Effect::ScrollLock(true)]);
        assert!(state.is_open(ModalKind::Checkout));
    }

    #[test]
    fn test_update_and_remove_through_reducer() {
        let mut state = UiState::new();
        apply(&mut state, Action::AddToCart(id("2")));
        apply(&mut state, Action::AddToCart(id("5")));
        apply(
            &mut state,
            Action::UpdateQuantity {
                product_id: id("2"),
                quantity: 4,
            },
        );
        assert_eq!(state.cart().items()[0].quantity, 4);

        apply(
            &mut state,
            Action::UpdateQuantity {
                product_id: id("2"),
                quantity: 0,
            },
        );
        apply(&mut state, Action::RemoveItem(id("5")));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_fragment_changes_view() {
        let mut state = UiState::new();
        let effects = apply(&mut state, Action::FragmentChanged(Fragment::from("#our-story")));
        assert_eq!(state.view(), View::OurStory);
        assert_eq!(effects, [Effect::Scroll(ScrollEffect::Top)]);

        let effects = apply(&mut state, Action::FragmentChanged(Fragment::from("#shop")));
        assert_eq!(state.view(), View::Home);
        assert_eq!(state.fragment().as_str(), "shop");
        assert_eq!(effects, [Effect::Scroll(ScrollEffect::Anchor("shop".into()))]);
    }

    #[test]
    fn test_with_fragment_sets_initial_view() {
        assert_eq!(UiState::with_fragment(Fragment::from("our-story")).view(), View::OurStory);
        assert_eq!(UiState::with_fragment(Fragment::default()).view(), View::Home);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = UiState::new();
        apply(&mut state, Action::AddToCart(id("1")));
        apply(&mut state, Action::AddToCart(id("3")));
        apply(&mut state, Action::OpenCart);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.item_count, 2);
        assert!(snapshot.cart_drawer.is_open());
        assert!(snapshot.scroll_locked);
        assert_eq!(snapshot.cart_totals.subtotal.to_string(), "$129.98");
    }

    #[test]
    fn test_modal_kind_from_str() {
        assert_eq!("cart".parse::<ModalKind>(), Ok(ModalKind::Cart));
        assert_eq!("checkout".parse::<ModalKind>(), Ok(ModalKind::Checkout));
        assert!("drawer".parse::<ModalKind>().is_err());
    }
}
