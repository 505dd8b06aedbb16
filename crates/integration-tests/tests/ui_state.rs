//! Multi-step scenarios against the storefront state machine.
//!
//! Timers are simulated: a `ScheduleGraceClear` effect is redeemed by
//! feeding its ticket back as `GraceElapsed`, the way the visitor store does.

use chrono::{TimeZone, Utc};
use fabu_core::{
    Action, Catalog, Effect, GraceTicket, ModalKind, ModalPhase, ProductId, UiState, View,
};

fn catalog() -> Catalog {
    Catalog::fabu().unwrap_or_else(|e| panic!("catalog: {e}"))
}

fn apply(state: &mut UiState, catalog: &Catalog, action: Action) -> Vec<Effect> {
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).single();
    state.apply(catalog, action, now.unwrap_or_else(Utc::now))
}

fn scheduled(effects: &[Effect], kind: ModalKind) -> Option<GraceTicket> {
    effects.iter().find_map(|effect| match effect {
        Effect::ScheduleGraceClear { modal, ticket } if *modal == kind => Some(*ticket),
        _ => None,
    })
}

// =============================================================================
// Shopping Scenarios
// =============================================================================

#[test]
fn test_browse_add_and_checkout() {
    let catalog = catalog();
    let mut state = UiState::new();

    apply(&mut state, &catalog, Action::ViewReceipt(ProductId::new("5")));
    apply(&mut state, &catalog, Action::AddToCart(ProductId::new("5")));
    let effects = apply(&mut state, &catalog, Action::CloseModal(ModalKind::Receipt));
    let receipt_ticket = scheduled(&effects, ModalKind::Receipt);
    assert!(receipt_ticket.is_some());

    apply(&mut state, &catalog, Action::AddToCart(ProductId::new("3")));
    apply(&mut state, &catalog, Action::OpenCart);
    assert_eq!(state.cart().item_count(), 2);
    assert!(state.scroll_locked());

    let effects = apply(&mut state, &catalog, Action::ProceedToCheckout);
    assert!(state.cart().is_empty());
    assert!(state.is_open(ModalKind::Checkout));
    assert_eq!(state.modal_phase(ModalKind::Cart), ModalPhase::ClosingGrace);
    assert!(scheduled(&effects, ModalKind::Cart).is_some());

    let order = state.checkout().payload().cloned();
    let order = order.unwrap_or_else(|| panic!("order should be placed"));
    assert_eq!(order.item_count(), 2);
    assert_eq!(order.totals().subtotal.display(), "$239.98");
}

#[test]
fn test_closing_checkout_unlocks_scroll_and_clears_after_grace() {
    let catalog = catalog();
    let mut state = UiState::new();
    apply(&mut state, &catalog, Action::AddToCart(ProductId::new("1")));
    apply(&mut state, &catalog, Action::ProceedToCheckout);
    assert!(state.scroll_locked());

    let effects = apply(&mut state, &catalog, Action::CloseModal(ModalKind::Checkout));
    assert!(effects.contains(&Effect::ScrollLock(false)));
    let ticket = scheduled(&effects, ModalKind::Checkout);
    let ticket = ticket.unwrap_or_else(|| panic!("grace clear should be scheduled"));

    // Receipt content still shows while fading out
    assert!(state.checkout().payload().is_some());

    apply(&mut state, &catalog, Action::GraceElapsed(ModalKind::Checkout, ticket));
    assert_eq!(state.modal_phase(ModalKind::Checkout), ModalPhase::Closed);
    assert!(state.checkout().payload().is_none());
}

// =============================================================================
// Grace Timer Races
// =============================================================================

#[test]
fn test_stale_grace_timer_does_not_clear_reopened_modal() {
    let catalog = catalog();
    let mut state = UiState::new();

    apply(&mut state, &catalog, Action::ViewReceipt(ProductId::new("1")));
    let effects = apply(&mut state, &catalog, Action::CloseModal(ModalKind::Receipt));
    let stale = scheduled(&effects, ModalKind::Receipt);
    let stale = stale.unwrap_or_else(|| panic!("grace clear should be scheduled"));

    let effects = apply(&mut state, &catalog, Action::ViewReceipt(ProductId::new("2")));
    assert!(effects.contains(&Effect::CancelGraceClear(ModalKind::Receipt)));

    apply(&mut state, &catalog, Action::GraceElapsed(ModalKind::Receipt, stale));
    assert!(state.is_open(ModalKind::Receipt));
    assert_eq!(
        state.receipt().payload().map(|p| p.name.as_str()),
        Some("Urban Flow Trousers")
    );
}

#[test]
fn test_second_close_keeps_first_ticket() {
    let catalog = catalog();
    let mut state = UiState::new();

    apply(&mut state, &catalog, Action::OpenCart);
    let first = apply(&mut state, &catalog, Action::CloseModal(ModalKind::Cart));
    let again = apply(&mut state, &catalog, Action::EscapePressed);

    assert!(scheduled(&first, ModalKind::Cart).is_some());
    assert!(scheduled(&again, ModalKind::Cart).is_none());
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_navigation_round_trip() {
    let catalog = catalog();
    let mut state = UiState::new();
    assert_eq!(state.view(), View::Home);

    apply(&mut state, &catalog, Action::FragmentChanged("#our-story".into()));
    assert_eq!(state.view(), View::OurStory);

    apply(&mut state, &catalog, Action::FragmentChanged("#contact".into()));
    assert_eq!(state.view(), View::Home);
    assert_eq!(state.fragment().as_str(), "contact");
}

#[test]
fn test_view_changes_leave_modals_alone() {
    let catalog = catalog();
    let mut state = UiState::new();
    apply(&mut state, &catalog, Action::OpenCart);

    apply(&mut state, &catalog, Action::FragmentChanged("#our-story".into()));
    assert!(state.is_open(ModalKind::Cart));
}
