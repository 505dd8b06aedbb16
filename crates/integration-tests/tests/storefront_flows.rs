//! HTTP flows against the full storefront router.
//!
//! Each test owns a fresh app. Requests after the first carry the session
//! cookie, so they reach the same visitor store.

use std::time::Duration;

use axum::http::StatusCode;
use fabu_integration_tests::{TEST_GRACE, TestApp};

// =============================================================================
// Page & Middleware
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_home_page_renders_catalog() {
    let mut app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("set-cookie").is_some_and(|c| c.starts_with("fabu_session=")));
    assert!(response.body.contains("Ethereal White Blouse"));
    assert!(response.body.contains("Minimalist Leather Tote"));
    assert!(response.body.contains(r#"id="modal-layer""#));
    assert!(response.body.contains(r#"id="cart-count""#));
}

#[tokio::test]
async fn test_security_headers_and_nonce() {
    let mut app = TestApp::new();
    let response = app.get("/").await;

    let csp = response.header("content-security-policy").unwrap_or_default();
    assert!(csp.contains("'nonce-"));
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert!(response.header("x-request-id").is_some());

    // The inline script carries the same nonce the policy allows
    let nonce = csp
        .split("'nonce-")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .unwrap_or_default();
    assert!(!nonce.is_empty());
    assert!(response.body.contains(&format!(r#"nonce="{nonce}""#)));
}

#[tokio::test]
async fn test_request_id_generated_per_request() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    let generated = response.header("x-request-id").map(str::to_string);
    assert!(generated.is_some());

    let again = app.get("/health").await;
    assert_ne!(again.header("x-request-id").map(str::to_string), generated);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_updates_badge() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/cart/add", "product_id=1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"hx-swap-oob="true""#));
    assert!(response.body.contains(">1</span>"));

    app.post("/cart/add", "product_id=1").await;
    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">2</span>"));
}

#[tokio::test]
async fn test_concurrent_adds_from_one_visitor_both_count() {
    let mut app = TestApp::new();
    app.get("/").await;

    let mut first = app.same_visitor();
    let mut second = app.same_visitor();
    let (a, b) = tokio::join!(
        first.post("/cart/add", "product_id=2"),
        second.post("/cart/add", "product_id=2"),
    );
    assert_eq!(a.status, StatusCode::OK);
    assert_eq!(b.status, StatusCode::OK);

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">2</span>"));
}

#[tokio::test]
async fn test_unknown_product_is_ignored() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/cart/add", "product_id=999").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(">0</span>"));
}

#[tokio::test]
async fn test_cart_drawer_lists_lines_and_totals() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/cart/add", "product_id=2").await;
    app.post("/cart/add", "product_id=3").await;

    let response = app.post("/cart/open", "").await;
    assert!(response.body.contains("modal-cart is-open"));
    assert!(response.body.contains("Urban Flow Trousers"));
    assert!(response.body.contains("Celestial Silk Scarf"));
    assert!(response.body.contains("$169.98"));
    assert!(response.body.contains("Your Cart (2 items)"));

    let events = response.client_events().unwrap_or_default();
    assert!(events.get("scroll-lock").is_some());
}

#[tokio::test]
async fn test_quantity_update_to_zero_removes_line() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/cart/add", "product_id=4").await;
    app.post("/cart/update", "product_id=4&quantity=3").await;

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">3</span>"));

    let response = app.post("/cart/update", "product_id=4&quantity=0").await;
    assert!(response.body.contains(">0</span>"));
}

#[tokio::test]
async fn test_remove_line() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/cart/add", "product_id=5").await;
    app.post("/cart/add", "product_id=6").await;

    let response = app.post("/cart/remove", "product_id=5").await;
    assert!(response.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let mut alice = TestApp::new();
    alice.get("/").await;
    alice.post("/cart/add", "product_id=1").await;

    let mut bob = alice.other_visitor();
    let count = bob.get("/cart/count").await;
    assert!(count.body.contains(">0</span>"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_empties_cart_and_shows_order() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/cart/add", "product_id=6").await;
    app.post("/cart/open", "").await;

    let response = app.post("/cart/checkout", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Thank You for Your Order"));
    assert!(response.body.contains("modal-checkout is-open"));
    assert!(response.body.contains("modal-cart is-closing"));
    assert!(response.body.contains(">0</span>"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_does_nothing() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/cart/checkout", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("modal-checkout"));
}

// =============================================================================
// Modals
// =============================================================================

#[tokio::test]
async fn test_receipt_opens_for_product() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/products/3/receipt", "").await;
    assert!(response.body.contains("modal-receipt is-open"));
    assert!(response.body.contains("Celestial Silk Scarf"));
    assert!(response.body.contains("$49.99"));
}

#[tokio::test]
async fn test_closed_modal_clears_after_grace() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/products/1/receipt", "").await;

    let closing = app.post("/modals/receipt/close", "").await;
    assert!(closing.body.contains("modal-receipt is-closing"));
    assert!(closing.body.contains("Ethereal White Blouse"));
    assert!(closing.body.contains(&format!("load delay:{}ms", TEST_GRACE.as_millis())));
    assert!(closing.client_events().unwrap_or_default().get("scroll-unlock").is_some());

    tokio::time::sleep(TEST_GRACE + Duration::from_millis(200)).await;

    let cleared = app.get("/modals").await;
    assert!(!cleared.body.contains("modal-receipt"));
    assert!(!cleared.body.contains("load delay"));
}

#[tokio::test]
async fn test_reopen_during_grace_keeps_modal() {
    let mut app = TestApp::new();
    app.get("/").await;
    app.post("/products/1/receipt", "").await;
    app.post("/modals/receipt/close", "").await;
    app.post("/products/2/receipt", "").await;

    tokio::time::sleep(TEST_GRACE + Duration::from_millis(200)).await;

    let layer = app.get("/modals").await;
    assert!(layer.body.contains("modal-receipt is-open"));
    assert!(layer.body.contains("Urban Flow Trousers"));
}

#[tokio::test]
async fn test_backdrop_and_escape_close() {
    let mut app = TestApp::new();
    app.get("/").await;

    app.post("/cart/open", "").await;
    let dismissed = app.post("/modals/cart/dismiss", "").await;
    assert!(dismissed.body.contains("modal-cart is-closing"));

    app.post("/products/5/receipt", "").await;
    let escaped = app.post("/modals/escape", "").await;
    assert!(escaped.body.contains("modal-receipt is-closing"));
    assert!(!escaped.body.contains("is-open"));
}

#[tokio::test]
async fn test_unknown_modal_kind_is_bad_request() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/modals/drawer/close", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Views
// =============================================================================

#[tokio::test]
async fn test_our_story_fragment() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/view", "fragment=%23our-story").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("The Heart of FABU"));
    assert!(!response.body.contains(r#"id="shop""#));
    assert!(response.client_events().unwrap_or_default().get("scroll-top").is_some());

    // A full reload keeps the view the visitor last reported
    let page = app.get("/").await;
    assert!(page.body.contains("The Heart of FABU"));
    assert!(page.body.contains(
        r#"content="How FABU began, how our pieces are made, and what we promise.""#
    ));
}

#[tokio::test]
async fn test_anchor_fragment_scrolls_on_home() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/view", "fragment=%23shop").await;
    assert!(response.body.contains(r#"id="shop""#));
    let events = response.client_events().unwrap_or_default();
    assert_eq!(events["scroll-anchor"]["id"], "shop");
}

#[tokio::test]
async fn test_missing_fragment_is_home() {
    let mut app = TestApp::new();
    app.get("/").await;

    let response = app.post("/view", "").await;
    assert!(response.body.contains(r#"id="featured""#));
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_accepts_valid_message() {
    let mut app = TestApp::new();
    let response = app
        .post(
            "/contact",
            "name=Ada&email=ada%40example.com&message=Do+you+ship+abroad%3F",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Thank you, Ada"));
}

#[tokio::test]
async fn test_contact_rejects_bad_email() {
    let mut app = TestApp::new();
    let response = app
        .post("/contact", "name=Ada&email=not-an-email&message=Hello")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("contact-error"));
}
