//! Integration tests for the FABU storefront preview.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fabu-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flows` - HTTP flows against the full router, in process
//! - `ui_state` - Multi-step scenarios against the state machine
//!
//! Nothing here needs a running server: [`TestApp`] drives the router with
//! `tower::ServiceExt::oneshot` and carries the session cookie by hand.

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use fabu_core::Catalog;
use fabu_storefront::config::StorefrontConfig;
use fabu_storefront::content::ContentStore;
use fabu_storefront::state::AppState;
use tower::ServiceExt;

/// Grace period used by [`TestApp`], short so clear-after-grace tests stay fast.
pub const TEST_GRACE: Duration = Duration::from_millis(20);

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parsed `HX-Trigger-After-Swap` events.
    #[must_use]
    pub fn client_events(&self) -> Option<serde_json::Value> {
        self.header("hx-trigger-after-swap")
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// The storefront router plus one visitor's session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the app with the bundled content and a short grace period.
    ///
    /// # Panics
    ///
    /// Panics if the catalog or bundled content fails to load.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let mut config = StorefrontConfig::default();
        config.store.modal_grace = TEST_GRACE;

        let content_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/content");
        let content = ContentStore::load(&content_dir).expect("bundled content should load");
        let catalog = Catalog::fabu().expect("catalog should build");

        Self {
            router: fabu_storefront::app(AppState::with_parts(config, catalog, content)),
            cookie: None,
        }
    }

    /// A second visitor sharing this app's server state but not its cookie.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Another client for the same visitor, sharing this app's cookie.
    #[must_use]
    pub fn same_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// Send a form-encoded POST request.
    pub async fn post(&mut self, uri: &str, form: &str) -> TestResponse {
        let builder =
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_string())).await
    }

    #[allow(clippy::expect_used)]
    async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
