//! Contact form route handler.
//!
//! The "Connect With Us" form is acknowledged and logged. Nothing is
//! stored or sent anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use fabu_core::ContactMessage;
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;

/// Contact form data. Missing fields deserialize as empty and fail
/// validation with a message instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact form result fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_result.html")]
pub struct ContactResultTemplate {
    /// Sender's name on success.
    pub name: Option<String>,
    /// Validation message on failure.
    pub error: Option<String>,
}

/// Submit the contact form.
///
/// POST /contact
///
/// Always answers 200 with a fragment: a thank-you, or the first
/// validation problem.
#[instrument(skip_all)]
pub async fn submit(Form(form): Form<ContactForm>) -> ContactResultTemplate {
    match ContactMessage::parse(&form.name, &form.email, &form.message) {
        Ok(message) => {
            tracing::info!(
                email_domain = message.email_domain(),
                message_chars = message.message().chars().count(),
                "contact message received"
            );
            add_breadcrumb("contact", "Contact form submitted", None);
            ContactResultTemplate {
                name: Some(message.name().to_string()),
                error: None,
            }
        }
        Err(e) => {
            tracing::debug!(reason = e.kind(), "contact message rejected");
            ContactResultTemplate {
                name: None,
                error: Some(e.to_string()),
            }
        }
    }
}
