//! Contact form input.
//!
//! The "Connect With Us" form collects a name, an email address and a
//! message. Nothing is stored or sent; the storefront only validates the
//! input and acknowledges it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`ContactMessage`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The name field is blank.
    #[error("please tell us your name")]
    MissingName,
    /// The email field is blank.
    #[error("please enter an email address")]
    MissingEmail,
    /// The email address has no usable `local@domain` shape.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    /// The message field is blank.
    #[error("please include a message")]
    MissingMessage,
    /// A field exceeds its length limit.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

impl ContactError {
    /// Short, stable name of the error that never includes user input.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::MissingEmail => "missing_email",
            Self::InvalidEmail(_) => "invalid_email",
            Self::MissingMessage => "missing_message",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// A validated contact form submission.
///
/// All fields are trimmed. The email must contain exactly one `@` with a
/// non-empty local part and a domain that contains a dot.
///
/// ```
/// use fabu_core::ContactMessage;
///
/// let msg = ContactMessage::parse(" Ada ", "ada@example.com", "Hello!").unwrap();
/// assert_eq!(msg.name(), "Ada");
///
/// assert!(ContactMessage::parse("Ada", "ada.example.com", "Hello!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Maximum length of the name field.
    pub const MAX_NAME_LENGTH: usize = 120;
    /// Maximum length of the message body.
    pub const MAX_MESSAGE_LENGTH: usize = 5000;

    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContactError`] found, checking name, then email,
    /// then message.
    pub fn parse(name: &str, email: &str, message: &str) -> Result<Self, ContactError> {
        let name = name.trim();
        let email = email.trim();
        let message = message.trim();

        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        check_length("name", name, Self::MAX_NAME_LENGTH)?;

        validate_email(email)?;

        if message.is_empty() {
            return Err(ContactError::MissingMessage);
        }
        check_length("message", message, Self::MAX_MESSAGE_LENGTH)?;

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }

    /// The sender's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sender's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Domain part of the email, used for log fields instead of the full
    /// address.
    #[must_use]
    pub fn email_domain(&self) -> &str {
        self.email.rsplit('@').next().unwrap_or_default()
    }
}

impl fmt::Display for ContactMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ContactError> {
    if value.chars().count() > max {
        return Err(ContactError::TooLong { field, max });
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ContactError> {
    if email.is_empty() {
        return Err(ContactError::MissingEmail);
    }
    check_length("email", email, ContactMessage::MAX_EMAIL_LENGTH)?;

    let invalid = || ContactError::InvalidEmail(email.to_owned());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    // "a@b" is technically deliverable on an intranet, but not from this form.
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}
