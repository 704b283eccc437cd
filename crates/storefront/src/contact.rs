//! Contact form validation and simulated submission.
//!
//! Validation is a synchronous pass that yields one message per failing
//! field. It never touches cart or catalog state. Submission waits out a
//! configurable latency standing in for a remote call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use showroom_core::Email;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{Result, StoreError};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid regex"));

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;
const PHONE_DIGITS: usize = 10;

/// Contact form fields, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

/// Field to message map produced by a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, String>);

impl FieldErrors {
    fn insert(&mut self, field: ContactField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// The first failing field in form order, for scrolling it into view.
    #[must_use]
    pub fn first(&self) -> Option<ContactField> {
        self.0.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
        }
        Ok(())
    }
}

/// Raw contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// A contact form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    /// Ten digits, separators removed.
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Check every field and collect one message per failing field.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldErrors`] when any field is missing or malformed.
    pub fn validate(&self) -> std::result::Result<ValidContact, FieldErrors> {
        let mut errors = FieldErrors::default();

        // Blank checks ignore surrounding whitespace; length and format checks
        // see the text as typed.
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(ContactField::Name, "Please enter your name");
        } else if self.name.chars().count() < MIN_NAME_CHARS {
            errors.insert(ContactField::Name, "Name must be at least 2 characters");
        }

        let parsed_email = if self.email.trim().is_empty() {
            errors.insert(ContactField::Email, "Please enter your email");
            None
        } else {
            match Email::parse(&self.email) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.insert(ContactField::Email, "Email format is invalid");
                    None
                }
            }
        };

        let phone_digits = self.phone.replace('-', "");
        if self.phone.trim().is_empty() {
            errors.insert(ContactField::Phone, "Please enter your phone number");
        } else if !PHONE_RE.is_match(&phone_digits) {
            errors.insert(ContactField::Phone, "Phone number must be 10 digits");
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.insert(ContactField::Message, "Please enter a message");
        } else if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.insert(
                ContactField::Message,
                "Message must be at least 10 characters",
            );
        }

        match parsed_email {
            Some(email) if errors.is_empty() => Ok(ValidContact {
                name: name.to_string(),
                email,
                phone: phone_digits,
                message: message.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Format phone input as the user types: `ddd`, `ddd-ddd` or `ddd-ddd-dddd`.
///
/// Non-digits are dropped and input past ten digits is ignored.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();
    if digits.len() <= 3 {
        return digits;
    }
    let (area, rest) = digits.split_at(3);
    if rest.len() <= 3 {
        return format!("{area}-{rest}");
    }
    let (exchange, line) = rest.split_at(3);
    format!("{area}-{exchange}-{line}")
}

/// Acknowledgement for a submitted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub contact: ValidContact,
}

/// Accepts contact form submissions, one at a time.
#[derive(Debug)]
pub struct ContactDesk {
    latency: Duration,
    submitting: AtomicBool,
}

impl ContactDesk {
    /// Default simulated submission latency.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            submitting: AtomicBool::new(false),
        }
    }

    /// True while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate and submit a form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the form is invalid, or
    /// [`StoreError::Busy`] if another submission has not finished yet.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactReceipt> {
        let contact = form.validate().map_err(StoreError::Validation)?;

        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(StoreError::Busy);
        }
        let _reset = SubmittingGuard(&self.submitting);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let receipt = ContactReceipt {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            contact,
        };
        info!(
            receipt = %receipt.id,
            domain = receipt.contact.email.domain(),
            "Contact message received"
        );
        Ok(receipt)
    }
}

impl Default for ContactDesk {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

/// Clears the in-flight flag even if the submitting future is dropped.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Somchai Jaidee".to_string(),
            email: "somchai@example.co.th".to_string(),
            phone: "081-234-5678".to_string(),
            message: "Do you ship to Chiang Mai?".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let contact = valid_form().validate().unwrap();
        assert_eq!(contact.phone, "0812345678");
        assert_eq!(contact.email.as_str(), "somchai@example.co.th");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.first(), Some(ContactField::Name));
        assert_eq!(errors.get(ContactField::Phone), Some("Please enter your phone number"));
    }

    #[test]
    fn test_length_rules() {
        let form = ContactForm {
            name: "A".to_string(),
            message: "Too short".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(ContactField::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            errors.get(ContactField::Message),
            Some("Message must be at least 10 characters")
        );
        assert_eq!(errors.get(ContactField::Email), None);
    }

    #[test]
    fn test_lengths_count_text_as_typed() {
        let form = ContactForm {
            name: "A ".to_string(),
            message: "  Call me ".to_string(),
            ..valid_form()
        };
        let contact = form.validate().unwrap();
        assert_eq!(contact.name, "A");
        assert_eq!(contact.message, "Call me");
    }

    #[test]
    fn test_email_is_checked_as_typed() {
        let padded = ContactForm {
            email: " somchai@example.co.th".to_string(),
            ..valid_form()
        };
        assert_eq!(
            padded.validate().unwrap_err().get(ContactField::Email),
            Some("Email format is invalid")
        );

        let long = ContactForm {
            email: format!("{}@example.com", "a".repeat(300)),
            ..valid_form()
        };
        assert!(long.validate().is_ok());
    }

    #[test]
    fn test_email_and_phone_format() {
        let form = ContactForm {
            email: "somchai@localhost".to_string(),
            phone: "08-1234".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first(), Some(ContactField::Email));
        assert_eq!(
            errors.get(ContactField::Phone),
            Some("Phone number must be 10 digits")
        );
    }

    #[test]
    fn test_field_errors_display() {
        let form = ContactForm {
            name: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.to_string(), "name: Please enter your name");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("081"), "081");
        assert_eq!(format_phone("08123"), "081-23");
        assert_eq!(format_phone("081234567"), "081-234-567");
        assert_eq!(format_phone("(081) 234-5678 ext 9"), "081-234-5678");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_latency() {
        let desk = ContactDesk::default();
        let start = tokio::time::Instant::now();
        let receipt = desk.submit(&valid_form()).await.unwrap();
        assert!(start.elapsed() >= ContactDesk::DEFAULT_LATENCY);
        assert_eq!(receipt.contact.name, "Somchai Jaidee");
        assert!(!desk.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form() {
        let desk = ContactDesk::new(Duration::ZERO);
        let result = desk.submit(&ContactForm::default()).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submit_is_busy() {
        let desk = Arc::new(ContactDesk::default());
        let first = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move { desk.submit(&valid_form()).await })
        };
        tokio::task::yield_now().await;
        assert!(desk.is_submitting());

        let second = desk.submit(&valid_form()).await;
        assert!(matches!(second, Err(StoreError::Busy)));

        assert!(first.await.unwrap().is_ok());
        assert!(!desk.is_submitting());
    }
}
