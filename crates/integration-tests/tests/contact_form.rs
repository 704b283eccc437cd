//! Contact form validation and submission.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use showroom_core::Severity;
use showroom_integration_tests::{immediate_store, store_with};
use showroom_storefront::contact::format_phone;
use showroom_storefront::{ContactField, ContactForm, StoreError, StorefrontConfig};

fn form(name: &str, email: &str, phone: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn test_validation_table() {
    let ok = form("Ann", "ann@shop.th", "0812345678", "Hello there!");
    assert!(ok.validate().is_ok());

    let cases = [
        (form("", "ann@shop.th", "0812345678", "Hello there!"), ContactField::Name),
        (form("   ", "ann@shop.th", "0812345678", "Hello there!"), ContactField::Name),
        (form("Ann", "ann@shop", "0812345678", "Hello there!"), ContactField::Email),
        (form("Ann", "ann shop@x.th", "0812345678", "Hello there!"), ContactField::Email),
        (form("Ann", "ann@shop.th", "081234567", "Hello there!"), ContactField::Phone),
        (form("Ann", "ann@shop.th", "08123456789", "Hello there!"), ContactField::Phone),
        (form("Ann", "ann@shop.th", "081 234 5678", "Hello there!"), ContactField::Phone),
        (form("Ann", "ann@shop.th", "0812345678", "Hi"), ContactField::Message),
    ];

    for (input, field) in cases {
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1, "{input:?}");
        assert!(errors.get(field).is_some(), "{input:?}");
    }
}

#[test]
fn test_dashes_are_ignored_in_phone() {
    let contact = form("Ann", "ann@shop.th", "081-234-5678", "Hello there!")
        .validate()
        .unwrap();
    assert_eq!(contact.phone, "0812345678");
    assert_eq!(format_phone(&contact.phone), "081-234-5678");
}

#[tokio::test(start_paused = true)]
async fn test_submit_waits_two_seconds() {
    let store = store_with(StorefrontConfig::default());
    let start = tokio::time::Instant::now();
    let receipt = store
        .submit_contact(&form("Ann", "ann@shop.th", "0812345678", "Hello there!"))
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(2000));
    assert_eq!(receipt.contact.email.as_str(), "ann@shop.th");
    assert_eq!(store.notification().unwrap().severity, Severity::Success);
}

#[tokio::test]
async fn test_invalid_submit_is_rejected_without_delay() {
    let store = immediate_store();
    let result = store.submit_contact(&ContactForm::default()).await;
    match result {
        Err(StoreError::Validation(errors)) => assert_eq!(errors.len(), 4),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!store.is_submitting_contact());
}

#[test]
fn test_form_deserializes_from_json() {
    let input: ContactForm = serde_json::from_str(
        r#"{"name": "Ann", "email": "ann@shop.th", "phone": "0812345678", "message": "Hello there!"}"#,
    )
    .unwrap();
    assert!(input.validate().is_ok());
}
