//! Contact form command.

use showroom_storefront::contact::format_phone;
use showroom_storefront::{ContactForm, Storefront};
use tracing::{info, warn};

/// Validate the form and optionally submit it.
///
/// # Errors
///
/// Returns an error if validation fails or the submission is rejected.
pub async fn run(
    store: &Storefront,
    form: &ContactForm,
    submit: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = ContactForm {
        phone: format_phone(&form.phone),
        ..form.clone()
    };

    if let Err(errors) = form.validate() {
        for (field, message) in errors.iter() {
            warn!(field = field.as_str(), "{message}");
        }
        return Err(format!("{} invalid field(s)", errors.len()).into());
    }

    if !submit {
        info!("Contact form is valid");
        return Ok(());
    }

    info!("Sending message...");
    let receipt = store.submit_contact(&form).await?;
    info!(receipt = %receipt.id, at = %receipt.received_at, "Message sent");
    Ok(())
}
