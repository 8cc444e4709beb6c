//! Recipient ID validation.

use crate::error::ChannelError;
use crate::Result;
use cipherh_core::ChannelId;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// Numeric chat id (negative for groups) or a public @username.
static TELEGRAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+|@[A-Za-z0-9_]{5,32})$").expect("valid telegram regex")
});

/// Check a recipient ID against the rules shared by all channels.
///
/// The ID must be non-empty and contain no whitespace or control characters.
pub fn validate_common(channel: ChannelId, recipient_id: &str) -> Result<()> {
    if recipient_id.trim().is_empty() {
        return Err(ChannelError::invalid_recipient(
            channel,
            "recipient_id is empty",
        ));
    }

    if recipient_id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ChannelError::invalid_recipient(
            channel,
            "recipient_id contains whitespace or control characters",
        ));
    }

    Ok(())
}

/// Email recipients must look like `local@domain.tld`.
pub fn validate_email(recipient_id: &str) -> Result<()> {
    validate_common(ChannelId::Email, recipient_id)?;

    if !EMAIL.is_match(recipient_id) {
        return Err(ChannelError::invalid_recipient(
            ChannelId::Email,
            format!("'{}' is not an email address", recipient_id),
        ));
    }

    Ok(())
}

/// Telegram recipients are chat ids or `@username` handles.
pub fn validate_telegram(recipient_id: &str) -> Result<()> {
    validate_common(ChannelId::Telegram, recipient_id)?;

    if !TELEGRAM.is_match(recipient_id) {
        return Err(ChannelError::invalid_recipient(
            ChannelId::Telegram,
            format!("'{}' is neither a chat id nor an @username", recipient_id),
        ));
    }

    Ok(())
}
