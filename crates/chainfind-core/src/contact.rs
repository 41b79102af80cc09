//! Contact form collected by the `/signal` command.
//!
//! The form is acknowledged locally with a confirmation system message;
//! nothing is transmitted anywhere.

use anyhow::{Result, bail};

/// Fields of the secure contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalForm {
    /// Identity string (name or handle).
    pub identity: String,
    /// Return-path email address.
    pub return_path: String,
    /// Payload message.
    pub payload: String,
}

impl SignalForm {
    pub fn new(
        identity: impl Into<String>,
        return_path: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            return_path: return_path.into(),
            payload: payload.into(),
        }
    }

    /// Validates that all fields are present and the return path looks
    /// like an email address.
    pub fn validate(&self) -> Result<()> {
        if self.identity.trim().is_empty() {
            bail!("identity is required");
        }
        let return_path = self.return_path.trim();
        if return_path.is_empty() {
            bail!("return path is required");
        }
        if !return_path.contains('@') || return_path.starts_with('@') || return_path.ends_with('@')
        {
            bail!("return path is not a valid email address: {return_path}");
        }
        if self.payload.trim().is_empty() {
            bail!("payload is required");
        }
        Ok(())
    }

    /// Renders the local acknowledgement text.
    pub fn confirmation_text(&self) -> String {
        format!(
            "SIGNAL RECEIVED.\nIdentity [{}] logged. Response will be routed to [{}].\nTransmission archived.",
            self.identity.trim(),
            self.return_path.trim()
        )
    }
}
