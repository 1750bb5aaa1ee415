//! Notification gateway for the PaperStack portal core.
//!
//! The core renders message content (HTML + plaintext) and hands it to an
//! [`EmailProvider`]; delivery is synchronous, fallible, and never fatal to
//! the caller. Providers are selected by configuration and compiled in
//! behind cargo features.

mod config;
#[cfg(feature = "email-resend")]
mod resend;
#[cfg(feature = "email-smtp")]
mod smtp;
mod templates;

pub use config::{ConfigError, EmailConfig, EmailProviderConfig};
pub use templates::EmailContent;

use async_trait::async_trait;
use thiserror::Error;

/// Email sending error
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for email providers
///
/// The sender identity comes from configuration at construction time; the
/// caller supplies the recipient and the fully rendered content.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver one message to one recipient.
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError>;
}

/// Create an email provider from configuration
pub fn create_provider(config: &EmailConfig) -> Result<Box<dyn EmailProvider>, EmailError> {
    match &config.provider {
        #[cfg(feature = "email-resend")]
        EmailProviderConfig::Resend { api_key } => Ok(Box::new(resend::ResendProvider::new(
            api_key.clone(),
            config.from_address.clone(),
            config.from_name.clone(),
        ))),
        #[cfg(not(feature = "email-resend"))]
        EmailProviderConfig::Resend { .. } => Err(EmailError::ProviderNotAvailable(
            "Resend support not compiled in. Enable the 'email-resend' feature.".to_string(),
        )),
        #[cfg(feature = "email-smtp")]
        EmailProviderConfig::Smtp {
            host,
            port,
            username,
            password,
            use_tls,
        } => {
            let provider = smtp::SmtpProvider::new(
                host.clone(),
                *port,
                username.clone(),
                password.clone(),
                *use_tls,
                config.from_address.clone(),
                config.from_name.clone(),
            )?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "email-smtp"))]
        EmailProviderConfig::Smtp { .. } => Err(EmailError::ProviderNotAvailable(
            "SMTP support not compiled in. Enable the 'email-smtp' feature.".to_string(),
        )),
    }
}
