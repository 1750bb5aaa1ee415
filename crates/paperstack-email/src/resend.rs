//! Resend email provider implementation.

use super::{EmailContent, EmailError, EmailProvider};
use async_trait::async_trait;
use resend_rs::{types::CreateEmailBaseOptions, Resend};

/// Resend email provider.
pub struct ResendProvider {
    client: Resend,
    from_address: String,
    from_name: Option<String>,
}

impl ResendProvider {
    /// Create a new Resend provider with the given API key.
    pub fn new(api_key: String, from_address: String, from_name: Option<String>) -> Self {
        Self {
            client: Resend::new(&api_key),
            from_address,
            from_name,
        }
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError> {
        let from = match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        };

        let email =
            CreateEmailBaseOptions::new(from, vec![to.to_string()], content.subject.clone())
                .with_text(&content.text)
                .with_html(&content.html);

        self.client
            .emails
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = ResendProvider::new(
            "re_test_key".to_string(),
            "noreply@paperstack.dev".to_string(),
            None,
        );
        assert!(std::mem::size_of_val(&provider) > 0);
    }
}
