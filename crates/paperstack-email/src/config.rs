//! Email configuration for the notification gateway.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! # Provider: Resend
//! PAPERSTACK_EMAIL_PROVIDER=resend
//! RESEND_API_KEY=re_...
//!
//! # Provider: SMTP
//! PAPERSTACK_EMAIL_PROVIDER=smtp
//! SMTP_HOST=smtp.gmail.com
//! SMTP_PORT=587
//! SMTP_USERNAME=user@example.com
//! SMTP_PASSWORD=app_password
//! SMTP_USE_TLS=true
//!
//! # Sender config
//! PAPERSTACK_EMAIL_FROM=noreply@paperstack.dev
//! PAPERSTACK_EMAIL_FROM_NAME="PaperStack"
//! ```
//!
//! Misconfiguration is detected here, at startup, so a broken deployment
//! fails before it accepts traffic rather than on the first verification
//! request.

use std::env;
use thiserror::Error;

/// Email configuration for verification messages
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email provider configuration
    pub provider: EmailProviderConfig,
    /// From email address
    pub from_address: String,
    /// Optional from name
    pub from_name: Option<String>,
}

/// Email provider configuration
#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    /// Resend email provider
    Resend {
        /// Resend API key
        #[allow(dead_code)] // Used when email-resend feature is enabled
        api_key: String,
    },
    /// SMTP email provider
    Smtp {
        /// SMTP host
        host: String,
        /// SMTP port
        port: u16,
        /// Optional username
        username: Option<String>,
        /// Optional password
        password: Option<String>,
        /// Whether to use TLS
        use_tls: bool,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid email provider: {0}. Expected 'resend' or 'smtp'")]
    InvalidProvider(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Missing from address: PAPERSTACK_EMAIL_FROM is required when email is configured")]
    MissingFromAddress,

    #[error("SMTP provider requires SMTP_HOST")]
    SmtpMissingHost,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when no provider is configured at all (verification
    /// emails disabled, e.g. development against the memory store).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(provider_type) = env::var("PAPERSTACK_EMAIL_PROVIDER").ok() else {
            return Ok(None);
        };

        let provider = match provider_type.to_lowercase().as_str() {
            "resend" => {
                let api_key = env::var("RESEND_API_KEY")
                    .map_err(|_| ConfigError::MissingEnvVar("RESEND_API_KEY".to_string()))?;
                EmailProviderConfig::Resend { api_key }
            }
            "smtp" => {
                let host = env::var("SMTP_HOST").map_err(|_| ConfigError::SmtpMissingHost)?;
                let port = env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse::<u16>()
                    .map_err(|_| {
                        ConfigError::InvalidPort(
                            env::var("SMTP_PORT").unwrap_or_else(|_| "invalid".to_string()),
                        )
                    })?;
                let username = env::var("SMTP_USERNAME").ok();
                let password = env::var("SMTP_PASSWORD").ok();
                let use_tls = env::var("SMTP_USE_TLS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(true); // TLS by default

                EmailProviderConfig::Smtp {
                    host,
                    port,
                    username,
                    password,
                    use_tls,
                }
            }
            other => return Err(ConfigError::InvalidProvider(other.to_string())),
        };

        let from_address =
            env::var("PAPERSTACK_EMAIL_FROM").map_err(|_| ConfigError::MissingFromAddress)?;
        let from_name = env::var("PAPERSTACK_EMAIL_FROM_NAME").ok();

        Ok(Some(EmailConfig {
            provider,
            from_address,
            from_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that modify environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    // All env vars we touch in tests - cleared before each test
    const ENV_VARS: &[&str] = &[
        "PAPERSTACK_EMAIL_PROVIDER",
        "RESEND_API_KEY",
        "SMTP_HOST",
        "SMTP_PORT",
        "SMTP_USERNAME",
        "SMTP_PASSWORD",
        "SMTP_USE_TLS",
        "PAPERSTACK_EMAIL_FROM",
        "PAPERSTACK_EMAIL_FROM_NAME",
    ];

    // Helper to clean up env vars - holds mutex lock
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
    }

    impl<'a> EnvGuard<'a> {
        fn new() -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            for var in ENV_VARS {
                env::remove_var(var);
            }
            Self { _lock: lock }
        }

        fn set(&self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl<'a> Drop for EnvGuard<'a> {
        fn drop(&mut self) {
            for var in ENV_VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_no_provider_means_disabled() {
        let _guard = EnvGuard::new();

        let config = EmailConfig::from_env().unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_resend_provider_config() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "resend");
        guard.set("RESEND_API_KEY", "re_test_key");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");
        guard.set("PAPERSTACK_EMAIL_FROM_NAME", "Test Sender");

        let config = EmailConfig::from_env().unwrap().unwrap();
        assert_eq!(config.from_address, "test@example.com");
        assert_eq!(config.from_name, Some("Test Sender".to_string()));

        match config.provider {
            EmailProviderConfig::Resend { api_key } => {
                assert_eq!(api_key, "re_test_key");
            }
            _ => panic!("Expected Resend provider"),
        }
    }

    #[test]
    fn test_resend_missing_api_key() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "resend");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let result = EmailConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_smtp_provider_config() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "smtp");
        guard.set("SMTP_HOST", "smtp.example.com");
        guard.set("SMTP_PORT", "465");
        guard.set("SMTP_USERNAME", "user@example.com");
        guard.set("SMTP_PASSWORD", "secret");
        guard.set("SMTP_USE_TLS", "true");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let config = EmailConfig::from_env().unwrap().unwrap();

        match config.provider {
            EmailProviderConfig::Smtp {
                host,
                port,
                username,
                password,
                use_tls,
            } => {
                assert_eq!(host, "smtp.example.com");
                assert_eq!(port, 465);
                assert_eq!(username, Some("user@example.com".to_string()));
                assert_eq!(password, Some("secret".to_string()));
                assert!(use_tls);
            }
            _ => panic!("Expected SMTP provider"),
        }
    }

    #[test]
    fn test_smtp_defaults() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "smtp");
        guard.set("SMTP_HOST", "smtp.example.com");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let config = EmailConfig::from_env().unwrap().unwrap();

        match config.provider {
            EmailProviderConfig::Smtp {
                port,
                username,
                password,
                use_tls,
                ..
            } => {
                assert_eq!(port, 587);
                assert!(username.is_none());
                assert!(password.is_none());
                assert!(use_tls);
            }
            _ => panic!("Expected SMTP provider"),
        }
    }

    #[test]
    fn test_smtp_missing_host() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "smtp");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let result = EmailConfig::from_env();
        assert!(matches!(result, Err(ConfigError::SmtpMissingHost)));
    }

    #[test]
    fn test_invalid_port() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "smtp");
        guard.set("SMTP_HOST", "smtp.example.com");
        guard.set("SMTP_PORT", "not_a_number");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let result = EmailConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn test_invalid_provider() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "mailgun");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let result = EmailConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidProvider(_))));
    }

    #[test]
    fn test_missing_from_address() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "resend");
        guard.set("RESEND_API_KEY", "re_test_key");

        let result = EmailConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingFromAddress)));
    }

    #[test]
    fn test_provider_case_insensitive() {
        let guard = EnvGuard::new();
        guard.set("PAPERSTACK_EMAIL_PROVIDER", "RESEND");
        guard.set("RESEND_API_KEY", "re_test_key");
        guard.set("PAPERSTACK_EMAIL_FROM", "test@example.com");

        let config = EmailConfig::from_env().unwrap();
        assert!(config.is_some());
        match config.unwrap().provider {
            EmailProviderConfig::Resend { .. } => {}
            _ => panic!("Expected Resend provider"),
        }
    }
}
