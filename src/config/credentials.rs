//! Credential resolution from configuration.
//!
//! Secrets come from the config file first and the environment second. They
//! are resolved on demand and wrapped so they never end up in logs.

use super::types::{CloudConfig, SpeechConfig};

pub const CLOUD_URL_ENV: &str = "PHONICS_CLOUD_URL";
pub const CLOUD_KEY_ENV: &str = "PHONICS_CLOUD_KEY";
pub const SPEECH_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Configured(SecureString),
    Unconfigured {
        /// Reason for missing configuration.
        reason: String,
    },
}

impl CredentialStatus {
    pub fn secret(&self) -> Option<&SecureString> {
        match self {
            CredentialStatus::Configured(secret) => Some(secret),
            CredentialStatus::Unconfigured { .. } => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, CredentialStatus::Configured(_))
    }
}

/// Pick the configured value, falling back to `env_value`. Blank strings
/// count as missing.
pub fn resolve_value(configured: Option<&str>, env_value: Option<String>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| {
            env_value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}

fn resolve_secret(configured: Option<&str>, env_var: &str, field: &str) -> CredentialStatus {
    match resolve_value(configured, std::env::var(env_var).ok()) {
        Some(value) => CredentialStatus::Configured(SecureString::new(value)),
        None => CredentialStatus::Unconfigured {
            reason: format!("{field} is not set and {env_var} is empty"),
        },
    }
}

impl CloudConfig {
    /// Resolved on every call so env changes are picked up.
    pub fn resolve_url(&self) -> Option<String> {
        resolve_value(self.url.as_deref(), std::env::var(CLOUD_URL_ENV).ok())
            .map(|url| url.trim_end_matches('/').to_string())
    }

    pub fn resolve_key(&self) -> CredentialStatus {
        resolve_secret(self.anon_key.as_deref(), CLOUD_KEY_ENV, "cloud.anon_key")
    }
}

impl SpeechConfig {
    pub fn resolve_api_key(&self) -> CredentialStatus {
        resolve_secret(self.api_key.as_deref(), SPEECH_KEY_ENV, "speech.api_key")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn test_config_value_wins_over_env() {
        assert_eq!(
            resolve_value(Some("from-file"), Some("from-env".to_string())),
            Some("from-file".to_string())
        );
    }

    #[test]
    fn test_blank_config_falls_back_to_env() {
        assert_eq!(
            resolve_value(Some("  "), Some("from-env".to_string())),
            Some("from-env".to_string())
        );
        assert_eq!(resolve_value(None, Some(String::new())), None);
        assert_eq!(resolve_value(None, None), None);
    }

    #[test]
    fn test_configured_key_resolves() {
        let speech = SpeechConfig {
            api_key: Some("xi-123".to_string()),
            ..SpeechConfig::default()
        };
        let status = speech.resolve_api_key();
        assert!(status.is_configured());
        assert_eq!(status.secret().map(|s| s.expose()), Some("xi-123"));
    }
}
