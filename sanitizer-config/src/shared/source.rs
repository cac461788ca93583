use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Default request timeout for the users endpoint.
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 30_000;

const SUPPORTED_URL_SCHEMES: &[&str] = &["http://", "https://"];

fn default_timeout_ms() -> u64 {
    DEFAULT_SOURCE_TIMEOUT_MS
}

/// Remote users endpoint the records are fetched from.
///
/// Does not implement [`Serialize`] since it holds the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    #[serde(default)]
    pub bearer_token: Option<SecretString>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptySourceUrl);
        }

        let lowercase = url.to_ascii_lowercase();
        if !SUPPORTED_URL_SCHEMES
            .iter()
            .any(|scheme| lowercase.starts_with(scheme))
        {
            return Err(ValidationError::UnsupportedSourceUrl(url.to_owned()));
        }

        if self.timeout_ms == 0 {
            return Err(ValidationError::SourceTimeoutZero);
        }

        Ok(())
    }
}

/// Same as [`SourceConfig`] but without the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfigWithoutSecrets {
    pub url: String,
    pub timeout_ms: u64,
}

impl From<SourceConfig> for SourceConfigWithoutSecrets {
    fn from(value: SourceConfig) -> Self {
        SourceConfigWithoutSecrets {
            url: value.url,
            timeout_ms: value.timeout_ms,
        }
    }
}
