use serde::{Deserialize, Serialize};

use crate::shared::{SinkConfig, SourceConfig, SourceConfigWithoutSecrets, ValidationError};

/// Complete configuration for the sanitizer runner.
///
/// This intentionally does not implement [`Serialize`] to avoid leaking the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source.validate()?;
        self.sink.validate()
    }
}

/// Same as [`RunnerConfig`] but safe to serialize and log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfigWithoutSecrets {
    pub source: SourceConfigWithoutSecrets,
    pub sink: SinkConfig,
}

impl From<RunnerConfig> for RunnerConfigWithoutSecrets {
    fn from(value: RunnerConfig) -> Self {
        RunnerConfigWithoutSecrets {
            source: value.source.into(),
            sink: value.sink,
        }
    }
}
