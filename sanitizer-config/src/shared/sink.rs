use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// File the output document is written to when no path is configured.
pub const DEFAULT_SINK_PATH: &str = "transformed.json";

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_SINK_PATH)
}

/// Output file location. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl SinkConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptySinkPath);
        }

        Ok(())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
