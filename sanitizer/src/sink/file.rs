use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ErrorKind, SanitizerResult};
use crate::output::parse_document;
use crate::sanitizer_error;
use crate::sink::base::Sink;
use crate::types::OutputRecord;

/// Sink writing the output document to a file, truncating any previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back the document previously written to the file.
    pub async fn load(&self) -> SanitizerResult<Vec<OutputRecord>> {
        let document = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            sanitizer_error!(
                ErrorKind::DestinationIoError,
                "Failed to read output document",
                self.path.display(),
                source: err
            )
        })?;

        parse_document(&document)
    }
}

impl Sink for FileSink {
    fn name() -> &'static str {
        "file"
    }

    async fn write_document(&self, document: String) -> SanitizerResult<()> {
        tokio::fs::write(&self.path, document.as_bytes())
            .await
            .map_err(|err| {
                sanitizer_error!(
                    ErrorKind::DestinationIoError,
                    "Failed to write output document",
                    self.path.display(),
                    source: err
                )
            })?;

        info!(
            path = %self.path.display(),
            bytes = document.len(),
            "wrote output document"
        );

        Ok(())
    }
}
