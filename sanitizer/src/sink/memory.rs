use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::SanitizerResult;
use crate::sink::base::Sink;

/// In-memory sink for testing and development purposes.
///
/// Every written document is kept, so tests can check both what was written and how many
/// times. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    documents: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all documents written so far, oldest first.
    pub async fn documents(&self) -> Vec<String> {
        self.documents.lock().await.clone()
    }

    /// Returns the most recently written document.
    pub async fn last_document(&self) -> Option<String> {
        self.documents.lock().await.last().cloned()
    }
}

impl Sink for MemorySink {
    fn name() -> &'static str {
        "memory"
    }

    async fn write_document(&self, document: String) -> SanitizerResult<()> {
        info!(bytes = document.len(), "writing output document to memory");
        self.documents.lock().await.push(document);

        Ok(())
    }
}
