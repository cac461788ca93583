use tracing::info;

use crate::error::{SanitizerError, SanitizerResult};
use crate::source::base::Source;
use crate::types::RawRecord;

/// In-memory source for testing and development purposes.
///
/// Returns a fixed set of records, or a fixed error, every time it is fetched.
#[derive(Debug, Clone)]
pub struct MemorySource {
    outcome: Result<Vec<RawRecord>, SanitizerError>,
}

impl MemorySource {
    /// Creates a source that yields `records`.
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            outcome: Ok(records),
        }
    }

    /// Creates a source whose fetch always fails with `error`.
    pub fn failing(error: SanitizerError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl Source for MemorySource {
    fn name() -> &'static str {
        "memory"
    }

    async fn fetch_records(&self) -> SanitizerResult<Vec<RawRecord>> {
        if let Ok(records) = &self.outcome {
            info!(record_count = records.len(), "fetching in-memory user records");
        }

        self.outcome.clone()
    }
}
