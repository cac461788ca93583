use tracing::{error, info};

use crate::error::SanitizerResult;
use crate::merge::{MergedUsers, fold_records};
use crate::output::build_document;
use crate::sink::Sink;
use crate::source::Source;

/// Counters describing a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Number of raw records returned by the source.
    pub fetched_records: usize,
    /// Number of deduplicated records in the written document.
    pub written_records: usize,
}

/// Fetches records from a [`Source`], deduplicates them and writes the document to a [`Sink`].
///
/// Each run is independent: the accumulator lives only for the duration of [`Pipeline::run`].
#[derive(Debug)]
pub struct Pipeline<S, K> {
    source: S,
    sink: K,
}

impl<S, K> Pipeline<S, K>
where
    S: Source,
    K: Sink,
{
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Runs the pipeline once.
    ///
    /// A failed fetch is logged and returned before anything reaches the sink.
    pub async fn run(&self) -> SanitizerResult<PipelineSummary> {
        info!(
            source = S::name(),
            sink = K::name(),
            "starting user sanitizer pipeline"
        );

        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(err) => {
                error!(
                    source = S::name(),
                    error = %err,
                    "failed to fetch user records, no output document will be written"
                );

                return Err(err);
            }
        };

        let merged = fold_records(MergedUsers::new(), &records);
        let summary = PipelineSummary {
            fetched_records: records.len(),
            written_records: merged.len(),
        };

        let document = build_document(merged)?;
        self.sink.write_document(document).await?;

        info!(
            fetched_records = summary.fetched_records,
            written_records = summary.written_records,
            "user sanitizer pipeline completed"
        );

        Ok(summary)
    }
}
