use std::future::Future;

use crate::error::SanitizerResult;

/// Trait for systems that persist the rendered output document.
///
/// [`Sink::write_document`] is called at most once per run, and only after every record has been
/// processed, so a sink never observes a partial document. Writing should replace whatever the
/// sink held from a previous run.
pub trait Sink {
    /// Returns the name of the sink.
    fn name() -> &'static str;

    /// Persists the rendered document.
    fn write_document(&self, document: String) -> impl Future<Output = SanitizerResult<()>> + Send;
}
