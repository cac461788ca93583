use std::future::Future;

use crate::error::{ErrorKind, SanitizerError, SanitizerResult};
use crate::sanitizer_error;
use crate::types::RawRecord;

/// Message used when a failed fetch carries no message of its own.
pub const DEFAULT_FETCH_ERROR_MESSAGE: &str = "unable to fetch user records";

/// Trait for systems that supply the raw user records of a run.
///
/// A source is queried exactly once per run. Implementations must not retry on their own: a
/// failed fetch is terminal and is reported by the pipeline.
pub trait Source {
    /// Returns the name of the source.
    fn name() -> &'static str;

    /// Fetches every raw record, in source order.
    fn fetch_records(&self) -> impl Future<Output = SanitizerResult<Vec<RawRecord>>> + Send;
}

/// Builds the error returned when records could not be fetched.
///
/// `message` is usually extracted from the error payload of the remote system; when absent,
/// [`DEFAULT_FETCH_ERROR_MESSAGE`] is used as detail.
#[track_caller]
pub fn fetch_error(kind: ErrorKind, message: Option<String>) -> SanitizerError {
    sanitizer_error!(
        kind,
        "Failed to fetch user records",
        detail = message.unwrap_or_else(|| DEFAULT_FETCH_ERROR_MESSAGE.to_owned())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_uses_given_message() {
        let err = fetch_error(ErrorKind::AuthenticationError, Some("Invalid token".to_owned()));

        assert_eq!(err.kind(), ErrorKind::AuthenticationError);
        assert_eq!(err.detail(), Some("Invalid token"));
    }

    #[test]
    fn fetch_error_falls_back_to_default_message() {
        let err = fetch_error(ErrorKind::SourceRequestFailed, None);

        assert_eq!(err.detail(), Some(DEFAULT_FETCH_ERROR_MESSAGE));
    }
}
