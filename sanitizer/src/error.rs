//! Error types and result definitions for the sanitizer pipeline.
//!
//! The core only fails at its edges: fetching records from the source, serializing the output
//! document and handing it to the sink. Malformed records are never errors, they are filtered
//! out by the user model. [`SanitizerError`] carries a classified [`ErrorKind`], a static
//! description, optional dynamic detail and the callsite where it was raised.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for sanitizer operations using [`SanitizerError`] as the error type.
pub type SanitizerResult<T> = Result<T, SanitizerError>;

/// Main error type for sanitizer operations.
///
/// Cloning is cheap: the source error and the backtrace are shared.
#[derive(Debug, Clone)]
pub struct SanitizerError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
    backtrace: Arc<Backtrace>,
}

/// Categories of failures that can stop a sanitizer run.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Source Errors
    SourceConnectionFailed,
    SourceRequestFailed,
    SourceTimeout,
    AuthenticationError,
    SourceInvalidPayload,

    // Data Errors
    SerializationError,
    DeserializationError,

    // IO Errors
    IoError,
    DestinationIoError,

    // Configuration Errors
    ConfigError,
}

impl ErrorKind {
    /// Returns `true` when the error was raised while fetching records from the source.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::SourceConnectionFailed
                | ErrorKind::SourceRequestFailed
                | ErrorKind::SourceTimeout
                | ErrorKind::AuthenticationError
                | ErrorKind::SourceInvalidPayload
        )
    }
}

impl SanitizerError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the static description of this error.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dynamic detail if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the captured backtrace for this error.
    pub fn backtrace(&self) -> &Backtrace {
        self.backtrace.as_ref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches an originating [`error::Error`] and returns the modified instance.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        SanitizerError {
            kind,
            description,
            detail,
            source,
            location: Location::caller(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }
}

impl PartialEq for SanitizerError {
    fn eq(&self, other: &SanitizerError) -> bool {
        self.kind == other.kind && self.description == other.description
    }
}

impl fmt::Display for SanitizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        if let Some(detail) = self.detail.as_deref() {
            if detail.trim().is_empty() {
                write!(f, "\n  Detail: <empty>")?;
            } else {
                write!(f, "\n  Detail:")?;
                for line in detail.lines() {
                    write!(f, "\n    {line}")?;
                }
            }
        }

        Ok(())
    }
}

impl error::Error for SanitizerError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn error::Error + 'static))
    }
}

/// Creates a [`SanitizerError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for SanitizerError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> SanitizerError {
        SanitizerError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

/// Creates a [`SanitizerError`] from an error kind, static description, and dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for SanitizerError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> SanitizerError {
        SanitizerError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Converts [`std::io::Error`] to [`SanitizerError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for SanitizerError {
    #[track_caller]
    fn from(err: std::io::Error) -> SanitizerError {
        let detail = err.to_string();
        SanitizerError::from_components(
            ErrorKind::IoError,
            Cow::Borrowed("I/O operation failed"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`serde_json::Error`] to [`SanitizerError`].
///
/// Syntax, data and EOF failures map to [`ErrorKind::DeserializationError`] since the crate only
/// parses JSON produced elsewhere (the source payload or a previously written document).
impl From<serde_json::Error> for SanitizerError {
    #[track_caller]
    fn from(err: serde_json::Error) -> SanitizerError {
        let (kind, description) = match err.classify() {
            serde_json::error::Category::Io => (ErrorKind::IoError, "JSON I/O operation failed"),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => (
                ErrorKind::DeserializationError,
                "JSON deserialization failed",
            ),
        };

        let detail = err.to_string();
        SanitizerError::from_components(
            kind,
            Cow::Borrowed(description),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`reqwest::Error`] to [`SanitizerError`] based on where the request failed.
impl From<reqwest::Error> for SanitizerError {
    #[track_caller]
    fn from(err: reqwest::Error) -> SanitizerError {
        let (kind, description) = if err.is_timeout() {
            (ErrorKind::SourceTimeout, "HTTP request timed out")
        } else if err.is_connect() {
            (ErrorKind::SourceConnectionFailed, "HTTP connection failed")
        } else if err.is_decode() {
            (
                ErrorKind::DeserializationError,
                "HTTP response body could not be decoded",
            )
        } else if err.is_builder() {
            (ErrorKind::ConfigError, "HTTP request could not be built")
        } else {
            (ErrorKind::SourceRequestFailed, "HTTP request failed")
        };

        let detail = err.to_string();
        SanitizerError::from_components(
            kind,
            Cow::Borrowed(description),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bail, sanitizer_error};

    fn failing_operation() -> SanitizerResult<()> {
        bail!(
            ErrorKind::SourceRequestFailed,
            "Failed to fetch user records",
            "boom"
        );
    }

    #[test]
    fn test_bail_returns_error_with_detail() {
        let err = failing_operation().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceRequestFailed);
        assert_eq!(err.description(), "Failed to fetch user records");
        assert_eq!(err.detail(), Some("boom"));
        assert!(err.location().file().ends_with("error.rs"));
    }

    #[test]
    fn test_equality_ignores_detail_and_location() {
        let err1 = sanitizer_error!(ErrorKind::IoError, "Write failed", "a.json");
        let err2 = sanitizer_error!(ErrorKind::IoError, "Write failed", "b.json");
        let err3 = sanitizer_error!(ErrorKind::DestinationIoError, "Write failed");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_display_includes_kind_and_detail() {
        let err = sanitizer_error!(
            ErrorKind::AuthenticationError,
            "Failed to fetch user records",
            "Invalid token"
        );

        let rendered = err.to_string();
        assert!(rendered.starts_with("[AuthenticationError] Failed to fetch user records @ "));
        assert!(rendered.contains("Detail:\n    Invalid token"));
    }

    #[test]
    fn test_with_source_is_exposed() {
        let io_err = std::io::Error::other("disk full");
        let err = sanitizer_error!(ErrorKind::DestinationIoError, "Write failed", source: io_err);

        let source = error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "disk full");
    }

    #[test]
    fn test_serde_json_errors_are_deserialization_errors() {
        let err: SanitizerError = serde_json::from_str::<Vec<u8>>("{not json")
            .unwrap_err()
            .into();

        assert_eq!(err.kind(), ErrorKind::DeserializationError);
        assert!(err.detail().is_some());
    }

    #[test]
    fn test_fetch_error_classification() {
        assert!(ErrorKind::SourceRequestFailed.is_fetch_error());
        assert!(ErrorKind::AuthenticationError.is_fetch_error());
        assert!(ErrorKind::SourceInvalidPayload.is_fetch_error());
        assert!(!ErrorKind::DestinationIoError.is_fetch_error());
        assert!(!ErrorKind::DeserializationError.is_fetch_error());
    }
}
