use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`source.url` cannot be empty")]
    EmptySourceUrl,
    /// Only plain HTTP(S) endpoints are supported.
    #[error("`source.url` must start with `http://` or `https://`, got `{0}`")]
    UnsupportedSourceUrl(String),
    #[error("`source.timeout_ms` cannot be zero")]
    SourceTimeoutZero,
    #[error("`sink.path` cannot be empty")]
    EmptySinkPath,
}
