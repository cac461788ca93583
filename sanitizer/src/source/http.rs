use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bail;
use crate::error::{ErrorKind, SanitizerResult};
use crate::sanitizer_error;
use crate::source::base::{Source, fetch_error};
use crate::types::RawRecord;

/// Keys checked, in order, for a human readable message in an error payload.
const ERROR_MESSAGE_KEYS: &[&str] = &["message", "error"];

/// Source fetching user records from a JSON HTTP API.
///
/// Issues a single `GET` request, optionally authenticated with a bearer token, and expects a
/// JSON array of objects in the response body.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    bearer_token: Option<SecretString>,
}

impl HttpSource {
    /// Creates a new HTTP source.
    ///
    /// `timeout` bounds the whole request, including reading the body.
    pub fn new(
        url: impl Into<String>,
        bearer_token: Option<SecretString>,
        timeout: Duration,
    ) -> SanitizerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                sanitizer_error!(
                    ErrorKind::ConfigError,
                    "Failed to build HTTP client",
                    err.to_string(),
                    source: err
                )
            })?;

        Ok(Self {
            client,
            url: url.into(),
            bearer_token,
        })
    }
}

impl Source for HttpSource {
    fn name() -> &'static str {
        "http"
    }

    async fn fetch_records(&self) -> SanitizerResult<Vec<RawRecord>> {
        info!(url = %self.url, "fetching user records");

        let mut request = self.client.get(&self.url);
        if let Some(bearer_token) = &self.bearer_token {
            request = request.bearer_auth(bearer_token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);

            warn!(
                url = %self.url,
                %status,
                message = message.as_deref().unwrap_or_default(),
                "user records request was rejected"
            );

            let kind = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::AuthenticationError,
                _ => ErrorKind::SourceRequestFailed,
            };

            return Err(fetch_error(kind, message));
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body).map_err(|err| {
            sanitizer_error!(
                ErrorKind::SourceInvalidPayload,
                "User records payload is not valid JSON",
                err.to_string(),
                source: err
            )
        })?;

        let entries = match payload {
            Value::Array(entries) => entries,
            other => bail!(
                ErrorKind::SourceInvalidPayload,
                "User records payload is not a JSON array",
                format!("received: {}", json_type_name(&other))
            ),
        };

        let records = object_records(entries);
        info!(record_count = records.len(), "fetched user records");

        Ok(records)
    }
}

/// Keeps the object entries of the payload; anything else cannot describe a user.
fn object_records(entries: Vec<Value>) -> Vec<RawRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(fields) => Some(RawRecord::from(fields)),
            other => {
                debug!(
                    index,
                    entry_type = json_type_name(&other),
                    "skipping non-object user record"
                );
                None
            }
        })
        .collect()
}

/// Extracts a message from a JSON error payload such as `{"message": "Invalid token"}`.
fn extract_error_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;

    ERROR_MESSAGE_KEYS
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
