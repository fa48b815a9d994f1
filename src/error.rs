//! Error types for lookups and startup configuration.

use thiserror::Error;

/// Failure while talking to the dictionary API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Host resolution or TCP connect failed.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The exchange did not finish within the request timeout.
    #[error("Request timed out ({0}s)")]
    Timeout(u64),

    /// The server answered with a non-2xx status.
    #[error("Dictionary API returned HTTP {0}")]
    Status(u16),

    /// Any other failure while sending, including the TLS handshake.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be read to the end.
    #[error("Error reading body: {0}")]
    Body(String),
}

/// The response was not shaped like a dictionary answer at the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Response is not valid JSON: {0}")]
    Json(String),

    #[error("Expected a JSON array at the root, found {0}")]
    NotArray(&'static str),

    #[error("Expected entries or suggestions, found {0} as first element")]
    UnexpectedElement(&'static str),

    /// A suggestion list contained something other than a string.
    #[error("Suggestion at index {index} is {found}, not a string")]
    MixedSuggestions { index: usize, found: &'static str },
}

/// Why a single entry or sense was skipped. Never reaches the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("{context} is {found}, expected {expected}")]
    WrongType {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("sense has no `text` item in `dt`")]
    MissingText,

    #[error("malformed {0} tuple")]
    MalformedTuple(&'static str),
}

/// Anything that ends a lookup without definitions or suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The background worker died before producing an outcome.
    #[error("Lookup worker failed: {0}")]
    Worker(String),
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set; get a key at https://dictionaryapi.com/")]
    MissingApiKey(&'static str),

    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// Human name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
