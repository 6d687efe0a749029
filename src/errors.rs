use thiserror::Error;

/// Longest error text shown in an error box.
pub const MAX_ERROR_CHARS: usize = 4000;

const MISSING_PARAMS_EXAMPLE: &str =
    r#"{"region":"ap-northeast-1","resource_type":"cfn","filters":["AWS::Lambda::Function"]}"#;

/// Everything that can stop a run before a renderer produces output.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("HTTP {status}\n{}", truncate_chars(.message, MAX_ERROR_CHARS))]
    Http { status: u16, message: String },

    #[error(
        "The backend answered with a non-JSON body (check the API path and any proxy error routing)\n\n{}",
        truncate_chars(.body, MAX_ERROR_CHARS)
    )]
    NotJson { body: String },

    #[error("{0}")]
    Application(String),

    #[error("Could not extract a result from the response. Check the raw output; the tool may have answered in an unexpected format.")]
    ExtractionFailed,

    #[error("Missing required parameters: {}\nExample: {}", .0.join(", "), MISSING_PARAMS_EXAMPLE)]
    MissingParams(Vec<String>),

    #[error("Request failed: {0}")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request to {path} failed: {reason}")]
    Request { path: String, reason: String },
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        DispatchError::Transport(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    #[error("Clipboard is unavailable: {0}")]
    Unavailable(String),

    #[error("Copy failed (check clipboard permissions): {0}")]
    WriteFailed(String),
}

/// Cuts `text` to at most `max` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
