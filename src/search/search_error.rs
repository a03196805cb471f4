use thiserror::Error;

/// Failures of the one-shot property query. `Display` is shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Network response was not ok. Status: {status}. Message: {body}")]
    Http { status: u16, body: String },

    #[error("Could not read search response: {0}")]
    Decode(String),

    #[error("Search client misconfigured: {0}")]
    Config(String),
}
