// errors.rs
use thiserror::Error;

/// Errors raised while handling a request to the HTML host.
///
/// Search failures are not listed here: the search page renders them inline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::InternalError => 500,
        }
    }
}
