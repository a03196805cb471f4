mod client;
mod search_error;

pub use client::{PropertySearch, SearchClient};
pub use search_error::SearchError;
