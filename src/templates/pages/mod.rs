pub mod agent;
pub mod error;
pub mod search;

pub use agent::agent_panel;
pub use error::error_page;
pub use search::{search_page, SearchOutcome, SearchVm};
