//! Agent-state reconciliation: snapshot classification, recovery extraction,
//! ingest, status projection and the subscription hub that drives them.

pub mod extract;
pub mod ingest;
pub mod projector;
pub mod replay;
pub mod session;
pub mod snapshot;

pub use ingest::{ingest, ReconciledState};
pub use projector::{project_state, StatusLine};
