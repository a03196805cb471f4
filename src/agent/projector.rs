// src/agent/projector.rs

use crate::agent::ingest::ReconciledState;
use crate::domain::status::{StatusInfo, DEFAULT_MESSAGE, DEFAULT_STATE};
use crate::domain::LifecycleSignal;

pub const SEARCHING: &str = "Searching for properties...";
pub const FOUND_SOME: &str = "Found properties matching your criteria";
pub const SEARCH_FAILED: &str = "Error finding properties";
pub const UNKNOWN_STATE: &str = "Processing your request...";

/// What the status banner shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Never empty.
    pub headline: String,
    pub detail: Option<String>,
}

/// Projects a reconciled state under the given lifecycle signal.
pub fn project_state(state: &ReconciledState, lifecycle: LifecycleSignal) -> StatusLine {
    project(state.status.as_ref(), lifecycle, state.property_count())
}

/// The lifecycle signal wins; `Idle` falls through to the agent's own state tag.
pub fn project(
    status: Option<&StatusInfo>,
    lifecycle: LifecycleSignal,
    property_count: usize,
) -> StatusLine {
    let headline = match lifecycle {
        LifecycleSignal::Pending => SEARCHING.to_string(),
        LifecycleSignal::Success if property_count > 0 => {
            format!("Found {property_count} properties matching your criteria")
        }
        LifecycleSignal::Success => FOUND_SOME.to_string(),
        LifecycleSignal::Error => SEARCH_FAILED.to_string(),
        LifecycleSignal::Idle => {
            let state = status.map_or(DEFAULT_STATE, |s| s.state.as_str());
            state_sentence(state).to_string()
        }
    };

    StatusLine {
        headline,
        detail: detail_line(status),
    }
}

/// Canned sentence for the agent's state tag. Total over all inputs.
pub fn state_sentence(state: &str) -> &'static str {
    match state.trim().to_ascii_lowercase().as_str() {
        "initialized" => "Getting ready to search...",
        "searching" => SEARCHING,
        "analyzing" => "Analyzing environmental risks for each property...",
        "formatting" => "Preparing your results...",
        "complete" => "Search complete",
        "error" => "Something went wrong while searching",
        _ => UNKNOWN_STATE,
    }
}

fn detail_line(status: Option<&StatusInfo>) -> Option<String> {
    let status = status?;

    let base = status.current_task.clone().or_else(|| {
        let message = status.message.trim();
        (!message.is_empty() && message != DEFAULT_MESSAGE).then(|| message.to_string())
    });

    match (base, status.progress) {
        (Some(base), Some(progress)) => Some(format!("{base} ({progress}%)")),
        (Some(base), None) => Some(base),
        (None, Some(progress)) => Some(format!("{progress}% complete")),
        (None, None) => None,
    }
}

/// Label for an action/tool-call event. `None` when there is nothing to show.
pub fn action_label(name: &str, search_agent: &str, lifecycle: LifecycleSignal) -> Option<String> {
    let is_search = name == search_agent;

    match lifecycle {
        LifecycleSignal::Pending if is_search => Some(SEARCHING.to_string()),
        LifecycleSignal::Pending => Some(format!("Running {name}...")),
        LifecycleSignal::Success if is_search => Some(FOUND_SOME.to_string()),
        LifecycleSignal::Success => Some(format!("{name} finished")),
        LifecycleSignal::Error => Some("Search failed. Please try again.".to_string()),
        LifecycleSignal::Idle => None,
    }
}
