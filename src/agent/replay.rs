// src/agent/replay.rs

use crate::agent::projector::action_label;
use crate::agent::session::{ActionEvent, ActionFilter, AgentHub, AgentSession, StateEvent};
use crate::domain::LifecycleSignal;
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// One line of a recorded event log.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayEvent {
    State {
        agent: String,
        #[serde(default)]
        state: Value,
        #[serde(default)]
        lifecycle: LifecycleSignal,
    },
    Action {
        name: String,
        #[serde(default)]
        arguments: Value,
        #[serde(default)]
        lifecycle: LifecycleSignal,
    },
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("could not open event log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read event log line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("could not write replay output: {0}")]
    Write(#[from] io::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub skipped: usize,
    /// Properties shown after the last state event.
    pub final_properties: usize,
}

pub fn replay_file<W: Write>(
    path: &Path,
    agent: &str,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    replay(BufReader::new(file), agent, out)
}

/// Publishes every event of a JSON-lines log through a fresh hub and writes
/// what an attached session would display after each one.
pub fn replay<R: BufRead, W: Write>(
    input: R,
    agent: &str,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    let hub = AgentHub::new();
    let session = AgentSession::attach(&hub, agent);

    let labels = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&labels);
    let search_agent = agent.to_string();
    let _actions = hub.subscribe_actions(ActionFilter::Any, move |event| {
        if let Some(label) = action_label(&event.name, &search_agent, event.lifecycle) {
            sink.borrow_mut().push(label);
        }
    });

    let mut summary = ReplaySummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ReplayError::Read {
            line: line_no,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let event: ReplayEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping undecodable replay event");
                summary.skipped += 1;
                continue;
            }
        };
        summary.events += 1;

        match event {
            ReplayEvent::State {
                agent: source,
                state,
                lifecycle,
            } => {
                let delivered = hub.publish_state(&StateEvent {
                    agent: source.clone(),
                    snapshot: state,
                    lifecycle,
                });
                if delivered == 0 {
                    tracing::debug!(agent = %source, "state event for an unwatched agent");
                    continue;
                }

                let view = session.view();
                writeln!(out, "[{}] {}", lifecycle.as_str(), view.status.headline)?;
                if let Some(detail) = &view.status.detail {
                    writeln!(out, "    {detail}")?;
                }
                for property in &view.state.properties {
                    writeln!(
                        out,
                        "  - {} ({}, risk: {})",
                        property.address,
                        property.formatted_price(),
                        property.environmental_risks.dominant_level().to_uppercase()
                    )?;
                }
                if view.state.properties.is_empty() {
                    if let Some(text) = view.state.narrative() {
                        writeln!(out, "    {}", text.trim())?;
                    }
                }
                summary.final_properties = view.state.property_count();
            }
            ReplayEvent::Action {
                name,
                arguments,
                lifecycle,
            } => {
                hub.publish_action(&ActionEvent {
                    name,
                    arguments,
                    lifecycle,
                });
                for label in labels.borrow_mut().drain(..) {
                    writeln!(out, "[action] {label}")?;
                }
            }
        }
    }

    tracing::info!(
        events = summary.events,
        skipped = summary.skipped,
        "replay finished"
    );
    Ok(summary)
}
