// src/domain/status.rs

use crate::domain::property::parse_numeric_text;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_STATE: &str = "initialized";
pub const DEFAULT_MESSAGE: &str = "Processing...";

/// Coarse run status that accompanies every state or action event.
///
/// Decoding is total. The agent runtime's own vocabulary (`inProgress`,
/// `executing`, `complete`, `failed`) is folded into the four variants, and
/// anything unrecognised is treated as `Idle` so the projector falls through to
/// the agent's own status object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum LifecycleSignal {
    Pending,
    Success,
    Error,
    #[default]
    Idle,
}

impl LifecycleSignal {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pending" | "inprogress" | "in_progress" | "executing" => LifecycleSignal::Pending,
            "success" | "complete" | "completed" => LifecycleSignal::Success,
            "error" | "failed" => LifecycleSignal::Error,
            _ => LifecycleSignal::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleSignal::Pending => "pending",
            LifecycleSignal::Success => "success",
            LifecycleSignal::Error => "error",
            LifecycleSignal::Idle => "idle",
        }
    }
}

impl From<Option<String>> for LifecycleSignal {
    fn from(label: Option<String>) -> Self {
        label.as_deref().map(Self::from_label).unwrap_or_default()
    }
}

/// The agent's self-reported progress, carried through ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub state: String,
    pub message: String,
    /// Percent complete, clamped to 0..=100.
    pub progress: Option<u8>,
    pub current_task: Option<String>,
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            state: DEFAULT_STATE.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            progress: None,
            current_task: None,
        }
    }
}

impl StatusInfo {
    /// `None` unless `value` is an object; missing fields take their defaults.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let progress = match obj.get("progress") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_numeric_text(s.trim_end_matches('%')),
            _ => None,
        }
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 100.0).round() as u8);

        Some(StatusInfo {
            state: text("state").unwrap_or_else(|| DEFAULT_STATE.to_string()),
            message: text("message").unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            progress,
            current_task: text("current_task"),
        })
    }
}
