// src/agent/ingest.rs

use crate::agent::extract::extract_properties;
use crate::agent::snapshot::{classify, SnapshotShape};
use crate::domain::{PropertyRecord, StatusInfo};
use serde_json::Value;
use std::collections::HashMap;

/// Which path produced the property list of a [`ReconciledState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// Taken from a non-empty `properties` array.
    Structured,
    /// Recovered from text embedded in `outputs`.
    Recovered,
    /// `outputs` held text but nothing could be recovered from it.
    Narrative,
    #[default]
    Empty,
}

impl PayloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::Structured => "structured",
            PayloadKind::Recovered => "recovered",
            PayloadKind::Narrative => "narrative",
            PayloadKind::Empty => "empty",
        }
    }
}

/// Normalized view of one agent snapshot. Rebuilt from scratch on every update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconciledState {
    /// Arrival order, unique by non-empty address.
    pub properties: Vec<PropertyRecord>,
    /// Raw `outputs` text, verbatim.
    pub outputs: Option<String>,
    pub status: Option<StatusInfo>,
    pub kind: PayloadKind,
}

impl ReconciledState {
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Narrative text worth showing when no property could be rendered.
    pub fn narrative(&self) -> Option<&str> {
        self.outputs
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Converts one raw snapshot into a [`ReconciledState`]. Never fails.
pub fn ingest(raw: &Value) -> ReconciledState {
    let snapshot = classify(raw);

    let (properties, kind) = match snapshot.shape {
        SnapshotShape::Structured(entries) => {
            let records: Vec<_> = entries.iter().filter_map(PropertyRecord::from_value).collect();
            if records.len() < entries.len() {
                tracing::warn!(
                    skipped = entries.len() - records.len(),
                    "skipped non-object entries in agent properties"
                );
            }
            (records, PayloadKind::Structured)
        }
        SnapshotShape::Narrative(text) => match extract_properties(text) {
            Ok(records) => (records, PayloadKind::Recovered),
            Err(e) => {
                tracing::debug!(reason = %e, "no properties recovered from agent outputs");
                (Vec::new(), PayloadKind::Narrative)
            }
        },
        SnapshotShape::Empty => (Vec::new(), PayloadKind::Empty),
    };

    let properties = dedupe_by_address(properties);

    tracing::debug!(
        kind = kind.as_str(),
        properties = properties.len(),
        "ingested agent snapshot"
    );

    ReconciledState {
        properties,
        outputs: snapshot.outputs.map(str::to_string),
        status: snapshot.status.and_then(StatusInfo::from_value),
        kind,
    }
}

/// Collapses records sharing a non-empty address. The later record replaces the
/// earlier one in the earlier one's position. Records without an address are kept.
pub fn dedupe_by_address(records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
    let mut out: Vec<PropertyRecord> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if !record.has_address() {
            out.push(record);
            continue;
        }

        match index.get(&record.address) {
            Some(&pos) => out[pos] = record,
            None => {
                index.insert(record.address.clone(), out.len());
                out.push(record);
            }
        }
    }

    out
}
