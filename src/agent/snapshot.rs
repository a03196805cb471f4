// src/agent/snapshot.rs

use serde_json::Value;

/// The three payload shapes the agent has been seen to emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapshotShape<'a> {
    /// A non-empty `properties` array. Authoritative.
    Structured(&'a [Value]),
    /// No usable array, but `outputs` holds text that may embed one.
    Narrative(&'a str),
    Empty,
}

/// A raw state snapshot after classification. Borrows from the raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub shape: SnapshotShape<'a>,
    /// `outputs` whenever it is a string, kept for the narrative fallback.
    pub outputs: Option<&'a str>,
    pub status: Option<&'a Value>,
}

/// Classifies a loosely-typed snapshot. Anything that is not a JSON object is `Empty`.
pub fn classify(raw: &Value) -> Snapshot<'_> {
    let Some(obj) = raw.as_object() else {
        return Snapshot {
            shape: SnapshotShape::Empty,
            outputs: None,
            status: None,
        };
    };

    let outputs = obj.get("outputs").and_then(Value::as_str);
    let status = obj.get("status").filter(|s| s.is_object());

    let shape = match obj.get("properties").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => SnapshotShape::Structured(entries),
        _ => match outputs {
            Some(text) if !text.trim().is_empty() => SnapshotShape::Narrative(text),
            _ => SnapshotShape::Empty,
        },
    };

    Snapshot {
        shape,
        outputs,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_wins_over_outputs() {
        let raw = json!({
            "properties": [{ "address": "1 Main St" }],
            "outputs": "\"properties\": [{\"address\": \"2 Side St\"}]"
        });

        let snapshot = classify(&raw);
        assert!(matches!(snapshot.shape, SnapshotShape::Structured(entries) if entries.len() == 1));
        assert!(snapshot.outputs.is_some());
    }

    #[test]
    fn empty_array_falls_back_to_outputs() {
        let raw = json!({ "properties": [], "outputs": "Here is what I found." });

        assert_eq!(
            classify(&raw).shape,
            SnapshotShape::Narrative("Here is what I found.")
        );
    }

    #[test]
    fn non_array_properties_are_ignored() {
        let raw = json!({ "properties": "1 Main St" });
        assert_eq!(classify(&raw).shape, SnapshotShape::Empty);
    }

    #[test]
    fn blank_outputs_and_non_objects_are_empty() {
        assert_eq!(classify(&json!({ "outputs": "   " })).shape, SnapshotShape::Empty);
        assert_eq!(classify(&json!([1, 2, 3])).shape, SnapshotShape::Empty);
        assert_eq!(classify(&json!(null)).outputs, None);
    }

    #[test]
    fn status_must_be_an_object() {
        assert!(classify(&json!({ "status": "searching" })).status.is_none());
        assert!(classify(&json!({ "status": { "state": "searching" } })).status.is_some());
    }
}
