// src/agent/extract.rs

//! Recovery parser for property lists embedded in free-text agent output.
//!
//! This is not a JSON parser. It understands a small grammar subset:
//!
//! * a `"properties"` key (double or single quoted) followed by `:` and `[`,
//! * a bracket-balanced array after it, where brackets inside quoted strings
//!   and escaped quotes are ignored,
//! * top-level `{ ... }` objects inside that array, each either valid JSON or
//!   scanned for known `key: value` pairs.
//!
//! Results are lossy and untyped: anything the scan cannot see is dropped, and
//! records without an address are discarded because nothing identifies them.

use crate::domain::PropertyRecord;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

static PROPERTIES_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']properties["']\s*:\s*\["#).expect("properties key regex is valid")
});

static TEXT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"["'](address|agent_phone|agent_email|tract_fips|agent)["']\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#,
    )
    .expect("text field regex is valid")
});

static NUMBER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](price|bedrooms|bathrooms|sqft)["']\s*:\s*["']?(\$?[0-9][0-9,]*(?:\.[0-9]+)?)"#)
        .expect("number field regex is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no \"properties\" array found")]
    NoPropertiesKey,

    #[error("\"properties\" array starting at byte {offset} is never closed")]
    Unterminated { offset: usize },

    #[error("\"properties\" array held no record with an address")]
    NoRecords,
}

/// Recovers the property list embedded in `outputs`.
pub fn extract_properties(outputs: &str) -> Result<Vec<PropertyRecord>, ExtractError> {
    // Strict path: the whole payload is a JSON document.
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(outputs.trim()) {
        if let Some(entries) = obj.get("properties").and_then(Value::as_array) {
            let records = entries.iter().filter_map(PropertyRecord::from_value).collect();
            return with_addresses(records);
        }
    }

    match scan(outputs) {
        Err(ExtractError::NoPropertiesKey) if outputs.contains("\\\"") => {
            // Double-encoded JSON, e.g. `{\"properties\": [...]}`.
            scan(&outputs.replace("\\\"", "\""))
        }
        other => other,
    }
}

fn scan(text: &str) -> Result<Vec<PropertyRecord>, ExtractError> {
    let mut last_err = ExtractError::NoPropertiesKey;

    for key in PROPERTIES_KEY.find_iter(text) {
        let open = key.end() - 1;
        match find_array_end(text, open) {
            Some(close) => {
                let records = top_level_objects(&text[open + 1..close])
                    .into_iter()
                    .filter_map(recover_object)
                    .collect();
                // An empty region (e.g. an initial `[]`) defers to later keys.
                match with_addresses(records) {
                    Ok(records) => return Ok(records),
                    Err(e) => last_err = e,
                }
            }
            None => last_err = ExtractError::Unterminated { offset: open },
        }
    }

    Err(last_err)
}

fn with_addresses(records: Vec<PropertyRecord>) -> Result<Vec<PropertyRecord>, ExtractError> {
    let records: Vec<_> = records
        .into_iter()
        .filter(PropertyRecord::has_address)
        .collect();

    if records.is_empty() {
        Err(ExtractError::NoRecords)
    } else {
        Ok(records)
    }
}

/// Parses one object as JSON, falling back to a key/value scan.
fn recover_object(text: &str) -> Option<PropertyRecord> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return PropertyRecord::from_value(&value);
    }

    let mut fields = Map::new();

    for caps in TEXT_FIELD.captures_iter(text) {
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        fields
            .entry(caps[1].to_string())
            .or_insert_with(|| Value::String(unescape(raw)));
    }

    for caps in NUMBER_FIELD.captures_iter(text) {
        fields
            .entry(caps[1].to_string())
            .or_insert_with(|| Value::String(caps[2].to_string()));
    }

    if fields.is_empty() {
        return None;
    }
    Some(PropertyRecord::from_object(&fields))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Byte offset of the `]` matching the `[` at `open`, or `None` if the region
/// is unterminated or its brackets are mismatched.
fn find_array_end(text: &str, open: usize) -> Option<usize> {
    let mut stack = Vec::new();

    for (i, b) in Structural::new(&text[open..]) {
        match b {
            b'[' | b'{' => stack.push(b),
            _ => {
                let opener = stack.pop()?;
                let matched = matches!((opener, b), (b'[', b']') | (b'{', b'}'));
                if !matched {
                    return None;
                }
                if stack.is_empty() {
                    return Some(open + i);
                }
            }
        }
    }

    None
}

/// Splits the inside of a balanced array into its top-level `{ ... }` slices.
fn top_level_objects(inner: &str) -> Vec<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut objects = Vec::new();

    for (i, b) in Structural::new(inner) {
        match b {
            b'{' | b'[' => {
                if depth == 0 && b == b'{' {
                    start = Some(i);
                }
                depth += 1;
            }
            _ => {
                depth = depth.saturating_sub(1);
                if depth == 0 && b == b'}' {
                    if let Some(s) = start.take() {
                        objects.push(&inner[s..=i]);
                    }
                }
            }
        }
    }

    objects
}

/// Brackets and braces outside quoted strings, with their byte offsets.
struct Structural<'a> {
    bytes: &'a [u8],
    pos: usize,
    quote: Option<u8>,
    escaped: bool,
}

impl<'a> Structural<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            quote: None,
            escaped: false,
        }
    }
}

impl Iterator for Structural<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let i = self.pos;
            let b = self.bytes[i];
            self.pos += 1;

            if let Some(q) = self.quote {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == q {
                    self.quote = None;
                }
                continue;
            }

            match b {
                b'"' | b'\'' => self.quote = Some(b),
                b'[' | b']' | b'{' | b'}' => return Some((i, b)),
                _ => {}
            }
        }
        None
    }
}
