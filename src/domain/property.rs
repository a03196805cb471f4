// src/domain/property.rs

use crate::domain::risk::EnvironmentalRiskProfile;
use serde_json::{Map, Value};

/// A listing as the property card renders it.
///
/// Agent payloads are loosely typed, so every record goes through
/// [`PropertyRecord::from_value`]. That constructor is the anti-corruption layer
/// between whatever the agent emitted and the fields the templates rely on:
/// numbers are coerced, missing arrays become empty and missing hazards absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyRecord {
    /// Natural key when non-empty.
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: f64,

    // Listing agent contact
    pub agent: String,
    pub agent_phone: String,
    pub agent_email: String,

    pub tract_fips: String,
    pub environmental_risks: EnvironmentalRiskProfile,
    pub photos: Vec<String>,
}

impl PropertyRecord {
    /// Normalizes one entry of a `properties` array. Non-objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_object)
    }

    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let photos = obj
            .get("photos")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        PropertyRecord {
            address: coerce_text(obj.get("address")),
            price: coerce_number(obj.get("price")),
            bedrooms: coerce_count(obj.get("bedrooms")),
            bathrooms: coerce_count(obj.get("bathrooms")),
            sqft: coerce_number(obj.get("sqft")),
            agent: coerce_text(obj.get("agent")),
            agent_phone: coerce_text(obj.get("agent_phone")),
            agent_email: coerce_text(obj.get("agent_email")),
            tract_fips: coerce_text(obj.get("tract_fips")),
            environmental_risks: EnvironmentalRiskProfile::from_value(
                obj.get("environmental_risks"),
            ),
            photos,
        }
    }

    pub fn formatted_price(&self) -> String {
        format_usd(self.price)
    }

    /// Addresses are compared verbatim; only blank ones count as missing.
    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }

    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}

/// Whole-dollar US currency with thousands separators, e.g. `$1,250,000`.
pub fn format_usd(amount: f64) -> String {
    let digits = if amount.is_finite() && amount > 0.0 {
        format!("{:.0}", amount.round())
    } else {
        "0".to_string()
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Coerces a JSON number or numeric-looking string into a non-negative number.
/// Anything unparseable, negative or non-finite becomes `0.0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_text(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        _ => 0.0,
    }
}

/// Same as [`coerce_number`], truncated toward zero.
pub fn coerce_count(value: Option<&Value>) -> u32 {
    // `as` saturates at u32::MAX
    coerce_number(value).trunc() as u32
}

pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Accepts `"500000"`, `" 1,250,000 "`, `"$600,000.50"`.
pub fn parse_numeric_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
