// src/domain/risk.rs

use crate::domain::property::{coerce_number, coerce_text};
use serde_json::Value;

/// Shown when no hazard carries data.
pub const NO_RISK_LEVEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Earthquake,
    Landslide,
    Flood,
    Wildfire,
    Hurricane,
}

impl HazardKind {
    /// Precedence used to pick the headline hazard of a profile.
    pub const DOMINANCE_ORDER: [HazardKind; 5] = [
        HazardKind::Earthquake,
        HazardKind::Landslide,
        HazardKind::Wildfire,
        HazardKind::Hurricane,
        HazardKind::Flood,
    ];

    pub fn key(self) -> &'static str {
        match self {
            HazardKind::Earthquake => "earthquake",
            HazardKind::Landslide => "landslide",
            HazardKind::Flood => "flood",
            HazardKind::Wildfire => "wildfire",
            HazardKind::Hurricane => "hurricane",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HazardKind::Earthquake => "Earthquake",
            HazardKind::Landslide => "Landslide",
            HazardKind::Flood => "Flood",
            HazardKind::Wildfire => "Wildfire",
            HazardKind::Hurricane => "Hurricane",
        }
    }
}

/// Sub-score values arrive either as numbers or as preformatted text.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskValue {
    Number(f64),
    Text(String),
}

impl RiskValue {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => RiskValue::Number(n.as_f64().unwrap_or_default()),
            Some(Value::String(s)) => RiskValue::Text(s.clone()),
            _ => RiskValue::Text(String::new()),
        }
    }
}

impl std::fmt::Display for RiskValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskValue::Number(n) => write!(f, "{n}"),
            RiskValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskItem {
    pub code: String,
    pub description: String,
    pub value: RiskValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskDetail {
    /// Free-text severity such as "medium" or "low-moderate".
    pub level: String,
    pub score: f64,
    pub description: String,
    pub summary: String,
    pub items: Vec<RiskItem>,
}

impl RiskDetail {
    /// `None` for null, missing or non-object slots.
    fn from_value(value: Option<&Value>) -> Option<Self> {
        let obj = value?.as_object()?;

        let items = obj
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| RiskItem {
                        code: coerce_text(item.get("code")),
                        description: coerce_text(item.get("description")),
                        value: RiskValue::from_value(item.get("value")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(RiskDetail {
            level: coerce_text(obj.get("level")).trim().to_string(),
            score: coerce_number(obj.get("score")),
            description: coerce_text(obj.get("description")),
            summary: coerce_text(obj.get("summary")),
            items,
        })
    }
}

/// Per-hazard detail for one census tract. Slots are independent of each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvironmentalRiskProfile {
    pub earthquake: Option<RiskDetail>,
    pub landslide: Option<RiskDetail>,
    pub flood: Option<RiskDetail>,
    pub wildfire: Option<RiskDetail>,
    pub hurricane: Option<RiskDetail>,
    pub summary: String,
}

impl EnvironmentalRiskProfile {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        EnvironmentalRiskProfile {
            earthquake: RiskDetail::from_value(obj.get("earthquake")),
            landslide: RiskDetail::from_value(obj.get("landslide")),
            flood: RiskDetail::from_value(obj.get("flood")),
            wildfire: RiskDetail::from_value(obj.get("wildfire")),
            hurricane: RiskDetail::from_value(obj.get("hurricane")),
            summary: coerce_text(obj.get("summary")),
        }
    }

    pub fn hazard(&self, kind: HazardKind) -> Option<&RiskDetail> {
        match kind {
            HazardKind::Earthquake => self.earthquake.as_ref(),
            HazardKind::Landslide => self.landslide.as_ref(),
            HazardKind::Flood => self.flood.as_ref(),
            HazardKind::Wildfire => self.wildfire.as_ref(),
            HazardKind::Hurricane => self.hurricane.as_ref(),
        }
    }

    /// First present hazard in [`HazardKind::DOMINANCE_ORDER`]. Scores are not compared.
    pub fn dominant(&self) -> Option<(HazardKind, &RiskDetail)> {
        HazardKind::DOMINANCE_ORDER
            .iter()
            .find_map(|kind| self.hazard(*kind).map(|detail| (*kind, detail)))
    }

    /// Level of the dominant hazard, or [`NO_RISK_LEVEL`] when it has none.
    pub fn dominant_level(&self) -> &str {
        match self.dominant() {
            Some((_, detail)) if !detail.level.is_empty() => &detail.level,
            _ => NO_RISK_LEVEL,
        }
    }
}
