use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One category of records served by the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    People,
    Planets,
    Starships,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::People, Self::Planets, Self::Starships];

    /// Path segment used both in archive collection URLs and in view
    /// routing (`/people`, `/planets`, `/starships`).
    pub fn route_segment(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Planets => "planets",
            Self::Starships => "starships",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Planets => "Planets",
            Self::Starships => "Starships",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        let segment = segment.trim().trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|kind| kind.route_segment().eq_ignore_ascii_case(segment))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Archive records are open mappings; the field set varies per resource
/// kind and is not validated client-side.
pub type Record = Map<String, Value>;

/// Display text for a record field. Missing and null fields render blank.
pub fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric view of a record field, if it has one.
///
/// The archive serves most numbers as strings, sometimes with thousands
/// separators and often as placeholders like "unknown". Values with no
/// numeric reading are excluded by numeric filters and ordered after
/// valued rows by ascending numeric sorts.
pub fn field_number(record: &Record, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Lenient numeric parse: trims whitespace, drops thousands separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
