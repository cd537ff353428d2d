//! Cell values and reference objects

use serde::Deserialize;
use serde::Serialize;

/// A reference to a person or tag, as stored in PEOPLE and TAGS cells.
///
/// People records historically used `name` for the display label, so it is
/// accepted as an alias when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Reference {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Up to two upper-cased initials taken from the label's words.
    pub fn initials(&self) -> String {
        self.label
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// A dynamic value held in one item's cell.
///
/// The shape depends on the column type, but the model does not enforce it:
/// a value written under one type must survive the column being retyped, and
/// renderers treat shapes they do not understand as empty.
///
/// | Column type       | Expected variant |
/// |-------------------|------------------|
/// | TEXT, STATUS      | `Text`           |
/// | NUMBER            | `Number`         |
/// | CHECKBOX          | `Bool`           |
/// | DATE              | `Text` (ISO date, datetime or `Q1`..`Q4`) |
/// | PEOPLE, TAGS      | `Refs`           |
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Refs(Vec<Reference>),
    /// Fallback for JSON shapes none of the above accept.
    Json(serde_json::Value),
}

/// Shared null used when an item has no value for a column.
pub static NULL_VALUE: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns `true` for null, empty text and empty reference lists.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Refs(refs) => refs.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The reference list, or an empty slice for any other shape.
    pub fn as_refs(&self) -> &[Reference] {
        match self {
            CellValue::Refs(refs) => refs,
            _ => &[],
        }
    }

    /// Renders the raw value as plain text.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Refs(refs) => refs
                .iter()
                .map(|r| r.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            CellValue::Json(json) => json.to_string(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Refs(_) => "refs",
            CellValue::Json(_) => "json",
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Number(f64::from(v))
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<Vec<Reference>> for CellValue {
    fn from(v: Vec<Reference>) -> Self {
        CellValue::Refs(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_shapes() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 500, "Done", [{"id": "1", "name": "Alice Malice"}], {"x": 1}]"#)
                .unwrap();

        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Bool(true));
        assert_eq!(values[2], CellValue::Number(500.0));
        assert_eq!(values[3], CellValue::from("Done"));
        assert_eq!(values[4].as_refs()[0].label, "Alice Malice");
        assert_eq!(values[5].type_name(), "json");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::from(500).display_text(), "500");
        assert_eq!(CellValue::from(12.5).display_text(), "12.5");
        assert_eq!(CellValue::Null.display_text(), "");
        let refs = CellValue::from(vec![Reference::new("1", "Urgent"), Reference::new("5", "Bug")]);
        assert_eq!(refs.display_text(), "Urgent, Bug");
    }

    #[test]
    fn test_initials() {
        assert_eq!(Reference::new("1", "alice malice").initials(), "AM");
        assert_eq!(Reference::new("2", "Grace Brewster Hopper").initials(), "GB");
        assert_eq!(Reference::new("3", "").initials(), "");
    }

    #[test]
    fn test_non_refs_read_as_empty() {
        assert!(CellValue::from("not a list").as_refs().is_empty());
        assert!(CellValue::Null.is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }
}
