//! Column definitions and cell types

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The declared kind of a column.
///
/// Types are declared as upper-case strings in board data. Names outside the
/// fixed set are kept as [`CellType::Unknown`] instead of failing the load;
/// the grid renders them with the text fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellType {
    Text,
    Number,
    Checkbox,
    Status,
    Date,
    People,
    Tags,
    Unknown(String),
}

impl CellType {
    /// Number of known cell types.
    pub const COUNT: usize = 7;

    /// All known cell types, in registry order.
    pub const KNOWN: [CellType; Self::COUNT] = [
        CellType::Text,
        CellType::Number,
        CellType::Checkbox,
        CellType::Status,
        CellType::Date,
        CellType::People,
        CellType::Tags,
    ];

    /// Position of a known type in [`CellType::KNOWN`].
    pub fn index(&self) -> Option<usize> {
        match self {
            CellType::Text => Some(0),
            CellType::Number => Some(1),
            CellType::Checkbox => Some(2),
            CellType::Status => Some(3),
            CellType::Date => Some(4),
            CellType::People => Some(5),
            CellType::Tags => Some(6),
            CellType::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CellType::Text => "TEXT",
            CellType::Number => "NUMBER",
            CellType::Checkbox => "CHECKBOX",
            CellType::Status => "STATUS",
            CellType::Date => "DATE",
            CellType::People => "PEOPLE",
            CellType::Tags => "TAGS",
            CellType::Unknown(name) => name,
        }
    }
}

impl From<&str> for CellType {
    fn from(name: &str) -> Self {
        match name {
            "TEXT" => CellType::Text,
            "NUMBER" => CellType::Number,
            "CHECKBOX" => CellType::Checkbox,
            "STATUS" => CellType::Status,
            "DATE" => CellType::Date,
            "PEOPLE" => CellType::People,
            "TAGS" => CellType::Tags,
            other => CellType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for CellType {
    fn from(name: String) -> Self {
        CellType::from(name.as_str())
    }
}

impl From<CellType> for String {
    fn from(cell_type: CellType) -> Self {
        cell_type.as_str().to_string()
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One STATUS option: display text and its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub text: String,
    pub color: String,
}

impl StatusLabel {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// How a DATE column captures and displays its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateMode {
    #[default]
    Date,
    DateTime,
    Quarter,
}

/// Type-specific column settings.
///
/// Keys that no cell type understands are preserved in `extra` so a settings
/// round trip through the grid never drops them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSettings {
    /// STATUS options keyed by label id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, StatusLabel>>,
    /// DATE mode: `date`, `datetime` or `quarter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ColumnSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, id: impl Into<String>, label: StatusLabel) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(id.into(), label);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Looks up a STATUS label by id.
    pub fn label(&self, id: &str) -> Option<&StatusLabel> {
        self.labels.as_ref().and_then(|labels| labels.get(id))
    }

    /// Parsed DATE mode. Unrecognised modes read as [`DateMode::Date`].
    pub fn date_mode(&self) -> DateMode {
        match self.mode.as_deref() {
            Some("datetime") => DateMode::DateTime,
            Some("quarter") => DateMode::Quarter,
            _ => DateMode::Date,
        }
    }

    /// Merges `incoming` into these settings.
    ///
    /// Label maps are unioned by id with incoming entries winning; every other
    /// setting present in `incoming` replaces the current one.
    pub fn merge(&mut self, incoming: ColumnSettings) {
        if let Some(labels) = incoming.labels {
            let current = self.labels.get_or_insert_with(BTreeMap::new);
            current.extend(labels);
        }
        if incoming.mode.is_some() {
            self.mode = incoming.mode;
        }
        if incoming.allow_multiple.is_some() {
            self.allow_multiple = incoming.allow_multiple;
        }
        self.extra.extend(incoming.extra);
    }

    /// Whether merging `other` into these settings would change nothing.
    pub fn contains(&self, other: &ColumnSettings) -> bool {
        let labels = other.labels.iter().flatten().all(|(id, label)| self.label(id) == Some(label));
        let mode = other.mode.is_none() || other.mode == self.mode;
        let allow_multiple = other.allow_multiple.is_none() || other.allow_multiple == self.allow_multiple;
        let extra = other
            .extra
            .iter()
            .all(|(key, value)| self.extra.get(key) == Some(value));
        labels && mode && allow_multiple && extra
    }
}

/// Column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    #[serde(default)]
    pub settings: ColumnSettings,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ColumnDef {
    pub fn new(id: impl Into<String>, cell_type: CellType, title: impl Into<String>, width: u32) -> Self {
        Self {
            id: id.into(),
            cell_type,
            title: title.into(),
            width,
            settings: ColumnSettings::default(),
            pinned: false,
            order: None,
        }
    }

    pub fn with_settings(mut self, settings: ColumnSettings) -> Self {
        self.settings = settings;
        self
    }
}
