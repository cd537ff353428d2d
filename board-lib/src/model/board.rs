//! Boards, groups and items

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::ColumnDef;
use super::NULL_VALUE;

/// A board item (one task row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub board_id: String,
    pub group_id: String,
    pub name: String,
    /// Values keyed by column id.
    #[serde(default)]
    pub values: BTreeMap<String, CellValue>,
}

impl Item {
    pub fn new(id: impl Into<String>, group_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            board_id: String::new(),
            group_id: group_id.into(),
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Sets a value (builder style).
    pub fn set(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.values.insert(column_id.into(), value.into());
        self
    }

    /// The value for a column, or null when the item has none.
    pub fn value(&self, column_id: &str) -> &CellValue {
        self.values.get(column_id).unwrap_or(&NULL_VALUE)
    }
}

/// A group of items with its own header, footer and collapse state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            is_collapsed: false,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.is_collapsed = collapsed;
        self
    }
}

/// A whole board: column definitions plus ordered groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub groups: Vec<Group>,
}

impl Board {
    pub fn column(&self, column_id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|i| i.id == item_id)
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
