//! BoardError for store mutations

/// Error type for operations addressed to a board store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No group with the given id exists on the board.
    #[error("Group '{group_id}' not found")]
    GroupNotFound { group_id: String },

    /// No item with the given id exists in any group.
    #[error("Item '{item_id}' not found")]
    ItemNotFound { item_id: String },

    /// No column with the given id is defined on the board.
    #[error("Column '{column_id}' not found")]
    ColumnNotFound { column_id: String },
}

impl BoardError {
    /// Creates a new group-not-found error.
    pub fn group_not_found(group_id: impl Into<String>) -> Self {
        Self::GroupNotFound {
            group_id: group_id.into(),
        }
    }

    /// Creates a new item-not-found error.
    pub fn item_not_found(item_id: impl Into<String>) -> Self {
        Self::ItemNotFound {
            item_id: item_id.into(),
        }
    }

    /// Creates a new column-not-found error.
    pub fn column_not_found(column_id: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column_id: column_id.into(),
        }
    }
}
