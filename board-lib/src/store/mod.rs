//! Board store collaborator
//!
//! The grid never mutates board data itself. It reports intents (value and
//! settings edits, collapse toggles, new items) to a [`BoardStore`], then
//! re-renders from whatever the store returns.

mod memory;

pub use memory::*;

use crate::error::BoardError;
use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::ColumnSettings;
use crate::model::Group;

/// Storage for one board.
pub trait BoardStore {
    /// Groups in display order, each with items in display order.
    fn groups(&self) -> &[Group];

    /// Column definitions in display order.
    fn columns(&self) -> &[ColumnDef];

    /// Writes one cell value.
    fn update_cell(
        &mut self,
        item_id: &str,
        column_id: &str,
        value: CellValue,
    ) -> Result<(), BoardError>;

    /// Replaces a column's settings. Affects every row sharing the column.
    fn update_column_settings(
        &mut self,
        column_id: &str,
        settings: ColumnSettings,
    ) -> Result<(), BoardError>;

    /// Flips a group's collapse flag. Returns the new flag.
    fn toggle_group_collapsed(&mut self, group_id: &str) -> Result<bool, BoardError>;

    /// Appends a new empty item to a group. Returns the new item's id.
    fn add_item(&mut self, group_id: &str) -> Result<String, BoardError>;

    /// Accepts a reorder request expressed in flat row indices.
    ///
    /// Translating flat indices into a group-relative move has no agreed
    /// policy yet, so implementations only record the request.
    fn move_item(&mut self, previous_index: usize, current_index: usize);
}
