//! In-memory board store

use log::info;
use uuid::Uuid;

use super::BoardStore;
use crate::error::BoardError;
use crate::model::Board;
use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::ColumnSettings;
use crate::model::Group;
use crate::model::Item;

/// Color given to groups created with [`InMemoryBoard::add_group`].
pub const NEW_GROUP_COLOR: &str = "#a25ddc";

/// A board held entirely in memory.
///
/// # Example
///
/// ```
/// use board_lib::fixtures;
/// use board_lib::store::{BoardStore, InMemoryBoard};
///
/// let mut store = InMemoryBoard::new(fixtures::sample_board());
/// store.toggle_group_collapsed("g1").unwrap();
/// assert!(store.groups()[0].is_collapsed);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryBoard {
    board: Board,
}

impl InMemoryBoard {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Prepends a new empty group. Returns its id.
    pub fn add_group(&mut self) -> String {
        let id = format!("g{}", Uuid::new_v4().simple());
        let group = Group::new(id.clone(), "New Group", NEW_GROUP_COLOR);
        self.board.groups.insert(0, group);
        info!("Added group {id}");
        id
    }

    /// Replaces a column definition wholesale (e.g. to change its type).
    pub fn replace_column(&mut self, column: ColumnDef) -> Result<(), BoardError> {
        let slot = self
            .board
            .columns
            .iter_mut()
            .find(|c| c.id == column.id)
            .ok_or_else(|| BoardError::column_not_found(&column.id))?;
        *slot = column;
        Ok(())
    }

    fn group_mut(&mut self, group_id: &str) -> Result<&mut Group, BoardError> {
        self.board
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| BoardError::group_not_found(group_id))
    }

    fn item_mut(&mut self, item_id: &str) -> Result<&mut Item, BoardError> {
        self.board
            .groups
            .iter_mut()
            .flat_map(|g| g.items.iter_mut())
            .find(|i| i.id == item_id)
            .ok_or_else(|| BoardError::item_not_found(item_id))
    }
}

impl BoardStore for InMemoryBoard {
    fn groups(&self) -> &[Group] {
        &self.board.groups
    }

    fn columns(&self) -> &[ColumnDef] {
        &self.board.columns
    }

    fn update_cell(
        &mut self,
        item_id: &str,
        column_id: &str,
        value: CellValue,
    ) -> Result<(), BoardError> {
        if self.board.column(column_id).is_none() {
            return Err(BoardError::column_not_found(column_id));
        }
        let item = self.item_mut(item_id)?;
        info!("Updated {item_id}.{column_id} to {}", value.display_text());
        item.values.insert(column_id.to_string(), value);
        Ok(())
    }

    fn update_column_settings(
        &mut self,
        column_id: &str,
        settings: ColumnSettings,
    ) -> Result<(), BoardError> {
        let column = self
            .board
            .columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| BoardError::column_not_found(column_id))?;
        column.settings = settings;
        info!("Updated settings for column {column_id}");
        Ok(())
    }

    fn toggle_group_collapsed(&mut self, group_id: &str) -> Result<bool, BoardError> {
        let group = self.group_mut(group_id)?;
        group.is_collapsed = !group.is_collapsed;
        info!("Group {group_id} collapsed: {}", group.is_collapsed);
        Ok(group.is_collapsed)
    }

    fn add_item(&mut self, group_id: &str) -> Result<String, BoardError> {
        let board_id = self.board.id.clone();
        let group = self.group_mut(group_id)?;
        let id = format!("i{}", Uuid::new_v4().simple());
        let mut item = Item::new(id.clone(), group_id, "New Item");
        item.board_id = board_id;
        group.items.push(item);
        info!("Added item {id} to group {group_id}");
        Ok(id)
    }

    fn move_item(&mut self, previous_index: usize, current_index: usize) {
        info!("Move item requested from row {previous_index} to row {current_index}");
    }
}
