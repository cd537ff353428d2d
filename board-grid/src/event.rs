//! Intents the grid reports to its host application.

use board_lib::BoardError;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::store::BoardStore;
use log::debug;

/// A change the user asked for. The grid never applies these itself.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    GroupToggled {
        group_id: String,
    },
    CellValueChanged {
        item_id: String,
        column_id: String,
        value: CellValue,
    },
    /// Column-level settings change, already merged with the grid's view of
    /// the column.
    CellConfigChanged {
        column_id: String,
        settings: ColumnSettings,
    },
    AddItemRequested {
        group_id: String,
    },
    /// Flat row indices of a dragged task row.
    ItemReorderRequested {
        previous_index: usize,
        current_index: usize,
    },
}

impl GridEvent {
    /// Applies the event to a store.
    pub fn apply(self, store: &mut impl BoardStore) -> Result<(), BoardError> {
        debug!("Applying {self:?}");
        match self {
            GridEvent::GroupToggled { group_id } => {
                store.toggle_group_collapsed(&group_id)?;
            }
            GridEvent::CellValueChanged {
                item_id,
                column_id,
                value,
            } => store.update_cell(&item_id, &column_id, value)?,
            GridEvent::CellConfigChanged {
                column_id,
                settings,
            } => store.update_column_settings(&column_id, settings)?,
            GridEvent::AddItemRequested { group_id } => {
                store.add_item(&group_id)?;
            }
            GridEvent::ItemReorderRequested {
                previous_index,
                current_index,
            } => store.move_item(previous_index, current_index),
        }
        Ok(())
    }
}
