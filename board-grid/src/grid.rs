//! The board grid.
//!
//! [`BoardGrid`] is driven by its host application once per frame with the
//! current groups, columns and visible index range. It projects the rows,
//! keeps one [`CellHost`] per visible task-row cell, and tears down every slot
//! that left the window. User input is routed to slots by (item, column);
//! everything the user asks for comes back out as [`GridEvent`]s for the
//! application to apply to its store.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use board_lib::model::ColumnDef;
use board_lib::model::ColumnSettings;
use board_lib::model::Group;
use log::debug;

use crate::cells::CellInput;
use crate::config::GridConfig;
use crate::event::GridEvent;
use crate::fragment::Fragment;
use crate::host::{CellHost, HostEvent, SlotKey, Tier};
use crate::lookup::{Directories, LookupDispatcher, LookupReply};
use crate::projector::{RowId, RowRole, project};
use crate::registry::CellRegistry;
use crate::rows;
use crate::speed::SpeedSignal;
use crate::velocity::ScrollSpeed;
use crate::viewport;

// =============================================================================
// Frame
// =============================================================================

/// One rendered cell of a task row.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCell {
    pub column_id: String,
    pub fragment: Fragment,
}

/// One rendered row of the visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    /// Index in the full projection.
    pub index: usize,
    pub id: RowId,
    pub role: RowRole,
    pub group_id: String,
    /// Header or footer content, or the item name for task rows.
    pub lead: Fragment,
    /// Column cells, task rows only.
    pub cells: Vec<FrameCell>,
}

impl FrameRow {
    pub fn cell(&self, column_id: &str) -> Option<&Fragment> {
        self.cells
            .iter()
            .find(|cell| cell.column_id == column_id)
            .map(|cell| &cell.fragment)
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFrame {
    pub rows: Vec<FrameRow>,
    /// Length of the full projection.
    pub total_rows: usize,
    /// The rendered index range, clamped to the projection.
    pub visible: Range<usize>,
    pub tier: Tier,
}

impl GridFrame {
    pub fn row(&self, id: &str) -> Option<&FrameRow> {
        self.rows.iter().find(|row| row.id.as_str() == id)
    }
}

#[derive(Debug, Clone)]
struct RowSnapshot {
    role: RowRole,
    group_id: String,
}

// =============================================================================
// BoardGrid
// =============================================================================

#[derive(Debug)]
pub struct BoardGrid {
    config: GridConfig,
    registry: Arc<CellRegistry>,
    speed: SpeedSignal,
    /// Columns from the last render, with pending settings merged in.
    columns: Vec<ColumnDef>,
    /// Settings changes raised by cells that the caller's columns do not
    /// reflect yet, keyed by column id.
    pending_settings: HashMap<String, ColumnSettings>,
    rows: Vec<RowSnapshot>,
    slots: HashMap<SlotKey, CellHost>,
    events: Vec<GridEvent>,
    lookups: LookupDispatcher,
}

impl BoardGrid {
    pub fn new(config: GridConfig, speed: SpeedSignal) -> Self {
        let lookups = LookupDispatcher::new(None, &config);
        Self {
            config,
            registry: Arc::new(CellRegistry::standard()),
            speed,
            columns: Vec::new(),
            pending_settings: HashMap::new(),
            rows: Vec::new(),
            slots: HashMap::new(),
            events: Vec::new(),
            lookups,
        }
    }

    pub fn with_registry(mut self, registry: Arc<CellRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Enables people and tag lookups for picker cells.
    pub fn with_directories(mut self, directories: Directories) -> Self {
        self.lookups = LookupDispatcher::new(Some(directories), &self.config);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn speed(&self) -> ScrollSpeed {
        self.speed.current()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Renders the rows in `visible` and releases every slot outside it.
    pub fn render(&mut self, groups: &[Group], columns: &[ColumnDef], visible: Range<usize>) -> GridFrame {
        self.poll_lookups();

        let projection = project(groups);
        self.rows = projection
            .iter()
            .map(|row| RowSnapshot {
                role: row.role,
                group_id: row.group_id.to_string(),
            })
            .collect();
        let columns = self.merge_pending(columns);
        self.columns = columns.clone();

        let tier = Tier::for_speed(self.speed.current());
        let end = visible.end.min(projection.len());
        let start = visible.start.min(end);

        let mut live = HashSet::new();
        let mut frame_rows = Vec::with_capacity(end - start);

        for (index, row) in projection.iter().enumerate().take(end).skip(start) {
            let mut frame_row = FrameRow {
                index,
                id: row.id.clone(),
                role: row.role,
                group_id: row.group_id.to_string(),
                lead: Fragment::empty(),
                cells: Vec::new(),
            };

            match (row.group(), row.item()) {
                (Some(group), _) if row.role == RowRole::GroupHeader => {
                    frame_row.lead = rows::group_header(group);
                }
                (Some(group), _) => frame_row.lead = rows::group_footer(group),
                (_, Some(item)) => {
                    frame_row.lead = rows::item_name(item);
                    for column in &columns {
                        let key = SlotKey::new(&item.id, &column.id);
                        live.insert(key.clone());

                        let host = self
                            .slots
                            .entry(key)
                            .or_insert_with_key(|key| CellHost::new(key.clone(), Arc::clone(&self.registry)));
                        host.set_tier(tier);
                        host.set_type(column.cell_type.clone());
                        host.set_value(item.value(&column.id));
                        host.set_config(&column.settings);
                        host.flush();

                        frame_row.cells.push(FrameCell {
                            column_id: column.id.clone(),
                            fragment: host.view(),
                        });
                    }
                }
                (None, None) => {}
            }

            frame_rows.push(frame_row);
        }

        let mut released = Vec::new();
        self.slots.retain(|key, host| {
            if live.contains(key) {
                return true;
            }
            host.teardown();
            released.extend(host.drain_events().into_iter().map(|event| (key.clone(), event)));
            false
        });
        if !released.is_empty() {
            debug!("Committed {} staged edits from released slots", released.len());
        }
        self.handle_host_events(released);
        self.collect_slot_output();

        GridFrame {
            rows: frame_rows,
            total_rows: projection.len(),
            visible: start..end,
            tier,
        }
    }

    /// Releases every slot, as when the viewport is cleared.
    pub fn clear(&mut self) {
        let mut released = Vec::new();
        for (key, mut host) in self.slots.drain() {
            host.teardown();
            released.extend(host.drain_events().into_iter().map(|event| (key.clone(), event)));
        }
        self.handle_host_events(released);
    }

    pub fn slot(&self, item_id: &str, column_id: &str) -> Option<&CellHost> {
        self.slots.get(&SlotKey::new(item_id, column_id))
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Routes an input to a visible cell. Returns `false` when the cell is
    /// not mounted or not interactive.
    pub fn input(&mut self, item_id: &str, column_id: &str, input: CellInput) -> bool {
        let key = SlotKey::new(item_id, column_id);
        let Some(host) = self.slots.get_mut(&key) else {
            debug!("Input for {key} ignored: slot not visible");
            return false;
        };
        let handled = host.handle(input);
        self.collect_slot_output();
        handled
    }

    /// Keyboard activation of a visible cell.
    pub fn focus(&mut self, item_id: &str, column_id: &str) -> bool {
        let key = SlotKey::new(item_id, column_id);
        let Some(host) = self.slots.get_mut(&key) else {
            debug!("Focus on {key} ignored: slot not visible");
            return false;
        };
        let handled = host.focus();
        self.collect_slot_output();
        handled
    }

    /// Delivers every finished lookup. Returns how many reached a renderer.
    pub fn poll_lookups(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(reply) = self.lookups.try_recv() {
            if self.deliver(reply) {
                delivered += 1;
            }
        }
        if delivered > 0 {
            self.collect_slot_output();
        }
        delivered
    }

    /// Waits for the next finished lookup and delivers it.
    pub async fn next_lookup(&mut self) -> bool {
        let Some(reply) = self.lookups.recv().await else {
            return false;
        };
        let delivered = self.deliver(reply);
        self.collect_slot_output();
        delivered
    }

    fn deliver(&mut self, reply: LookupReply) -> bool {
        match self.slots.get_mut(&reply.slot) {
            Some(host) => host.deliver(reply),
            None => {
                debug!("Discarding lookup reply for released slot {}", reply.slot);
                false
            }
        }
    }

    pub fn toggle_group(&mut self, group_id: &str) {
        self.events.push(GridEvent::GroupToggled {
            group_id: group_id.to_string(),
        });
    }

    pub fn request_add_item(&mut self, group_id: &str) {
        self.events.push(GridEvent::AddItemRequested {
            group_id: group_id.to_string(),
        });
    }

    /// Requests moving the row at flat index `previous_index`. Only task rows
    /// can be dragged.
    pub fn request_reorder(&mut self, previous_index: usize, current_index: usize) -> bool {
        match self.rows.get(previous_index) {
            Some(row) if row.role == RowRole::TaskRow => {
                self.events.push(GridEvent::ItemReorderRequested {
                    previous_index,
                    current_index,
                });
                true
            }
            _ => {
                debug!("Ignoring reorder of row {previous_index}: not a task row");
                false
            }
        }
    }

    /// Group owning the row at a flat index, for a sticky group indicator.
    pub fn current_group(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|row| row.group_id.as_str())
    }

    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    pub fn grid_template(&self) -> String {
        viewport::grid_template(self.config.name_column_width, &self.columns)
    }

    pub fn column_offsets(&self) -> Vec<u32> {
        viewport::column_offsets(self.config.name_column_width, &self.columns)
    }

    // -------------------------------------------------------------------------
    // Slot output
    // -------------------------------------------------------------------------

    fn collect_slot_output(&mut self) {
        let mut output = Vec::new();
        for (key, host) in &mut self.slots {
            output.extend(host.drain_events().into_iter().map(|event| (key.clone(), event)));
            for task in host.drain_lookups() {
                self.lookups.dispatch(key.clone(), task.mount, task.request, task.cancel);
            }
        }
        self.handle_host_events(output);
    }

    fn handle_host_events(&mut self, events: Vec<(SlotKey, HostEvent)>) {
        for (key, event) in events {
            match event {
                HostEvent::Value(value) => self.events.push(GridEvent::CellValueChanged {
                    item_id: key.item_id,
                    column_id: key.column_id,
                    value,
                }),
                HostEvent::Config(settings) => self.apply_column_config(key.column_id, settings),
            }
        }
    }

    /// Applies pending settings over the caller's columns, forgetting the
    /// ones the caller already carries.
    fn merge_pending(&mut self, columns: &[ColumnDef]) -> Vec<ColumnDef> {
        let mut columns = columns.to_vec();
        for column in &mut columns {
            let Some(pending) = self.pending_settings.get(&column.id) else {
                continue;
            };
            if column.settings.contains(pending) {
                debug!("Column {} settings caught up with local changes", column.id);
                self.pending_settings.remove(&column.id);
            } else {
                column.settings.merge(pending.clone());
            }
        }
        columns
    }

    /// Merges a column-level settings change and pushes it to every mounted
    /// slot of that column.
    fn apply_column_config(&mut self, column_id: String, settings: ColumnSettings) {
        self.pending_settings
            .entry(column_id.clone())
            .or_default()
            .merge(settings.clone());

        let merged = match self.columns.iter_mut().find(|column| column.id == column_id) {
            Some(column) => {
                column.settings.merge(settings);
                column.settings.clone()
            }
            None => settings,
        };

        for (key, host) in &mut self.slots {
            if key.column_id == column_id {
                host.apply_column_config(&merged);
            }
        }

        self.events.push(GridEvent::CellConfigChanged {
            column_id,
            settings: merged,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_lib::fixtures;
    use board_lib::model::CellValue;

    fn grid() -> BoardGrid {
        BoardGrid::new(GridConfig::default(), SpeedSignal::default())
    }

    #[test]
    fn test_renders_only_visible_rows() {
        let board = fixtures::sample_board();
        let mut grid = grid();

        let frame = grid.render(&board.groups, &board.columns, 1..3);

        assert_eq!(frame.total_rows, 8);
        assert_eq!(frame.rows.len(), 2);
        assert_eq!(frame.rows[0].id.as_str(), "i1");
        assert_eq!(grid.slot_count(), 2 * board.columns.len());
    }

    #[test]
    fn test_visible_range_is_clamped() {
        let board = fixtures::sample_board();
        let mut grid = grid();

        let frame = grid.render(&board.groups, &board.columns, 6..50);
        assert_eq!(frame.visible, 6..8);

        let frame = grid.render(&board.groups, &board.columns, 20..30);
        assert_eq!(frame.visible, 8..8);
        assert!(frame.rows.is_empty());
        assert_eq!(grid.slot_count(), 0);
    }

    #[test]
    fn test_scrolled_out_slots_are_released() {
        let board = fixtures::sample_board();
        let mut grid = grid();

        grid.render(&board.groups, &board.columns, 0..3);
        assert!(grid.slot("i1", "col_status").is_some());

        grid.render(&board.groups, &board.columns, 4..8);
        assert!(grid.slot("i1", "col_status").is_none());
        assert!(grid.slot("i3", "col_status").is_some());
    }

    #[test]
    fn test_header_and_footer_rows() {
        let board = fixtures::sample_board();
        let mut grid = grid();

        let frame = grid.render(&board.groups, &board.columns, 0..8);

        assert_eq!(frame.rows[0].lead.plain_text(), "▼ This Week 2 items");
        assert!(frame.rows[0].cells.is_empty());
        assert_eq!(frame.rows[3].lead.plain_text(), "+ Add Item");
        assert_eq!(frame.rows[1].lead.plain_text(), "Design Login Page");
    }

    #[test]
    fn test_reorder_only_for_task_rows() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..8);

        assert!(!grid.request_reorder(0, 2));
        assert!(!grid.request_reorder(3, 1));
        assert!(grid.request_reorder(1, 2));
        assert!(!grid.request_reorder(99, 1));

        assert_eq!(
            grid.drain_events(),
            vec![GridEvent::ItemReorderRequested {
                previous_index: 1,
                current_index: 2,
            }]
        );
    }

    #[test]
    fn test_current_group() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..0);

        assert_eq!(grid.current_group(0), Some("g1"));
        assert_eq!(grid.current_group(3), Some("g1"));
        assert_eq!(grid.current_group(4), Some("g2"));
        assert_eq!(grid.current_group(8), None);
    }

    #[test]
    fn test_layout_hints() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns[..2], 0..0);

        assert_eq!(grid.grid_template(), "300px 140px 120px");
        assert_eq!(grid.column_offsets(), vec![300, 440]);
    }

    #[test]
    fn test_input_to_hidden_slot_is_ignored() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..2);

        assert!(!grid.input("i4", "col_status", CellInput::Toggle));
        assert!(grid.drain_events().is_empty());
    }

    #[test]
    fn test_label_added_reaches_sibling_rows() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..8);

        grid.input("i1", "col_status", CellInput::Edit("Blocked".into()));
        grid.input("i1", "col_status", CellInput::Commit);
        grid.input("i2", "col_status", CellInput::Select("blocked".into()));

        let frame = grid.render(&board.groups, &board.columns, 0..8);
        let i2 = frame.row("i2").unwrap().cell("col_status").unwrap();
        assert_eq!(i2.plain_text(), "Blocked");

        let events = grid.drain_events();
        assert!(matches!(
            &events[0],
            GridEvent::CellConfigChanged { column_id, settings }
                if column_id == "col_status" && settings.label("blocked").is_some() && settings.label("Done").is_some()
        ));
        assert_eq!(
            events[2],
            GridEvent::CellValueChanged {
                item_id: "i2".into(),
                column_id: "col_status".into(),
                value: CellValue::from("blocked"),
            }
        );
    }

    #[test]
    fn test_label_survives_renders_with_stale_columns() {
        use board_lib::store::{BoardStore, InMemoryBoard};

        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..2);

        grid.input("i1", "col_status", CellInput::Edit("Blocked".into()));
        grid.input("i1", "col_status", CellInput::Commit);

        // The store has not seen either label; renders keep passing its columns.
        grid.render(&board.groups, &board.columns, 0..8);
        grid.input("i3", "col_status", CellInput::Edit("Paused".into()));
        grid.input("i3", "col_status", CellInput::Commit);

        let frame = grid.render(&board.groups, &board.columns, 0..8);
        assert_eq!(frame.row("i1").unwrap().cell("col_status").unwrap().plain_text(), "Blocked");
        assert_eq!(frame.row("i3").unwrap().cell("col_status").unwrap().plain_text(), "Paused");

        let events = grid.drain_events();
        let last_config = events
            .iter()
            .rev()
            .find_map(|event| match event {
                GridEvent::CellConfigChanged { settings, .. } => Some(settings),
                _ => None,
            })
            .unwrap();
        assert!(last_config.label("blocked").is_some());
        assert!(last_config.label("paused").is_some());

        let mut store = InMemoryBoard::new(board);
        for event in events {
            event.apply(&mut store).unwrap();
        }
        let status = store.columns().iter().find(|c| c.id == "col_status").unwrap();
        assert!(status.settings.label("blocked").is_some());
        assert!(status.settings.label("paused").is_some());

        // Once the store carries the labels the grid stops overlaying them.
        let board = store.board().clone();
        grid.render(&board.groups, &board.columns, 0..8);
        assert!(grid.pending_settings.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let board = fixtures::sample_board();
        let mut grid = grid();
        grid.render(&board.groups, &board.columns, 0..8);

        grid.focus("i1", "col_person");
        grid.input("i1", "col_person", CellInput::Edit("Zoe".into()));
        grid.clear();

        assert_eq!(grid.slot_count(), 0);
        assert_eq!(
            grid.drain_events(),
            vec![GridEvent::CellValueChanged {
                item_id: "i1".into(),
                column_id: "col_person".into(),
                value: CellValue::from("Zoe"),
            }]
        );
    }
}
