//! Scripted scroll and edit session.
//!
//! Drives a [`BoardGrid`] the way an interactive front end would: scroll
//! samples go to the speed service, each step renders the visible window,
//! and grid events are applied to the in-memory store before the next render.

use std::io::Write;
use std::time::Duration;

use board_grid::cells::CellInput;
use board_grid::grid::FrameRow;
use board_grid::lookup::Directories;
use board_grid::viewport::FixedRowWindow;
use board_grid::{BoardGrid, GridConfig, GridFrame, RowRole, ScrollSpeed, ScrollSpeedHandle};
use board_lib::store::{BoardStore, InMemoryBoard};
use log::info;

use crate::error::CliError;

const STATUS_COLUMN: &str = "col_status";
const OWNERS_COLUMN: &str = "col_owners";

/// Interval between synthetic scroll samples.
const FRAME: Duration = Duration::from_millis(16);

/// Pixels per character when printing.
const PX_PER_CHAR: u32 = 10;

pub struct Session {
    store: InMemoryBoard,
    grid: BoardGrid,
    speed: ScrollSpeedHandle,
    window: FixedRowWindow,
    scroll_top: f64,
}

impl Session {
    /// Must be called inside a tokio runtime.
    pub fn new(store: InMemoryBoard, config: GridConfig, viewport_height: u32) -> Self {
        let speed = ScrollSpeedHandle::spawn(&config);
        let window = FixedRowWindow::new(config.task_height, viewport_height).with_overscan(2);
        let grid = BoardGrid::new(config, speed.signal()).with_directories(Directories::in_memory());
        Self {
            store,
            grid,
            speed,
            window,
            scroll_top: 0.0,
        }
    }

    pub fn store(&self) -> &InMemoryBoard {
        &self.store
    }

    pub fn render(&mut self) -> GridFrame {
        let row_count = board_grid::project(self.store.groups()).len();
        let visible = self.window.visible_range(self.scroll_top, row_count);
        self.grid.render(self.store.groups(), self.store.columns(), visible)
    }

    /// Applies every pending grid event to the store.
    pub fn apply_events(&mut self) -> Result<usize, CliError> {
        let events = self.grid.drain_events();
        let count = events.len();
        for event in events {
            event.apply(&mut self.store)?;
        }
        Ok(count)
    }

    /// Scrolls by `distance` pixels over `steps` frames, rendering each frame.
    pub async fn scroll(&mut self, distance: f64, steps: u32) -> GridFrame {
        let row_count = board_grid::project(self.store.groups()).len();
        let max = self.window.max_scroll(row_count);
        let step = distance / f64::from(steps.max(1));

        self.speed.on_scroll(self.scroll_top);
        let mut frame = self.render();
        for _ in 0..steps {
            tokio::time::sleep(FRAME).await;
            self.scroll_top = (self.scroll_top + step).clamp(0.0, max);
            self.speed.on_scroll(self.scroll_top);
            // Let the speed service see the sample before rendering.
            tokio::task::yield_now().await;
            frame = self.render();
        }
        frame
    }

    /// Waits for fast scrolling to end, then renders.
    pub async fn settle(&mut self) -> Result<GridFrame, CliError> {
        let mut signal = self.speed.signal();
        let wait = async {
            while signal.current() == ScrollSpeed::Fast {
                if signal.changed().await.is_none() {
                    break;
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .map_err(|_| CliError::timeout("scrolling to settle"))?;
        Ok(self.render())
    }

    fn first_item(&self) -> Result<String, CliError> {
        self.store
            .groups()
            .iter()
            .flat_map(|group| group.items.iter())
            .next()
            .map(|item| item.id.clone())
            .ok_or(CliError::EmptyBoard)
    }

    /// Sets the first item's status through the STATUS picker.
    pub fn pick_status(&mut self, label: &str) -> Result<GridFrame, CliError> {
        let item_id = self.first_item()?;
        self.grid.focus(&item_id, STATUS_COLUMN);
        self.grid
            .input(&item_id, STATUS_COLUMN, CellInput::Select(label.to_string()));
        let applied = self.apply_events()?;
        info!("Applied {applied} events after status pick on {item_id}");
        Ok(self.render())
    }

    /// Opens the first item's people picker and searches for `query`.
    pub async fn search_people(&mut self, query: &str) -> Result<GridFrame, CliError> {
        let item_id = self.first_item()?;
        self.grid.focus(&item_id, OWNERS_COLUMN);
        self.grid
            .input(&item_id, OWNERS_COLUMN, CellInput::Edit(query.to_string()));
        tokio::time::timeout(Duration::from_secs(2), self.grid.next_lookup())
            .await
            .map_err(|_| CliError::timeout("people search"))?;
        Ok(self.render())
    }

    /// Toggles the first group's collapse flag.
    pub fn toggle_first_group(&mut self) -> Result<GridFrame, CliError> {
        let Some(group_id) = self.store.groups().first().map(|group| group.id.clone()) else {
            return Err(CliError::EmptyBoard);
        };
        self.grid.toggle_group(&group_id);
        self.apply_events()?;
        Ok(self.render())
    }

    pub fn scroll_to_top(&mut self) -> GridFrame {
        self.scroll_top = 0.0;
        self.render()
    }

    /// Runs the whole script, printing each step.
    pub async fn run(&mut self, out: &mut impl Write) -> Result<(), CliError> {
        let frame = self.render();
        print_frame(out, "Initial window", &frame, &self.grid, &self.store)?;

        let frame = self.scroll(2400.0, 6).await;
        print_frame(out, "Fast scroll", &frame, &self.grid, &self.store)?;

        let frame = self.settle().await?;
        print_frame(out, "Settled", &frame, &self.grid, &self.store)?;

        self.scroll_to_top();
        let frame = self.pick_status("Stuck")?;
        print_frame(out, "Status set to Stuck", &frame, &self.grid, &self.store)?;

        let frame = self.search_people("ali").await?;
        print_frame(out, "People search", &frame, &self.grid, &self.store)?;

        let frame = self.toggle_first_group()?;
        print_frame(out, "First group collapsed", &frame, &self.grid, &self.store)?;

        self.grid.clear();
        self.apply_events()?;
        Ok(())
    }
}

/// Writes a frame as fixed-width text, one line per row.
pub fn print_frame(
    out: &mut impl Write,
    title: &str,
    frame: &GridFrame,
    grid: &BoardGrid,
    store: &InMemoryBoard,
) -> Result<(), CliError> {
    let sticky = grid.current_group(frame.visible.start).unwrap_or("-");
    writeln!(
        out,
        "== {title} ({:?}, rows {}..{} of {}, group {sticky}) ==",
        frame.tier, frame.visible.start, frame.visible.end, frame.total_rows
    )?;
    for row in &frame.rows {
        writeln!(out, "{}", format_row(row, grid, store))?;
    }
    writeln!(out)?;
    Ok(())
}

fn format_row(row: &FrameRow, grid: &BoardGrid, store: &InMemoryBoard) -> String {
    let name_width = (grid.config().name_column_width / PX_PER_CHAR) as usize;
    match row.role {
        RowRole::GroupHeader | RowRole::GroupFooter => row.lead.fit(name_width * 2),
        RowRole::TaskRow => {
            let mut line = row.lead.fit(name_width);
            for column in store.columns() {
                let width = (column.width / PX_PER_CHAR) as usize;
                line.push('|');
                match row.cell(&column.id) {
                    Some(cell) => line.push_str(&cell.fit(width)),
                    None => line.push_str(&" ".repeat(width)),
                }
            }
            line
        }
    }
}
