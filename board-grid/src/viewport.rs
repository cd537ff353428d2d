//! Viewport geometry: row heights, the visible index window and column
//! placement.

use std::ops::Range;

use board_lib::model::ColumnDef;

use crate::config::GridConfig;
use crate::projector::{DisplayRow, RowRole};

/// Height of each row role, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    pub header: u32,
    pub task: u32,
    pub footer: u32,
}

impl RowMetrics {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            header: config.header_height,
            task: config.task_height,
            footer: config.footer_height,
        }
    }

    pub fn height(&self, role: RowRole) -> u32 {
        match role {
            RowRole::GroupHeader => self.header,
            RowRole::TaskRow => self.task,
            RowRole::GroupFooter => self.footer,
        }
    }

    /// Total content height of a projection.
    pub fn total_height(&self, rows: &[DisplayRow<'_>]) -> u64 {
        rows.iter().map(|row| u64::from(self.height(row.role))).sum()
    }
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

/// Visible index window for rows of one fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRowWindow {
    pub row_height: u32,
    pub viewport_height: u32,
    /// Extra rows rendered past each edge.
    pub overscan: usize,
}

impl FixedRowWindow {
    pub fn new(row_height: u32, viewport_height: u32) -> Self {
        Self {
            row_height,
            viewport_height,
            overscan: 0,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Index of the first row at least partly visible.
    pub fn first_visible(&self, scroll_top: f64) -> usize {
        if self.row_height == 0 {
            return 0;
        }
        (scroll_top.max(0.0) / f64::from(self.row_height)) as usize
    }

    /// Rows to render for a scroll offset, clamped to `row_count`.
    pub fn visible_range(&self, scroll_top: f64, row_count: usize) -> Range<usize> {
        if row_count == 0 || self.row_height == 0 || self.viewport_height == 0 {
            return 0..0;
        }
        let first = self.first_visible(scroll_top).min(row_count);
        let visible = self.viewport_height.div_ceil(self.row_height) as usize;

        let start = first.saturating_sub(self.overscan);
        let end = (first + visible + 1 + self.overscan).min(row_count);
        start..end
    }

    /// Largest useful scroll offset.
    pub fn max_scroll(&self, row_count: usize) -> f64 {
        let content = row_count as f64 * f64::from(self.row_height);
        (content - f64::from(self.viewport_height)).max(0.0)
    }
}

/// CSS-style column template: the name column, then each column, in px.
pub fn grid_template(name_width: u32, columns: &[ColumnDef]) -> String {
    std::iter::once(name_width)
        .chain(columns.iter().map(|column| column.width))
        .map(|width| format!("{width}px"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Left edge of each column, in px, after the name column.
pub fn column_offsets(name_width: u32, columns: &[ColumnDef]) -> Vec<u32> {
    columns
        .iter()
        .scan(name_width, |x, column| {
            let offset = *x;
            *x += column.width;
            Some(offset)
        })
        .collect()
}
