//! Adaptive virtualized cell rendering for grouped boards.
//!
//! The grid flattens groups into display rows, mounts one render state per
//! visible (row, column) slot, and swaps each slot between an interactive
//! renderer and a cheap lightweight one depending on how fast the viewport
//! is scrolling.
//!
//! - [`projector`] turns groups into a flat, windowable row sequence
//! - [`registry`] resolves a column's cell type to its renderers
//! - [`velocity`] and [`speed`] detect fast scrolling
//! - [`host`] owns per-slot render state across tier and type changes
//! - [`grid`] ties them together for a visible index range

pub mod cells;
pub mod config;
pub mod event;
pub mod fragment;
pub mod grid;
pub mod host;
pub mod lookup;
pub mod projector;
pub mod registry;
pub mod rows;
pub mod speed;
pub mod velocity;
pub mod viewport;

pub use config::{ConfigError, GridConfig};
pub use event::GridEvent;
pub use fragment::Fragment;
pub use grid::{BoardGrid, FrameCell, FrameRow, GridFrame};
pub use host::{CellHost, SlotKey, Tier};
pub use projector::{DisplayRow, RowRole, project};
pub use registry::CellRegistry;
pub use speed::{ScrollSpeedHandle, SpeedSignal};
pub use velocity::{ScrollSpeed, VelocityMonitor};
