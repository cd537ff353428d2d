//! Board data model
//!
//! Boards own columns and groups; groups own their items in display order.
//! Item values are keyed by column id and shaped by the column's cell type.

mod board;
mod column;
mod value;

pub use board::*;
pub use column::*;
pub use value::*;
