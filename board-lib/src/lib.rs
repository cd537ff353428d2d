//! Board data library
//!
//! The data side of a grouped task board: groups of items with typed
//! column values, the store collaborator the grid reports edits to, and the
//! asynchronous people/tag directory used by reference pickers.

pub mod directory;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod store;

pub use error::*;
