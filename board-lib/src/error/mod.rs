//! Error types

mod board;
mod directory;

pub use board::*;
pub use directory::*;
