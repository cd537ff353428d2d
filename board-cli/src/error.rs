//! Binary-level errors

use board_grid::ConfigError;
use board_lib::BoardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Board update failed: {0}")]
    Board(#[from] BoardError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out waiting for {what}")]
    Timeout { what: &'static str },

    #[error("The board has no items to edit")]
    EmptyBoard,
}

impl CliError {
    pub fn timeout(what: &'static str) -> Self {
        Self::Timeout { what }
    }
}
