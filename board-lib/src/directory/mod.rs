//! People and tag directories
//!
//! PEOPLE and TAGS pickers search a directory as the user types and may ask
//! it to create new entries. Both calls are asynchronous and may return an
//! empty list for an empty query.

mod memory;

pub use memory::*;

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::model::Reference;

/// Trait for reference directories.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Returns entries whose label matches `query`.
    async fn search(&self, query: &str) -> Result<Vec<Reference>, DirectoryError>;

    /// Creates a new entry with the given label.
    async fn create(&self, label: &str) -> Result<Reference, DirectoryError>;
}
