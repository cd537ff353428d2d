//! In-memory directory

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Directory;
use crate::error::DirectoryError;
use crate::fixtures;
use crate::model::Reference;

/// Colors assigned to entries created through [`Directory::create`].
pub const CREATE_PALETTE: [&str; 7] = [
    "#e2445c", "#ff5722", "#ff9800", "#00c875", "#579bfc", "#a25ddc", "#0086c0",
];

/// A directory backed by a vector, with optional simulated latency.
///
/// Search is a case-insensitive substring match on the label. An empty query
/// matches everything.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: RwLock<Vec<Reference>>,
    latency: Duration,
}

impl InMemoryDirectory {
    pub fn new(entries: Vec<Reference>) -> Self {
        Self {
            entries: RwLock::new(entries),
            latency: Duration::ZERO,
        }
    }

    /// Directory pre-filled with the sample people.
    pub fn people() -> Self {
        Self::new(fixtures::people())
    }

    /// Directory pre-filled with the sample tags.
    pub fn tags() -> Self {
        Self::new(fixtures::tags())
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn search(&self, query: &str) -> Result<Vec<Reference>, DirectoryError> {
        self.simulate_latency().await;
        let needle = query.to_lowercase();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|r| r.label.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, label: &str) -> Result<Reference, DirectoryError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DirectoryError::invalid_label(label));
        }
        self.simulate_latency().await;

        let color = CREATE_PALETTE
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(CREATE_PALETTE[0]);
        let id = Uuid::new_v4().simple().to_string()[..9].to_string();
        let reference = Reference::new(id, label).with_color(color);

        self.entries.write().await.push(reference.clone());
        Ok(reference)
    }
}
