//! Grid configuration

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Errors loading a [`GridConfig`] file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for scroll detection, row layout and picker searches.
///
/// Missing keys in a config file take their default value.
///
/// # Example
///
/// ```
/// use board_grid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_velocity_threshold(1.0)
///     .with_quiet_period_ms(250);
/// assert_eq!(config.quiet_period().as_millis(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Scroll speed, in pixels per millisecond, above which scrolling is fast.
    ///
    /// Default: 0.5
    pub velocity_threshold: f64,

    /// Time without scroll samples after which fast scrolling ends.
    ///
    /// Default: 150 ms
    pub quiet_period_ms: u64,

    /// Default: 40 px
    pub header_height: u32,

    /// Default: 40 px
    pub task_height: u32,

    /// Default: 40 px
    pub footer_height: u32,

    /// Width of the pinned item-name column.
    ///
    /// Default: 300 px
    pub name_column_width: u32,

    /// Delay before a people search is sent.
    ///
    /// Default: 300 ms
    pub people_debounce_ms: u64,

    /// Delay before a tag search is sent.
    ///
    /// Default: 200 ms
    pub tag_debounce_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.5,
            quiet_period_ms: 150,
            header_height: 40,
            task_height: 40,
            footer_height: 40,
            name_column_width: 300,
            people_debounce_ms: 300,
            tag_debounce_ms: 200,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_quiet_period_ms(mut self, ms: u64) -> Self {
        self.quiet_period_ms = ms;
        self
    }

    /// Sets header, task and footer heights at once.
    pub fn with_row_heights(mut self, header: u32, task: u32, footer: u32) -> Self {
        self.header_height = header;
        self.task_height = task;
        self.footer_height = footer;
        self
    }

    pub fn with_name_column_width(mut self, width: u32) -> Self {
        self.name_column_width = width;
        self
    }

    pub fn with_people_debounce_ms(mut self, ms: u64) -> Self {
        self.people_debounce_ms = ms;
        self
    }

    pub fn with_tag_debounce_ms(mut self, ms: u64) -> Self {
        self.tag_debounce_ms = ms;
        self
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn people_debounce(&self) -> Duration {
        Duration::from_millis(self.people_debounce_ms)
    }

    pub fn tag_debounce(&self) -> Duration {
        Duration::from_millis(self.tag_debounce_ms)
    }
}
