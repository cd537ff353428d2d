//! DirectoryError for people/tag lookups

/// Error type for directory lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The directory could not be reached or refused the request.
    #[error("Directory unavailable: {message}")]
    Unavailable { message: String },

    /// A create request carried an empty or whitespace-only label.
    #[error("Invalid label '{label}'")]
    InvalidLabel { label: String },
}

impl DirectoryError {
    /// Creates a new unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a new invalid label error.
    pub fn invalid_label(label: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
        }
    }
}
