//! Error types for EmoLabel.

use thiserror::Error;

/// Main error type for EmoLabel operations.
#[derive(Error, Debug)]
pub enum EmoLabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid time '{0}': expected HH:MM:SS.mmm")]
    InvalidTime(String),

    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Media error: {0}")]
    Media(String),
}

impl EmoLabelError {
    /// Input errors abort an import or edit without committing anything.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Csv(_) | Self::InvalidTime(_) | Self::EmptyInput(_) | Self::Serialization(_)
        )
    }

    /// Resource errors leave the previously active source in place.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::Capture(_) | Self::Media(_))
    }
}

/// Result type alias for EmoLabel operations.
pub type Result<T> = std::result::Result<T, EmoLabelError>;
