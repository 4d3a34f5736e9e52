//! Error types for the accordion crate.
//!
//! Accordion operations themselves never fail: stale views and tickets are
//! ignored. Only loading configuration can produce an error.

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading an [`AccordionConfig`](crate::AccordionConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Failed to parse accordion config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value that cannot be used.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// Create a value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
