//! Error types

use thiserror::Error;

/// Fatal setup errors. A run cannot start until these are resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Viewport dimensions must be positive and finite
    #[error("invalid viewport {width}x{height}: dimensions must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },
    /// Stored settings could not be parsed
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
