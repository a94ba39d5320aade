//! Utility modules for error handling, configuration and platform lookups

pub mod config;
pub mod error;
pub mod platform;

// Re-export for convenience
pub use config::{ConfigStore, Resolution, Settings, VideoFormat, CONFIG_FILE_NAME};
pub use error::OptiFetchError;
pub use platform::{PathLocator, ToolLocator};
