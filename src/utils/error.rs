//! Error handling for OptiFetch

use thiserror::Error;

/// Main error type for OptiFetch
#[derive(Debug, Error)]
pub enum OptiFetchError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("{tool} is required to merge video and audio, but it was not found in PATH")]
    TranscoderNotFound { tool: String },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
