//! Download module: yt-dlp invocation and progress reporting

pub mod invoker;
pub mod options;
pub mod progress;
pub mod traits;
pub mod ytdlp;

// Re-export for convenience
pub use invoker::{DownloadInvoker, DownloadOutcome};
pub use options::{format_expression, DownloadRequest};
pub use progress::{DownloadEvent, DownloadProgress};
pub use traits::MediaDownloader;
pub use ytdlp::YtDlpDownloader;
