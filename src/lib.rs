//! OptiFetch library

pub mod app;
pub mod downloader;
pub mod session;
pub mod shell;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadInvoker, DownloadOutcome, MediaDownloader, YtDlpDownloader};
pub use session::{effective_settings, SessionOverrides};
pub use shell::menu::MenuState;
pub use shell::Shell;
pub use utils::{ConfigStore, OptiFetchError, Resolution, Settings, VideoFormat};
