//! Platform-specific utilities for OptiFetch
//!
//! This module provides cross-platform helpers for:
//! - The default download directory
//! - Locating external executables (yt-dlp, ffmpeg)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the transcoder used to merge audio and video streams
pub const TRANSCODER: &str = "ffmpeg";

/// Returns the default download directory
/// - All platforms: ~/Downloads
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using ./Downloads");
            PathBuf::from("Downloads")
        })
}

/// Finds external tools on the executable search path.
pub trait ToolLocator: Send + Sync {
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// [`ToolLocator`] backed by a `PATH` lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        match which::which(tool) {
            Ok(path) => {
                debug!("Found {} at {}", tool, path.display());
                Some(path)
            }
            Err(e) => {
                debug!("{} not found in PATH: {}", tool, e);
                None
            }
        }
    }
}

/// Installation hints printed when a required tool is missing
pub fn install_hints(tool: &str) -> Vec<String> {
    match tool {
        TRANSCODER => vec![
            "winget install ffmpeg".to_string(),
            "brew install ffmpeg".to_string(),
            "sudo apt install ffmpeg".to_string(),
            "or download from: https://ffmpeg.org/download.html".to_string(),
        ],
        "yt-dlp" => vec![
            "pip install yt-dlp".to_string(),
            "brew install yt-dlp".to_string(),
            "or visit: https://github.com/yt-dlp/yt-dlp".to_string(),
        ],
        other => vec![format!("install {} and add it to your PATH", other)],
    }
}

/// Find yt-dlp binary with priority:
/// 1. Next to the running executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(adjacent) = find_adjacent_ytdlp() {
        info!("Using bundled yt-dlp: {}", adjacent.display());
        return Some(adjacent);
    }

    if let Ok(path) = which::which(ytdlp_binary_name()) {
        info!("Using system yt-dlp: {}", path.display());
        return Some(path);
    }

    if let Some(common) = find_in_common_paths() {
        info!("Using yt-dlp from common path: {}", common.display());
        return Some(common);
    }

    warn!("yt-dlp not found anywhere");
    None
}

fn ytdlp_binary_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

fn find_adjacent_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join(ytdlp_binary_name());
    (candidate.is_file() && is_executable(&candidate)).then_some(candidate)
}

fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin/yt-dlp"),
        // macOS Homebrew (Intel)
        PathBuf::from("/usr/local/bin/yt-dlp"),
        PathBuf::from("/usr/bin/yt-dlp"),
    ];
    if let Some(home) = dirs::home_dir() {
        // pip --user
        candidates.push(home.join(".local").join("bin").join("yt-dlp"));
    }

    candidates
        .into_iter()
        .find(|path| path.is_file() && is_executable(path))
}

/// Check if a file is executable
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}
