//! Download settings and their on-disk store

use crate::utils::error::OptiFetchError;
use crate::utils::platform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the permanent settings document, relative to the working directory
pub const CONFIG_FILE_NAME: &str = "youtube_downloader_config.json";

/// Download settings
///
/// Missing keys in a stored document are filled from [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory downloads are written to
    pub save_path: PathBuf,

    /// Maximum video height to fetch
    pub resolution: Resolution,

    /// Container the streams are merged into
    pub format: VideoFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: platform::default_download_dir(),
            resolution: Resolution::Best,
            format: VideoFormat::Mp4,
        }
    }
}

/// Video resolution ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "best")]
    Best,
    #[serde(rename = "1080")]
    P1080,
    #[serde(rename = "720")]
    P720,
    #[serde(rename = "480")]
    P480,
    #[serde(rename = "360")]
    P360,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Best,
        Resolution::P1080,
        Resolution::P720,
        Resolution::P480,
        Resolution::P360,
    ];

    /// Value as stored on disk and shown in menus
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Best => "best",
            Resolution::P1080 => "1080",
            Resolution::P720 => "720",
            Resolution::P480 => "480",
            Resolution::P360 => "360",
        }
    }

    /// Height ceiling in pixels, `None` for best available
    pub fn max_height(&self) -> Option<u32> {
        match self {
            Resolution::Best => None,
            Resolution::P1080 => Some(1080),
            Resolution::P720 => Some(720),
            Resolution::P480 => Some(480),
            Resolution::P360 => Some(360),
        }
    }

    /// Human readable menu label
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Best => "Best Quality (auto-select)",
            Resolution::P1080 => "1080p (Full HD)",
            Resolution::P720 => "720p (HD)",
            Resolution::P480 => "480p (SD)",
            Resolution::P360 => "360p (Low)",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Mkv,
    Webm,
}

impl VideoFormat {
    pub const ALL: [VideoFormat; 3] = [VideoFormat::Mp4, VideoFormat::Mkv, VideoFormat::Webm];

    /// File extension, also the yt-dlp container name
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Mkv => "mkv",
            VideoFormat::Webm => "webm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "MP4 (Most Compatible)",
            VideoFormat::Mkv => "MKV (Higher Quality)",
            VideoFormat::Webm => "WEBM (Web Format)",
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permanent settings stored as a single JSON document.
///
/// The file is read on every [`ConfigStore::load`] so edits made outside the
/// program between menu actions are picked up.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored settings, falling back to defaults on any failure.
    ///
    /// Missing file, unreadable file and malformed JSON are all treated the same.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(OptiFetchError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                Settings::default()
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable config {}: {}",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Read the stored settings, reporting why they could not be read
    pub fn try_load(&self) -> Result<Settings, OptiFetchError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    /// Overwrite the stored settings, pretty-printed with a 4-space indent
    pub fn save(&self, settings: &Settings) -> Result<(), OptiFetchError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        settings.serialize(&mut serializer)?;

        std::fs::write(&self.path, buf)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
