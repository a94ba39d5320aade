//! Download options handed to the download capability

use crate::utils::config::{Resolution, Settings, VideoFormat};
use std::ffi::OsString;
use std::path::PathBuf;

/// File name pattern for downloads: the video title plus the final extension
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Build the stream selection expression.
///
/// Tries best video and audio streams in the requested container first, then the
/// best single file in that container, then anything at all. A numeric resolution
/// caps the video height at every step that can express it.
pub fn format_expression(resolution: Resolution, format: VideoFormat) -> String {
    match resolution.max_height() {
        None => format!(
            "bestvideo[ext={fmt}]+bestaudio[ext=m4a]/best[ext={fmt}]/best",
            fmt = format
        ),
        Some(height) => format!(
            "bestvideo[height<={h}][ext={fmt}]+bestaudio/best[height<={h}]/best",
            h = height,
            fmt = format
        ),
    }
}

/// Everything the download capability needs for one video
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub url: String,
    pub format: String,
    pub output_template: PathBuf,
    pub merge_output_format: VideoFormat,
    pub transcoder_path: PathBuf,
    pub expand_playlists: bool,
}

impl DownloadRequest {
    pub fn new(url: &str, settings: &Settings, transcoder_path: PathBuf) -> Self {
        Self {
            url: url.to_string(),
            format: format_expression(settings.resolution, settings.format),
            output_template: settings.save_path.join(OUTPUT_TEMPLATE),
            merge_output_format: settings.format,
            transcoder_path,
            expand_playlists: false,
        }
    }

    /// Render as yt-dlp command-line arguments
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.format.clone().into(),
            "-o".into(),
            self.output_template.clone().into(),
            "--merge-output-format".into(),
            self.merge_output_format.as_str().into(),
            "--ffmpeg-location".into(),
            self.transcoder_path.clone().into(),
        ];
        args.push(if self.expand_playlists {
            "--yes-playlist".into()
        } else {
            "--no-playlist".into()
        });
        // one progress line per update, required when stdout is a pipe
        args.push("--newline".into());
        args.push("--".into());
        args.push(self.url.clone().into());
        args
    }
}
