//! Download invoker: checks preconditions and delegates to the download capability

use crate::downloader::options::DownloadRequest;
use crate::downloader::progress::DownloadEvent;
use crate::downloader::traits::MediaDownloader;
use crate::utils::config::Settings;
use crate::utils::error::OptiFetchError;
use crate::utils::platform::{self, ToolLocator, TRANSCODER};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// How a download attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Completed,
    /// A required executable is missing; nothing was downloaded
    MissingTool { tool: String, hints: Vec<String> },
    Failed(String),
}

/// Runs a single download with the given settings.
///
/// Every error ends up in the returned [`DownloadOutcome`]; callers never see a
/// `Result`.
pub struct DownloadInvoker {
    downloader: Arc<dyn MediaDownloader>,
    locator: Arc<dyn ToolLocator>,
}

impl DownloadInvoker {
    pub fn new(downloader: Arc<dyn MediaDownloader>, locator: Arc<dyn ToolLocator>) -> Self {
        Self {
            downloader,
            locator,
        }
    }

    /// Download `url` using `settings`, reporting events through `on_event`
    pub async fn download<F>(
        &self,
        url: &str,
        settings: &Settings,
        mut on_event: F,
    ) -> DownloadOutcome
    where
        F: FnMut(&DownloadEvent),
    {
        match self.try_download(url, settings, &mut on_event).await {
            Ok(()) => DownloadOutcome::Completed,
            Err(OptiFetchError::TranscoderNotFound { tool }) => {
                error!("{} not found in PATH", tool);
                DownloadOutcome::MissingTool {
                    hints: platform::install_hints(&tool),
                    tool,
                }
            }
            Err(OptiFetchError::YtDlpNotFound) => DownloadOutcome::MissingTool {
                tool: "yt-dlp".to_string(),
                hints: platform::install_hints("yt-dlp"),
            },
            Err(e) => {
                error!("Download of {} failed: {}", url, e);
                DownloadOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_download<F>(
        &self,
        url: &str,
        settings: &Settings,
        on_event: &mut F,
    ) -> Result<(), OptiFetchError>
    where
        F: FnMut(&DownloadEvent),
    {
        let transcoder = self
            .locator
            .locate(TRANSCODER)
            .ok_or_else(|| OptiFetchError::TranscoderNotFound {
                tool: TRANSCODER.to_string(),
            })?;
        on_event(&DownloadEvent::TranscoderLocated(transcoder.clone()));

        if !settings.save_path.exists() {
            debug!("Creating save directory {}", settings.save_path.display());
        }
        tokio::fs::create_dir_all(&settings.save_path).await?;

        let request = DownloadRequest::new(url, settings, transcoder);
        info!(
            "Starting {} download of {} (format {})",
            self.downloader.id(),
            request.url,
            request.format
        );

        let (progress_tx, mut progress_rx) = mpsc::channel(32);
        let transfer = self.downloader.download(&request, progress_tx);
        let report = async {
            while let Some(event) = progress_rx.recv().await {
                on_event(&event);
            }
        };

        let (result, ()) = tokio::join!(transfer, report);
        result
    }
}
