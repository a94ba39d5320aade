use crate::downloader::options::DownloadRequest;
use crate::downloader::progress::DownloadEvent;
use crate::utils::error::OptiFetchError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// The external download capability.
///
/// Given a [`DownloadRequest`], fetch the media and write it where the request's
/// output template points. Progress is reported through `progress_tx`; a closed
/// receiver must not abort the transfer.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Returns a unique identifier for this downloader (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    async fn download(
        &self,
        request: &DownloadRequest,
        progress_tx: mpsc::Sender<DownloadEvent>,
    ) -> Result<(), OptiFetchError>;
}
