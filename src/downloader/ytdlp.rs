//! yt-dlp wrapper for downloading
//!
//! Runs yt-dlp as a child process, streams its output line by line and turns
//! progress lines into [`DownloadEvent`]s.

use crate::downloader::options::DownloadRequest;
use crate::downloader::progress::{parse_line, DownloadEvent};
use crate::downloader::traits::MediaDownloader;
use crate::utils::error::OptiFetchError;
use crate::utils::platform;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// [`MediaDownloader`] backed by the yt-dlp executable
#[derive(Debug, Clone, Default)]
pub struct YtDlpDownloader {
    program: Option<PathBuf>,
    leading_args: Vec<OsString>,
}

impl YtDlpDownloader {
    /// Locate yt-dlp on every download (see [`platform::find_ytdlp`])
    pub fn new() -> Self {
        Self::default()
    }

    /// Run yt-dlp through a launcher, e.g. `python3 -m yt_dlp`
    pub fn with_launcher(program: impl Into<PathBuf>, leading_args: Vec<OsString>) -> Self {
        Self {
            program: Some(program.into()),
            leading_args,
        }
    }

    fn resolve_program(&self) -> Result<PathBuf, OptiFetchError> {
        match &self.program {
            Some(path) => Ok(path.clone()),
            None => platform::find_ytdlp().ok_or(OptiFetchError::YtDlpNotFound),
        }
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        progress_tx: mpsc::Sender<DownloadEvent>,
    ) -> Result<(), OptiFetchError> {
        let program = self.resolve_program()?;
        info!("Downloading {} with {}", request.url, program.display());

        let mut child = AsyncCommand::new(&program)
            .args(&self.leading_args)
            .args(request.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| OptiFetchError::DownloadFailed("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| OptiFetchError::DownloadFailed("yt-dlp stderr unavailable".into()))?;

        let stdout_reader = async {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            while let Some(line) = read_lossy_line(&mut reader, &mut buf).await? {
                debug!("yt-dlp: {}", line);
                if let Some(event) = parse_line(&line) {
                    // receiver gone means nobody is listening, keep draining
                    let _ = progress_tx.send(event).await;
                }
            }
            Ok::<_, std::io::Error>(())
        };

        let stderr_reader = async {
            let mut last_error = None;
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            while let Some(line) = read_lossy_line(&mut reader, &mut buf).await? {
                if let Some(message) = line.strip_prefix("ERROR:") {
                    error!("yt-dlp: {}", line);
                    last_error = Some(message.trim().to_string());
                } else {
                    debug!("yt-dlp stderr: {}", line);
                }
            }
            Ok::<_, std::io::Error>(last_error)
        };

        let (stdout_result, stderr_result, status) =
            tokio::join!(stdout_reader, stderr_reader, child.wait());
        stdout_result?;
        let last_error = stderr_result?;
        let status = status?;

        if status.success() {
            info!("yt-dlp finished: {}", request.url);
            Ok(())
        } else {
            Err(OptiFetchError::DownloadFailed(
                last_error.unwrap_or_else(|| format!("yt-dlp exited with {}", status)),
            ))
        }
    }
}

/// Read one line, replacing invalid UTF-8 so console output in a legacy code
/// page does not end the transfer. `None` at end of stream.
async fn read_lossy_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf[..]);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::utils::config::{Resolution, Settings, VideoFormat};
    use tempfile::TempDir;

    fn request(dir: &TempDir) -> DownloadRequest {
        let settings = Settings {
            save_path: dir.path().to_path_buf(),
            resolution: Resolution::Best,
            format: VideoFormat::Mp4,
        };
        DownloadRequest::new("https://example.com/v", &settings, PathBuf::from("/usr/bin/ffmpeg"))
    }

    /// A shell script standing in for yt-dlp, run through `/bin/sh`
    fn fake_ytdlp(dir: &TempDir, body: &str) -> YtDlpDownloader {
        let script = dir.path().join("fake-yt-dlp.sh");
        std::fs::write(&script, body).unwrap();
        YtDlpDownloader::with_launcher("/bin/sh", vec![script.into_os_string()])
    }

    async fn collect(mut rx: mpsc::Receiver<DownloadEvent>) -> Vec<DownloadEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_run_reports_progress() {
        let dir = TempDir::new().unwrap();
        let downloader = fake_ytdlp(
            &dir,
            "echo '[youtube] abc: Downloading webpage'\n\
             echo '[download]  50.0% of 1.00MiB at 1.00MiB/s ETA 00:01'\n\
             echo '[download] 100% of 1.00MiB in 00:00:01 at 1.00MiB/s'\n\
             echo '[Merger] Merging formats into \"out.mp4\"'\n",
        );
        let request = request(&dir);
        let (tx, rx) = mpsc::channel(16);

        let (result, events) = tokio::join!(downloader.download(&request, tx), collect(rx));

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], DownloadEvent::Progress(_)));
        assert_eq!(events[1], DownloadEvent::Finished);
        assert_eq!(events[2], DownloadEvent::Merging(PathBuf::from("out.mp4")));
    }

    #[tokio::test]
    async fn test_non_utf8_output_does_not_fail_download() {
        let dir = TempDir::new().unwrap();
        // \351 is a cp1252 'é', invalid on its own as UTF-8
        let downloader = fake_ytdlp(
            &dir,
            "printf '[download] Destination: Caf\\351.mp4\\n'\n\
             printf 'WARNING: caf\\351\\n' >&2\n\
             echo '[download] 100% of 1.00MiB in 00:00:01 at 1.00MiB/s'\n\
             exit 0\n",
        );
        let request = request(&dir);
        let (tx, rx) = mpsc::channel(16);

        let (result, events) = tokio::join!(downloader.download(&request, tx), collect(rx));

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(events, vec![DownloadEvent::Finished]);
    }

    #[tokio::test]
    async fn test_read_lossy_line_replaces_invalid_bytes() {
        let mut reader = BufReader::new(&b"Caf\xe9\r\nnext"[..]);
        let mut buf = Vec::new();

        let first = read_lossy_line(&mut reader, &mut buf).await.unwrap();
        assert_eq!(first.as_deref(), Some("Caf\u{FFFD}"));
        let second = read_lossy_line(&mut reader, &mut buf).await.unwrap();
        assert_eq!(second.as_deref(), Some("next"));
        assert_eq!(read_lossy_line(&mut reader, &mut buf).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failure_carries_last_error_line() {
        let dir = TempDir::new().unwrap();
        let downloader = fake_ytdlp(
            &dir,
            "echo 'ERROR: [generic] Unsupported URL: https://example.com/v' >&2\nexit 1\n",
        );
        let (tx, _rx) = mpsc::channel(16);

        let result = downloader.download(&request(&dir), tx).await;
        match result {
            Err(OptiFetchError::DownloadFailed(msg)) => {
                assert!(msg.contains("Unsupported URL"), "unexpected message: {}", msg)
            }
            other => panic!("expected DownloadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_without_error_line_reports_status() {
        let dir = TempDir::new().unwrap();
        let downloader = fake_ytdlp(&dir, "exit 3\n");
        let (tx, _rx) = mpsc::channel(16);

        let result = downloader.download(&request(&dir), tx).await;
        match result {
            Err(OptiFetchError::DownloadFailed(msg)) => assert!(msg.contains("exited")),
            other => panic!("expected DownloadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-yt-dlp");
        let downloader = YtDlpDownloader::with_launcher(missing, Vec::new());
        let (tx, _rx) = mpsc::channel(16);

        let result = downloader.download(&request(&dir), tx).await;
        assert!(matches!(result, Err(OptiFetchError::IoError(_))));
    }

    #[test]
    fn test_downloader_id() {
        assert_eq!(YtDlpDownloader::new().id(), "yt-dlp");
    }
}
