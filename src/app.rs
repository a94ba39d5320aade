//! Application wiring shared by the interactive and headless entry points

use crate::downloader::{DownloadInvoker, DownloadOutcome, YtDlpDownloader};
use crate::session::{effective_settings, SessionOverrides};
use crate::shell::{views, Shell};
use crate::utils::config::ConfigStore;
use crate::utils::platform::PathLocator;
use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

/// Single-threaded runtime the downloads are driven on
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Invoker backed by the yt-dlp executable and ffmpeg on `PATH`
pub fn invoker() -> DownloadInvoker {
    DownloadInvoker::new(Arc::new(YtDlpDownloader::new()), Arc::new(PathLocator))
}

/// Run the interactive menu on stdin/stdout
pub fn run(config_path: PathBuf) -> Result<()> {
    info!("Using config file {}", config_path.display());
    let stdin = io::stdin();
    let mut shell = Shell::new(
        stdin.lock(),
        io::stdout(),
        ConfigStore::new(config_path),
        invoker(),
        runtime()?,
    );
    shell.run()?;
    Ok(())
}

/// Download a single URL with the permanent settings, without the menu.
/// Returns whether the download completed.
pub fn download_once<W: Write>(
    store: &ConfigStore,
    invoker: &DownloadInvoker,
    url: &str,
    output: &mut W,
) -> Result<bool> {
    let settings = effective_settings(store, &SessionOverrides::new());

    let mut write_error = None;
    let outcome = runtime()?.block_on(invoker.download(url, &settings, |event| {
        if let Err(e) = views::download_event(&mut *output, event, &settings) {
            write_error.get_or_insert(e);
        }
    }));
    if let Some(e) = write_error {
        return Err(e.into());
    }

    views::download_outcome(&mut *output, &outcome)?;
    output.flush()?;
    Ok(outcome == DownloadOutcome::Completed)
}
