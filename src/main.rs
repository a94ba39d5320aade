//! OptiFetch - interactive YouTube downloader
//!
//! A terminal front-end for yt-dlp with permanent and per-session download
//! settings. Streams are merged with ffmpeg.

use anyhow::Result;
use clap::Parser;
use optifetch::app;
use optifetch::utils::CONFIG_FILE_NAME;
use optifetch::ConfigStore;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Permanent settings file
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Download a single URL with the saved settings and exit
    #[arg(long, value_name = "URL")]
    download: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stderr keeps it out of the menus
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if let Some(url) = args.download {
        let store = ConfigStore::new(args.config);
        let completed = app::download_once(&store, &app::invoker(), &url, &mut std::io::stdout())?;
        if !completed {
            std::process::exit(1);
        }
        return Ok(());
    }

    app::run(args.config)
}
