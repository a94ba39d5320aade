//! Text rendering for menus, settings and download reports

use crate::downloader::{DownloadEvent, DownloadOutcome};
use crate::utils::config::{Resolution, Settings, VideoFormat};
use crate::utils::platform;
use std::io::{self, Write};
use tracing::debug;

pub fn welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n🎥 Welcome to OptiFetch!")
}

pub fn goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nGoodbye! 👋")
}

pub fn main_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "          OptiFetch - YouTube Downloader")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "1. Download Video")?;
    writeln!(out, "2. View Current Settings")?;
    writeln!(out, "3. Change Settings (Temporary)")?;
    writeln!(out, "4. Change Settings (Permanent)")?;
    writeln!(out, "5. Reset to Default Settings")?;
    writeln!(out, "6. Exit")?;
    writeln!(
        out,
        "Side note: the default save path is {}",
        platform::default_download_dir().display()
    )?;
    writeln!(out, "{}", "=".repeat(60))
}

pub fn current_settings(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    writeln!(out, "\n{}", "-".repeat(60))?;
    writeln!(out, "       CURRENT SETTINGS")?;
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "Save Path:    {}", settings.save_path.display())?;
    writeln!(out, "Resolution:   {}", settings.resolution)?;
    writeln!(out, "Format:       {}", settings.format)?;
    writeln!(out, "{}", "-".repeat(60))
}

pub fn temporary_header(out: &mut impl Write) -> io::Result<()> {
    section_header(out, "TEMPORARY SETTINGS (This Session Only)")
}

pub fn permanent_header(out: &mut impl Write) -> io::Result<()> {
    section_header(out, "PERMANENT SETTINGS (Saved for Future Use)")
}

fn section_header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "       {}", title)?;
    writeln!(out, "{}", "=".repeat(50))
}

/// Sub-menu listing the values being edited
pub fn settings_menu(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    writeln!(out, "\n1. Resolution: {}", settings.resolution)?;
    writeln!(out, "2. Format: {}", settings.format)?;
    writeln!(out, "3. Save Path: {}", settings.save_path.display())?;
    writeln!(out, "4. Back to Main Menu")
}

pub fn resolution_options(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nResolution Options:")?;
    for (i, resolution) in Resolution::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, resolution.label())?;
    }
    Ok(())
}

pub fn format_options(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nFormat Options:")?;
    for (i, format) in VideoFormat::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, format.label())?;
    }
    Ok(())
}

pub fn download_banner(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    writeln!(out, "\n📥 Downloading with settings:")?;
    writeln!(out, "   Resolution: {}", settings.resolution)?;
    writeln!(out, "   Format: {}", settings.format)?;
    writeln!(out, "   Save Path: {}\n", settings.save_path.display())
}

/// Progress callback output. Percentages only go to the log.
pub fn download_event(
    out: &mut impl Write,
    event: &DownloadEvent,
    settings: &Settings,
) -> io::Result<()> {
    match event {
        DownloadEvent::TranscoderLocated(path) => {
            writeln!(out, "✓ {} found at: {}", platform::TRANSCODER, path.display())?;
            download_banner(out, settings)
        }
        DownloadEvent::Progress(progress) => {
            debug!(
                "{:.1}% of {} bytes at {:.0} B/s",
                progress.percentage, progress.total_bytes, progress.speed
            );
            Ok(())
        }
        DownloadEvent::Finished => writeln!(out, "\n✓ Done downloading!"),
        DownloadEvent::Merging(target) => {
            writeln!(out, "Merging formats into {}", target.display())
        }
    }
}

pub fn download_outcome(out: &mut impl Write, outcome: &DownloadOutcome) -> io::Result<()> {
    match outcome {
        DownloadOutcome::Completed => Ok(()),
        DownloadOutcome::MissingTool { tool, hints } => {
            writeln!(out, "\n❌ Error: {} is required but was not found in PATH.", tool)?;
            writeln!(out, "   Please install {}:", tool)?;
            for hint in hints {
                writeln!(out, "   - {}", hint)?;
            }
            Ok(())
        }
        DownloadOutcome::Failed(message) => writeln!(out, "Error downloading: {}", message),
    }
}
