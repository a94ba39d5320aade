//! Menu states and choice parsing

use crate::utils::config::{Resolution, VideoFormat};

/// Where the shell is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    TemporarySettings,
    PermanentSettings,
    Exit,
}

/// Main menu entries (1-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Download,
    ViewSettings,
    TemporarySettings,
    PermanentSettings,
    Reset,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MainChoice::Download),
            "2" => Some(MainChoice::ViewSettings),
            "3" => Some(MainChoice::TemporarySettings),
            "4" => Some(MainChoice::PermanentSettings),
            "5" => Some(MainChoice::Reset),
            "6" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// Settings sub-menu entries (1-4), shared by the temporary and permanent menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChoice {
    Resolution,
    Format,
    SavePath,
    Back,
}

impl SettingsChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SettingsChoice::Resolution),
            "2" => Some(SettingsChoice::Format),
            "3" => Some(SettingsChoice::SavePath),
            "4" => Some(SettingsChoice::Back),
            _ => None,
        }
    }
}

/// Map a 1-based menu number onto `options`
fn pick<T: Copy>(options: &[T], input: &str) -> Option<T> {
    let index = input.trim().parse::<usize>().ok()?;
    options.get(index.checked_sub(1)?).copied()
}

/// Resolution for a menu number (1-5), falling back to best
pub fn resolution_choice(input: &str) -> Result<Resolution, Resolution> {
    pick(&Resolution::ALL, input).ok_or(Resolution::Best)
}

/// Format for a menu number (1-3), falling back to mp4
pub fn format_choice(input: &str) -> Result<VideoFormat, VideoFormat> {
    pick(&VideoFormat::ALL, input).ok_or(VideoFormat::Mp4)
}

/// `y` (any case) confirms, anything else declines
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
