//! Interactive menu shell
//!
//! A small state machine over [`MenuState`]. Each step renders one menu, reads one
//! line and returns the next state. Settings are re-read on every step so that the
//! menus always show what is on disk combined with the session overrides.

pub mod menu;
pub mod views;

use crate::downloader::DownloadInvoker;
use crate::session::{effective_settings, SessionOverrides};
use crate::utils::config::{ConfigStore, Resolution, Settings, VideoFormat};
use menu::{MainChoice, MenuState, SettingsChoice};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Terminal front-end owning the session overrides
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: ConfigStore,
    session: SessionOverrides,
    invoker: DownloadInvoker,
    runtime: Runtime,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        input: R,
        output: W,
        store: ConfigStore,
        invoker: DownloadInvoker,
        runtime: Runtime,
    ) -> Self {
        Self {
            input,
            output,
            store,
            session: SessionOverrides::new(),
            invoker,
            runtime,
        }
    }

    pub fn session(&self) -> &SessionOverrides {
        &self.session
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Consume the shell, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Settings the next download would use
    pub fn effective_settings(&self) -> Settings {
        effective_settings(&self.store, &self.session)
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        views::welcome(&mut self.output)?;

        let mut state = MenuState::Main;
        while state != MenuState::Exit {
            state = self.step(state)?;
        }

        views::goodbye(&mut self.output)?;
        self.output.flush()
    }

    /// Handle one prompt in `state` and return the next state
    pub fn step(&mut self, state: MenuState) -> io::Result<MenuState> {
        debug!("Menu state: {:?}", state);
        match state {
            MenuState::Main => self.main_menu(),
            MenuState::TemporarySettings => self.temporary_menu(),
            MenuState::PermanentSettings => self.permanent_menu(),
            MenuState::Exit => Ok(MenuState::Exit),
        }
    }

    fn main_menu(&mut self) -> io::Result<MenuState> {
        views::main_menu(&mut self.output)?;
        let Some(choice) = self.prompt("Select option (1-6): ")? else {
            return Ok(MenuState::Exit);
        };

        match MainChoice::parse(&choice) {
            Some(MainChoice::Download) => self.download()?,
            Some(MainChoice::ViewSettings) => {
                let settings = self.effective_settings();
                views::current_settings(&mut self.output, &settings)?;
            }
            Some(MainChoice::TemporarySettings) => {
                views::temporary_header(&mut self.output)?;
                return Ok(MenuState::TemporarySettings);
            }
            Some(MainChoice::PermanentSettings) => {
                views::permanent_header(&mut self.output)?;
                return Ok(MenuState::PermanentSettings);
            }
            Some(MainChoice::Reset) => self.reset()?,
            Some(MainChoice::Exit) => return Ok(MenuState::Exit),
            None => writeln!(self.output, "Invalid choice! Please try again.")?,
        }
        Ok(MenuState::Main)
    }

    fn temporary_menu(&mut self) -> io::Result<MenuState> {
        let settings = self.effective_settings();
        views::settings_menu(&mut self.output, &settings)?;
        let Some(choice) = self.prompt("\nSelect option to change (1-4): ")? else {
            return Ok(MenuState::Exit);
        };

        match SettingsChoice::parse(&choice) {
            Some(SettingsChoice::Resolution) => {
                if let Some(resolution) = self.prompt_resolution()? {
                    self.session.resolution = Some(resolution);
                }
            }
            Some(SettingsChoice::Format) => {
                if let Some(format) = self.prompt_format()? {
                    self.session.format = Some(format);
                }
            }
            Some(SettingsChoice::SavePath) => {
                if let Some(path) = self.prompt_save_path(&settings.save_path)? {
                    self.session.save_path = Some(path);
                }
            }
            Some(SettingsChoice::Back) => return Ok(MenuState::Main),
            None => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(MenuState::TemporarySettings)
    }

    fn permanent_menu(&mut self) -> io::Result<MenuState> {
        let mut config = self.store.load();
        views::settings_menu(&mut self.output, &config)?;
        let Some(choice) = self.prompt("\nSelect option to change (1-4): ")? else {
            return Ok(MenuState::Exit);
        };

        match SettingsChoice::parse(&choice) {
            Some(SettingsChoice::Resolution) => {
                if let Some(resolution) = self.prompt_resolution()? {
                    config.resolution = resolution;
                    self.persist(&config)?;
                }
            }
            Some(SettingsChoice::Format) => {
                if let Some(format) = self.prompt_format()? {
                    config.format = format;
                    self.persist(&config)?;
                }
            }
            Some(SettingsChoice::SavePath) => {
                if let Some(path) = self.prompt_save_path(&config.save_path)? {
                    config.save_path = path;
                    self.persist(&config)?;
                }
            }
            Some(SettingsChoice::Back) => return Ok(MenuState::Main),
            None => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(MenuState::PermanentSettings)
    }

    fn download(&mut self) -> io::Result<()> {
        let Some(url) = self.prompt("\nEnter YouTube URL: ")? else {
            return Ok(());
        };
        if url.is_empty() {
            return writeln!(self.output, "Invalid URL!");
        }

        let settings = self.effective_settings();
        let Self {
            output,
            invoker,
            runtime,
            ..
        } = self;

        let mut write_error = None;
        let outcome = runtime.block_on(invoker.download(&url, &settings, |event| {
            if let Err(e) = views::download_event(&mut *output, event, &settings) {
                write_error.get_or_insert(e);
            }
        }));
        if let Some(e) = write_error {
            return Err(e);
        }
        views::download_outcome(&mut self.output, &outcome)
    }

    fn reset(&mut self) -> io::Result<()> {
        let answer = self.prompt("\nReset to default settings? (y/n): ")?;
        if !answer.as_deref().is_some_and(menu::is_confirmed) {
            return Ok(());
        }

        if self.persist(&Settings::default())? {
            self.session.clear();
            writeln!(self.output, "✓ Reset to defaults!")?;
        }
        Ok(())
    }

    /// Save permanent settings, reporting failures without leaving the menu.
    /// Returns whether the write succeeded.
    fn persist(&mut self, settings: &Settings) -> io::Result<bool> {
        match self.store.save(settings) {
            Ok(()) => {
                writeln!(self.output, "✓ Configuration saved permanently!")?;
                Ok(true)
            }
            Err(e) => {
                warn!("Saving {} failed: {}", self.store.path().display(), e);
                writeln!(self.output, "❌ Failed to save configuration: {}", e)?;
                Ok(false)
            }
        }
    }

    /// `None` when input has ended
    fn prompt_resolution(&mut self) -> io::Result<Option<Resolution>> {
        views::resolution_options(&mut self.output)?;
        let Some(choice) = self.prompt("Select resolution (1-5): ")? else {
            return Ok(None);
        };

        match menu::resolution_choice(&choice) {
            Ok(resolution) => Ok(Some(resolution)),
            Err(fallback) => {
                writeln!(self.output, "Invalid choice. Using '{}' quality.", fallback)?;
                Ok(Some(fallback))
            }
        }
    }

    /// `None` when input has ended
    fn prompt_format(&mut self) -> io::Result<Option<VideoFormat>> {
        views::format_options(&mut self.output)?;
        let Some(choice) = self.prompt("Select format (1-3): ")? else {
            return Ok(None);
        };

        match menu::format_choice(&choice) {
            Ok(format) => Ok(Some(format)),
            Err(fallback) => {
                writeln!(self.output, "Invalid choice. Using '{}'.", fallback)?;
                Ok(Some(fallback))
            }
        }
    }

    /// Ask for a new save directory. `None` means keep the current one.
    fn prompt_save_path(&mut self, current: &Path) -> io::Result<Option<PathBuf>> {
        writeln!(self.output, "\nCurrent save path: {}", current.display())?;
        let input = self.prompt("Enter new save path (or press Enter to keep current): ")?;
        let Some(input) = input.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let path = PathBuf::from(input);
        if path.is_dir() {
            return Ok(Some(path));
        }
        if path.exists() {
            writeln!(self.output, "Not a directory: {}", path.display())?;
            return Ok(None);
        }

        let answer = self.prompt("Path doesn't exist. Create it? (y/n): ")?;
        if !answer.as_deref().is_some_and(menu::is_confirmed) {
            return Ok(None);
        }

        match std::fs::create_dir_all(&path) {
            Ok(()) => Ok(Some(path)),
            Err(e) => {
                writeln!(self.output, "Error creating path: {}", e)?;
                Ok(None)
            }
        }
    }

    /// Print `message` and read one trimmed line; `None` at end of input.
    /// Bytes that are not UTF-8 are replaced, so they read as an invalid choice.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}
