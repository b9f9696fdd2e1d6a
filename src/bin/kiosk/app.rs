//! Kiosk - application builder and runner

use std::io::stdout;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use log::info;

use what_is_music::{
    content::{Language, Theme},
    KioskConfig,
};

use super::ui::UiApp;

/// Main application builder
pub struct Kiosk {
    config: KioskConfig,
}

impl Kiosk {
    pub fn new() -> Self {
        Self {
            config: KioskConfig::default(),
        }
    }

    /// Language shown on the menu
    pub fn language(mut self, language: Language) -> Self {
        self.config = self.config.language(language);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config = self.config.theme(theme);
        self
    }

    /// Starting tempo for the rhythm and tempo screens
    pub fn bpm(mut self, bpm: u32) -> Self {
        self.config = self.config.bpm(bpm);
        self
    }

    /// Run the kiosk (takes over the terminal until the visitor quits)
    ///
    /// No audio device is touched here. The output stream opens on the
    /// first gesture that makes a sound.
    pub fn run(self) -> EyreResult<()> {
        info!("kiosk config: {:?}", self.config);

        let mut terminal = ratatui::init();
        if let Err(err) = execute!(stdout(), EnableMouseCapture) {
            ratatui::restore();
            return Err(err).wrap_err("failed to enable mouse capture");
        }

        let result = UiApp::new(self.config).run(&mut terminal);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        info!("kiosk stopped");
        result
    }
}

impl Default for Kiosk {
    fn default() -> Self {
        Self::new()
    }
}
