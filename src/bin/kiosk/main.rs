//! kiosk - the "What Is Music?" exhibition in a terminal
//!
//! Run with: cargo run --bin kiosk -- [--lang en|th] [--theme light|dark] [--bpm N] [--verbose]

mod app;
mod audio;
mod ui;

use std::fs::File;

use app::Kiosk;
use color_eyre::eyre::{eyre, Result as EyreResult};
use what_is_music::content::{Language, Theme};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("what-is-music")
        .join("kiosk.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(file) => file,
        Err(_) => match File::create(std::env::temp_dir().join("kiosk.log")) {
            Ok(file) => file,
            // Nowhere to write; run without a log rather than refuse to start.
            Err(_) => return,
        },
    };

    let _ = WriteLogger::init(log_level, Config::default(), log_file);

    log::info!("kiosk starting (log level: {:?})", log_level);
}

/// Command-line flags, all optional.
#[derive(Debug, Default)]
struct Args {
    language: Option<Language>,
    theme: Option<Theme>,
    bpm: Option<u32>,
    verbose: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> EyreResult<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--verbose" | "-v" => parsed.verbose = true,
                "--lang" => {
                    let value = args.next().ok_or_else(|| eyre!("--lang needs a value"))?;
                    parsed.language = Some(
                        Language::from_code(&value)
                            .ok_or_else(|| eyre!("unknown language '{value}' (expected en or th)"))?,
                    );
                }
                "--theme" => {
                    let value = args.next().ok_or_else(|| eyre!("--theme needs a value"))?;
                    parsed.theme = Some(
                        Theme::from_name(&value)
                            .ok_or_else(|| eyre!("unknown theme '{value}' (expected light or dark)"))?,
                    );
                }
                "--bpm" => {
                    let value = args.next().ok_or_else(|| eyre!("--bpm needs a value"))?;
                    parsed.bpm = Some(
                        value
                            .parse()
                            .map_err(|_| eyre!("--bpm expects a whole number, got '{value}'"))?,
                    );
                }
                other => return Err(eyre!("unrecognised argument '{other}'")),
            }
        }
        Ok(parsed)
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let args = Args::parse(std::env::args().skip(1))?;
    init_logging(args.verbose);

    let mut kiosk = Kiosk::new();
    if let Some(language) = args.language {
        kiosk = kiosk.language(language);
    }
    if let Some(theme) = args.theme {
        kiosk = kiosk.theme(theme);
    }
    if let Some(bpm) = args.bpm {
        kiosk = kiosk.bpm(bpm);
    }
    kiosk.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> EyreResult<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_parse() {
        let args = parse(&["--lang", "th", "--theme", "light", "--bpm", "90", "-v"]).unwrap();
        assert_eq!(args.language, Some(Language::Th));
        assert_eq!(args.theme, Some(Theme::Light));
        assert_eq!(args.bpm, Some(90));
        assert!(args.verbose);
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(parse(&["--lang", "fr"]).is_err());
        assert!(parse(&["--bpm"]).is_err());
        assert!(parse(&["--bpm", "fast"]).is_err());
        assert!(parse(&["--loud"]).is_err());
    }
}
