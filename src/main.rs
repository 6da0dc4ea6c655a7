mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use env_logger::{Env, Target};
use keytrainer::{
    app_dirs::AppDirs,
    attempt_log::AttemptLog,
    config::{Config, ConfigStore, FileConfigStore},
    language::SupportedLanguage,
    navigation::Navigator,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TrainerEvent},
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
};

/// keyboard trainer: timed typing attempts, practice tasks and attempt history
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words in the generated text
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// language to pull words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// seconds of countdown before typing starts (0 to skip)
    #[clap(short = 'c', long)]
    countdown: Option<u64>,

    /// attempt log file to append to and read statistics from
    #[clap(long)]
    history: Option<PathBuf>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay the flags given on the command line onto `config`
    fn apply(&self, mut config: Config) -> Config {
        if let Some(words) = self.words {
            config.word_count = words;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(countdown) = self.countdown {
            config.countdown_secs = countdown;
        }
        config
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        match store.save(&config) {
            Ok(()) => info!("saved config to {}", store.path().display()),
            Err(e) => warn!("unable to save config to {}: {}", store.path().display(), e),
        }
    }

    let history = cli.history.clone().unwrap_or_else(AppDirs::attempts_path);
    let mut nav = Navigator::new(config, AttemptLog::with_path(history))?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut nav);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    nav: &mut Navigator,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| ui::draw(nav, f))?;

    while !nav.should_quit() {
        let step = runner.step();
        nav.on_tick(step.delta);

        if let TrainerEvent::Key(key) = step.event {
            nav.on_key(key);
        }

        terminal.draw(|f| ui::draw(nav, f))?;
    }

    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["keytrainer"]);

        assert_eq!(cli.words, None);
        assert_eq!(cli.language, None);
        assert_eq!(cli.countdown, None);
        assert_eq!(cli.history, None);
        assert!(!cli.save_config);
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_words() {
        let cli = Cli::parse_from(["keytrainer", "-w", "25"]);
        assert_eq!(cli.words, Some(25));

        let cli = Cli::parse_from(["keytrainer", "--words", "50"]);
        assert_eq!(cli.apply(Config::default()).word_count, 50);
    }

    #[test]
    fn test_cli_language() {
        let cli = Cli::parse_from(["keytrainer", "-l", "english"]);
        assert_eq!(cli.language, Some(SupportedLanguage::English));

        let cli = Cli::parse_from(["keytrainer", "--language", "russian"]);
        assert_eq!(
            cli.apply(Config::default()).language,
            SupportedLanguage::Russian
        );
    }

    #[test]
    fn test_cli_countdown_and_history() {
        let cli = Cli::parse_from([
            "keytrainer",
            "--countdown",
            "0",
            "--history",
            "/tmp/attempts.csv",
            "--save-config",
        ]);
        let config = cli.apply(Config::default());

        assert_eq!(config.countdown_secs, 0);
        assert_eq!(cli.history, Some(PathBuf::from("/tmp/attempts.csv")));
        assert!(cli.save_config);
    }

    #[test]
    fn test_cli_keeps_loaded_values_without_flags() {
        let loaded = Config {
            word_count: 7,
            countdown_secs: 9,
            ..Config::default()
        };
        let cli = Cli::parse_from(["keytrainer", "-w", "12"]);
        let config = cli.apply(loaded);

        assert_eq!(config.word_count, 12);
        assert_eq!(config.countdown_secs, 9);
    }

    #[test]
    fn test_cli_rejects_unknown_language() {
        let err = Cli::try_parse_from(["keytrainer", "-l", "klingon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
