//! Command-line flags and resolved runtime configuration.

use clap::Parser;
use mailroom_core::{default_log_level, DEFAULT_CAPACITY_HINT};
use std::path::{Path, PathBuf};

const LETTERS_DIR_NAME: &str = "thank_you_messages";

/// Interactive donor tracking with thank-you letters.
#[derive(Debug, Parser)]
#[command(name = "mailroom", version, about)]
pub struct Cli {
    /// Root directory for thank-you letters [default: ~/Desktop/thank_you_messages]
    #[arg(long, env = "MAILROOM_LETTERS_DIR")]
    pub letters_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "MAILROOM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files [default: ~/.mailroom/logs]
    #[arg(long, env = "MAILROOM_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Start with an empty donor collection
    #[arg(long)]
    pub no_seed: bool,

    /// Storage hint for the donor collection; not a limit
    #[arg(long, default_value_t = DEFAULT_CAPACITY_HINT)]
    pub capacity_hint: usize,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub letters_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub seed_demo_data: bool,
    pub capacity_hint: usize,
}

impl AppConfig {
    /// Resolves flags against the user's home and current directories.
    pub fn from_cli(cli: Cli) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve(cli, home_dir().as_deref(), &cwd)
    }

    fn resolve(cli: Cli, home: Option<&Path>, cwd: &Path) -> Self {
        let base = home.unwrap_or(cwd);
        let letters_dir = cli
            .letters_dir
            .unwrap_or_else(|| base.join("Desktop").join(LETTERS_DIR_NAME));
        let log_dir = cli
            .log_dir
            .unwrap_or_else(|| base.join(".mailroom").join("logs"));

        Self {
            letters_dir: absolutize(letters_dir, cwd),
            log_level: cli
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: absolutize(log_dir, cwd),
            seed_demo_data: !cli.no_seed,
            capacity_hint: cli.capacity_hint,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Cli};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mailroom").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults_resolve_under_home() {
        let config = AppConfig::resolve(
            Cli {
                letters_dir: None,
                log_level: None,
                log_dir: None,
                no_seed: false,
                capacity_hint: 10,
            },
            Some(Path::new("/home/donor")),
            Path::new("/work"),
        );

        assert_eq!(
            config.letters_dir,
            PathBuf::from("/home/donor/Desktop/thank_you_messages")
        );
        assert_eq!(config.log_dir, PathBuf::from("/home/donor/.mailroom/logs"));
        assert_eq!(config.log_level, mailroom_core::default_log_level());
        assert!(config.seed_demo_data);
        assert_eq!(config.capacity_hint, 10);
    }

    #[test]
    fn missing_home_falls_back_to_current_directory() {
        let config = AppConfig::resolve(
            Cli {
                letters_dir: None,
                log_level: None,
                log_dir: None,
                no_seed: false,
                capacity_hint: 10,
            },
            None,
            Path::new("/work"),
        );
        assert_eq!(
            config.letters_dir,
            PathBuf::from("/work/Desktop/thank_you_messages")
        );
    }

    #[test]
    fn flags_override_defaults_and_relative_paths_use_cwd() {
        let parsed = cli(&[
            "--letters-dir",
            "letters",
            "--log-dir",
            "/var/log/mailroom",
            "--log-level",
            "warn",
            "--no-seed",
            "--capacity-hint",
            "25",
        ]);
        let config = AppConfig::resolve(parsed, Some(Path::new("/home/donor")), Path::new("/work"));

        assert_eq!(config.letters_dir, PathBuf::from("/work/letters"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/mailroom"));
        assert_eq!(config.log_level, "warn");
        assert!(!config.seed_demo_data);
        assert_eq!(config.capacity_hint, 25);
    }

    #[test]
    fn capacity_hint_rejects_non_numeric_value() {
        let result = Cli::try_parse_from(["mailroom", "--capacity-hint", "lots"]);
        assert!(result.is_err());
    }
}
