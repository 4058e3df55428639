//! Run settings for the `xhsnote` binary.
//!
//! Each setting is taken from the command line first, then from a `.env`
//! file, then from the built-in default. The `.env` file is read with
//! `dotenvy` but never exported into the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::cli::Cli;
use crate::fetcher::DEFAULT_TIMEOUT;

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_TIMEOUT: &str = "XHSNOTE_TIMEOUT";
pub const ENV_USER_AGENT: &str = "XHSNOTE_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "XHSNOTE_LOG_LEVEL";
pub const ENV_SAVE_LOG: &str = "XHSNOTE_SAVE_LOG";
pub const ENV_LOG_DIR: &str = "XHSNOTE_LOG_DIR";
pub const ENV_OUTPUT_DIR: &str = "XHSNOTE_OUTPUT_DIR";
pub const ENV_INPUT_FILE: &str = "XHSNOTE_INPUT_FILE";

/// Key/value pairs read from a `.env` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvValues(HashMap<String, String>);

impl EnvValues {
    /// Parse the `.env` file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotAFile(path.to_path_buf()));
        }

        let env_error = |source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };
        let mut values = HashMap::new();
        for entry in dotenvy::from_path_iter(path).map_err(env_error)? {
            let (key, value) = entry.map_err(env_error)?;
            values.insert(key, value);
        }

        Ok(Self(values))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but an empty value counts as unset.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Load `explicit`, which must exist, or `./.env` when it happens to exist.
pub fn load_env_file(explicit: Option<&Path>) -> Result<EnvValues, ConfigError> {
    match explicit {
        Some(path) if !path.exists() => Err(ConfigError::MissingEnvFile(path.to_path_buf())),
        Some(path) => EnvValues::load(path),
        None => {
            let default = Path::new(DEFAULT_ENV_PATH);
            if default.exists() {
                EnvValues::load(default)
            } else {
                Ok(EnvValues::default())
            }
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub log_level: LevelFilter,
    pub save_log: bool,
    pub log_dir: PathBuf,
    pub output_dir: PathBuf,
    pub input_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            log_level: LevelFilter::INFO,
            save_log: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            input_file: None,
        }
    }
}

impl Settings {
    /// Load the `.env` file named by the CLI (or the default one) and resolve.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let env = load_env_file(cli.env_file.as_deref())?;
        Self::from_sources(cli, &env)
    }

    pub fn from_sources(cli: &Cli, env: &EnvValues) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout = match (cli.timeout, env.get(ENV_TIMEOUT)) {
            (Some(secs), _) => Duration::from_secs(secs),
            (None, Some(raw)) => Duration::from_secs(parse_integer(ENV_TIMEOUT, raw)?),
            (None, None) => defaults.timeout,
        };

        let log_level = match (cli.log_level, env.get(ENV_LOG_LEVEL)) {
            (Some(level), _) => level,
            (None, Some(raw)) => parse_log_level(raw)?,
            (None, None) => defaults.log_level,
        };

        let save_log = match (cli.save_log_flag(), env.get(ENV_SAVE_LOG)) {
            (Some(flag), _) => flag,
            (None, Some(raw)) => parse_bool(ENV_SAVE_LOG, raw)?,
            (None, None) => defaults.save_log,
        };

        let user_agent = cli
            .user_agent
            .as_deref()
            .filter(|agent| !agent.is_empty())
            .or_else(|| env.non_empty(ENV_USER_AGENT))
            .map(String::from);

        let log_dir = cli
            .log_dir
            .clone()
            .or_else(|| env.non_empty(ENV_LOG_DIR).map(expand_home))
            .unwrap_or(defaults.log_dir);

        let output_dir = cli
            .output
            .clone()
            .or_else(|| env.non_empty(ENV_OUTPUT_DIR).map(expand_home))
            .unwrap_or(defaults.output_dir);

        let input_file = cli
            .input_file
            .clone()
            .or_else(|| env.non_empty(ENV_INPUT_FILE).map(expand_home));

        Ok(Self {
            timeout,
            user_agent,
            log_level,
            save_log,
            log_dir,
            output_dir,
            input_file,
        })
    }
}

/// Accepts the usual level names case-insensitively, plus `warning` and
/// `critical`.
pub fn parse_log_level(raw: &str) -> Result<LevelFilter, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::OFF),
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        _ => Err(ConfigError::UnknownLogLevel(raw.to_string())),
    }
}

fn parse_integer(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidInteger {
        key,
        value: raw.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (raw, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(".env file not found: {}", .0.display())]
    MissingEnvFile(PathBuf),

    #[error(".env path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to read .env file at {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("{key} must be an integer, got {value:?}")]
    InvalidInteger { key: &'static str, value: String },

    #[error("{key} must be true/false (also yes/no, on/off, 1/0), got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("xhsnote").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(&cli(&["u"]), &EnvValues::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_env_values_used_without_flags() {
        let env: EnvValues = [
            (ENV_TIMEOUT, "30"),
            (ENV_USER_AGENT, "agent/2"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_SAVE_LOG, "yes"),
            (ENV_LOG_DIR, "/var/log/xhs"),
            (ENV_OUTPUT_DIR, "/data/notes"),
            (ENV_INPUT_FILE, "urls.txt"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_sources(&cli(&[]), &env).unwrap();

        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.user_agent.as_deref(), Some("agent/2"));
        assert_eq!(settings.log_level, LevelFilter::WARN);
        assert!(settings.save_log);
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/xhs"));
        assert_eq!(settings.output_dir, PathBuf::from("/data/notes"));
        assert_eq!(settings.input_file, Some(PathBuf::from("urls.txt")));
    }

    #[test]
    fn test_flags_override_env() {
        let env: EnvValues = [
            (ENV_TIMEOUT, "30"),
            (ENV_SAVE_LOG, "true"),
            (ENV_OUTPUT_DIR, "/data/notes"),
            (ENV_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_sources(
            &cli(&["--timeout", "5", "--no-save-log", "-o", "out", "--log-level", "error"]),
            &env,
        )
        .unwrap();

        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(!settings.save_log);
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.log_level, LevelFilter::ERROR);
    }

    #[test]
    fn test_empty_env_values_fall_back() {
        let env: EnvValues = [(ENV_OUTPUT_DIR, ""), (ENV_USER_AGENT, "")].into_iter().collect();
        let settings = Settings::from_sources(&cli(&[]), &env).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.user_agent, None);
    }

    #[test]
    fn test_invalid_env_values() {
        let env: EnvValues = [(ENV_TIMEOUT, "soon")].into_iter().collect();
        assert!(matches!(
            Settings::from_sources(&cli(&[]), &env),
            Err(ConfigError::InvalidInteger { key: ENV_TIMEOUT, .. })
        ));

        let env: EnvValues = [(ENV_SAVE_LOG, "maybe")].into_iter().collect();
        assert!(matches!(
            Settings::from_sources(&cli(&[]), &env),
            Err(ConfigError::InvalidBool { key: ENV_SAVE_LOG, .. })
        ));

        let env: EnvValues = [(ENV_LOG_LEVEL, "loud")].into_iter().collect();
        assert!(matches!(
            Settings::from_sources(&cli(&[]), &env),
            Err(ConfigError::UnknownLogLevel(_))
        ));
    }

    #[test]
    fn test_invalid_env_value_ignored_when_flag_given() {
        let env: EnvValues = [(ENV_TIMEOUT, "soon")].into_iter().collect();
        let settings = Settings::from_sources(&cli(&["--timeout", "3"]), &env).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_log_level("critical").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_log_level(" info ").unwrap(), LevelFilter::INFO);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_load_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# settings\nXHSNOTE_TIMEOUT=20\nexport XHSNOTE_OUTPUT_DIR=\"my notes\"\n\nXHSNOTE_USER_AGENT='ua/1'\n",
        )
        .unwrap();

        let env = load_env_file(Some(&path)).unwrap();

        assert_eq!(env.get(ENV_TIMEOUT), Some("20"));
        assert_eq!(env.get(ENV_OUTPUT_DIR), Some("my notes"));
        assert_eq!(env.get(ENV_USER_AGENT), Some("ua/1"));
        assert_eq!(env.get("XHSNOTE_LOG_DIR"), None);
    }

    #[test]
    fn test_explicit_env_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.env");

        assert!(matches!(
            load_env_file(Some(&missing)),
            Err(ConfigError::MissingEnvFile(_))
        ));
        assert!(matches!(
            load_env_file(Some(dir.path())),
            Err(ConfigError::NotAFile(_))
        ));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/notes"), home.join("notes"));
        }
    }
}
