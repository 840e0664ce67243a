//! Configuration loading from ~/.calctl/config.toml.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use serde::Deserialize;

const DB_ENV: &str = "CALCTL_DB";
const CONFIG_DIR: &str = ".calctl";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "events.json";

/// Top-level configuration.
///
/// Everything is optional; an absent config file means defaults. The
/// resolved values are passed into command handlers explicitly rather than
/// read from globals.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the events journal. Overridden by `CALCTL_DB` and `--db`.
    pub database: Option<PathBuf>,

    /// First day of the week for `--week` views (default: monday).
    pub week_start: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `~/.calctl/config.toml` if it exists, defaults otherwise.
    pub fn discover() -> Result<Self, ConfigError> {
        let Some(dir) = config_home() else {
            return Ok(Self::default());
        };
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the journal path: the `--db` flag wins, then `CALCTL_DB`,
    /// then the config file, then `~/.calctl/events.json`.
    pub fn database(&self, flag: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if let Some(env) = std::env::var_os(DB_ENV) {
            return Ok(PathBuf::from(env));
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        config_home()
            .map(|dir| dir.join(DB_FILE))
            .ok_or(ConfigError::NoHome)
    }

    /// First day of the week for `--week` filters.
    pub fn week_start(&self) -> Result<Weekday, ConfigError> {
        match &self.week_start {
            Some(raw) => {
                Weekday::from_str(raw).map_err(|_| ConfigError::BadWeekStart(raw.clone()))
            }
            None => Ok(Weekday::Mon),
        }
    }
}

fn config_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_DIR))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid week_start '{0}', expected a weekday name like 'monday'")]
    BadWeekStart(String),

    #[error("cannot determine home directory; pass --db or set CALCTL_DB")]
    NoHome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
database = "/tmp/calendar.json"
week_start = "sunday"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.database.as_deref(), Some(Path::new("/tmp/calendar.json")));
        assert_eq!(config.week_start().unwrap(), Weekday::Sun);
    }

    #[test]
    fn defaults_apply_when_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.database, None);
        assert_eq!(config.week_start().unwrap(), Weekday::Mon);
    }

    #[test]
    fn bad_week_start_is_rejected() {
        let config = Config::parse("week_start = \"someday\"").unwrap();
        assert!(matches!(config.week_start(), Err(ConfigError::BadWeekStart(_))));
    }

    #[test]
    fn flag_beats_configured_database() {
        let config = Config::parse("database = \"/tmp/from-config.json\"").unwrap();
        let resolved = config.database(Some(PathBuf::from("/tmp/from-flag.json"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/from-flag.json"));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        assert!(matches!(
            Config::parse("databse = \"typo.json\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
