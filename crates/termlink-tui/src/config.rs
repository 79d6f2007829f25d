//! Settings: built-in defaults, then the JSON settings file, then CLI flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use termlink_core::SessionConfig;
use tracing::debug;

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::theme::ThemeName;

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub panels: Option<usize>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub words: Option<usize>,
    pub attempts: Option<usize>,
    pub theme: Option<ThemeName>,
    pub stats: Option<bool>,
}

impl FileConfig {
    /// Default location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termlink").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file named on the command line, or the default one if it
    /// exists. A missing default file is not an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) => match Self::load(&path) {
                Err(AppError::ConfigRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "no settings file");
                    Ok(Self::default())
                }
                other => other,
            },
            None => Ok(Self::default()),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub session: SessionConfig,
    pub theme: ThemeName,
    pub seed: Option<u64>,
    pub record_stats: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: &FileConfig) -> Self {
        let defaults = SessionConfig::default();
        let session = SessionConfig {
            panels: cli.panels.or(file.panels).unwrap_or(defaults.panels),
            rows: cli.rows.or(file.rows).unwrap_or(defaults.rows),
            columns: cli.columns.or(file.columns).unwrap_or(defaults.columns),
            word_count: cli.words.or(file.words).unwrap_or(defaults.word_count),
            max_attempts: cli.attempts.or(file.attempts).unwrap_or(defaults.max_attempts),
        };
        Self {
            session,
            theme: cli.theme.or(file.theme).unwrap_or_default(),
            seed: cli.seed,
            record_stats: !cli.no_stats && file.stats.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["termlink", "words.txt"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = Settings::resolve(&cli(&[]), &FileConfig::default());
        assert_eq!(settings.session, SessionConfig::default());
        assert_eq!(settings.theme, ThemeName::Green);
        assert!(settings.record_stats);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            panels: Some(2),
            rows: Some(17),
            attempts: Some(6),
            theme: Some(ThemeName::Amber),
            stats: Some(false),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(&cli(&["--attempts", "3", "--seed", "9"]), &file);
        assert_eq!(settings.session.panels, 2);
        assert_eq!(settings.session.rows, 17);
        assert_eq!(settings.session.max_attempts, 3);
        assert_eq!(settings.session.columns, SessionConfig::default().columns);
        assert_eq!(settings.theme, ThemeName::Amber);
        assert_eq!(settings.seed, Some(9));
        assert!(!settings.record_stats);
    }

    #[test]
    fn test_load_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": 17, "theme": "high-contrast"}}"#).unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, Some(17));
        assert_eq!(config.theme, Some(ThemeName::HighContrast));
        assert_eq!(config.panels, None);
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lines": 17}}"#).unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = FileConfig::discover(Some(Path::new("/no/such/termlink.json"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
