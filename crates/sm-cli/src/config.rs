//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sm_core::DateFormat;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the run file (`.json` or `.lss`).
    pub run_path: PathBuf,
    /// How session dates are displayed.
    pub date_format: DateFormat,
    /// Global split index locating the current game when the run file marks none.
    pub current_split: Option<u32>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("run_path", &self.run_path)
            .field("date_format", &self.date_format)
            .field("current_split", &self.current_split)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            run_path: data_dir.join("run.json"),
            date_format: DateFormat::default(),
            current_split: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SPLITS_*)
        figment = figment.merge(Env::prefixed("SPLITS_"));

        figment.extract()
    }

    /// Replaces the run file when one is given on the command line.
    #[must_use]
    pub fn with_run_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.run_path = path;
        }
        self
    }
}

/// Returns the platform-specific config directory for splits.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("splits"))
}

/// Returns the platform-specific data directory for splits.
///
/// On Linux: `~/.local/share/splits`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("splits"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_splits() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "splits");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_run() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.run_path, data_dir.join("run.json"));
        assert_eq!(config.date_format, DateFormat::Iso8601);
        assert_eq!(config.current_split, None);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "run_path = \"/runs/2024.lss\"\ndate_format = \"dmy-name\"\ncurrent_split = 12\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.run_path, PathBuf::from("/runs/2024.lss"));
        assert_eq!(config.date_format, DateFormat::DayMonthName);
        assert_eq!(config.current_split, Some(12));
    }

    #[test]
    fn test_command_line_file_wins() {
        let config = Config::default().with_run_path(Some(PathBuf::from("other.json")));
        assert_eq!(config.run_path, PathBuf::from("other.json"));

        let config = Config::default().with_run_path(None);
        assert_eq!(config.run_path, Config::default().run_path);
    }
}
