use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable that overrides the configured store path
pub const FILE_ENV_VAR: &str = "LIFETRACKER_FILE";

/// File name used when nothing else is configured
pub const DEFAULT_DATA_FILE_NAME: &str = "datos_horas.csv";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Path of the CSV store; `None` means the default location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Config {
    pub fn new(data_file: Option<PathBuf>) -> Self {
        Config { data_file }
    }

    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "lifetracker", "lifetracker")
    }

    pub fn get_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Default store location: the project data dir, or the working
    /// directory when no home directory is available
    pub fn default_data_file() -> PathBuf {
        Self::project_dirs()
            .map(|proj_dirs| proj_dirs.data_dir().join(DEFAULT_DATA_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE_NAME))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let config_data = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&config_data).map_err(|e| ConfigError::LoadFailed(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        fs::write(config_path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Resolve the store path: command-line flag, then `LIFETRACKER_FILE`,
    /// then the config file, then the default location
    pub fn resolve_data_file(&self, cli_override: Option<&Path>) -> PathBuf {
        let env_override = env::var_os(FILE_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_with(cli_override, env_override)
    }

    fn resolve_with(&self, cli_override: Option<&Path>, env_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or(env_override)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(Self::default_data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        let config = Config::new(Some(PathBuf::from("/from/config.csv")));
        let cli = PathBuf::from("/from/cli.csv");
        let env = Some(PathBuf::from("/from/env.csv"));

        assert_eq!(config.resolve_with(Some(&cli), env.clone()), cli);
        assert_eq!(
            config.resolve_with(None, env.clone()),
            PathBuf::from("/from/env.csv")
        );
        assert_eq!(
            config.resolve_with(None, None),
            PathBuf::from("/from/config.csv")
        );
        assert_eq!(
            Config::default().resolve_with(None, None),
            Config::default_data_file()
        );
    }

    #[test]
    fn test_default_file_name() {
        assert!(Config::default_data_file().ends_with(DEFAULT_DATA_FILE_NAME));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.json");
        let config = Config::new(Some(PathBuf::from("/tmp/horas.csv")));
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_and_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed(_))
        ));
    }
}

// Made with Bob
