use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of a project-local config, found by walking up from the target.
pub const PROJECT_CONFIG_FILE: &str = ".tuck.toml";

const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: indent_width must be at least 1")]
    InvalidIndentWidth { config_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Spaces added per indent level when wrapping.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.indent_width == 0 {
            return Err(ConfigError::InvalidIndentWidth {
                config_path: config_path.to_path_buf(),
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config for a file in `start_dir`: the nearest `.tuck.toml` in it or
    /// an ancestor, else the user config, else the defaults.
    pub fn discover<P: AsRef<Path>>(start_dir: P) -> Result<Self, ConfigError> {
        if let Some(config) = Self::find_project_config(start_dir)? {
            return Ok(config);
        }
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn find_project_config<P: AsRef<Path>>(start_dir: P) -> Result<Option<Self>, ConfigError> {
        for dir in start_dir.as_ref().ancestors() {
            if let Some(config) = Self::load_from_path(dir.join(PROJECT_CONFIG_FILE))? {
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/tuck");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
