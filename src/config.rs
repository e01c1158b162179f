use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_TAKE: u32 = 3;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("max_take must be at least 1")]
    ZeroMaxTake,
    #[error("display.ball must not be empty")]
    EmptyBall,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub ball: String,
    pub separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            ball: "o".to_string(),
            separator: "---------------".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    // Largest number of balls a single move may take
    pub max_take: u32,
    pub display: DisplayConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_take: DEFAULT_MAX_TAKE,
            display: DisplayConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_take == 0 {
            return Err(ConfigError::ZeroMaxTake);
        }
        if self.display.ball.is_empty() {
            return Err(ConfigError::EmptyBall);
        }
        Ok(())
    }
}
