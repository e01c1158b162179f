pub mod config;
pub mod nim;
pub mod remap;

pub use config::{ConfigError, DisplayConfig, GameConfig};
pub use nim::{Game, GameResult};
