//! Top-level error type for startup and terminal failures.
//!
//! The simulation itself never fails; everything here is fatal and
//! reported once after the terminal has been restored.

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("assets: {0}")]
    Asset(#[from] AssetError),

    #[error("terminal: {0}")]
    Terminal(#[from] std::io::Error),
}
