//! Startup errors for the orrery binary.

use orrery_config::ConfigError;
use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start input reader: {0}")]
    Input(#[source] std::io::Error),
}
