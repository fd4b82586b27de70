use std::path::PathBuf;

use thiserror::Error;

/// Failure loading or checking an engine config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Anything that stops a headless run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("snapshot output failed: {0}")]
    Output(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
