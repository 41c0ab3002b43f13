use std::path::PathBuf;

use alloyforge::{AlloyForgeError, ConfigError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    AlloyForge(#[from] AlloyForgeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog '{path}': {message}", path = path.display())]
    CatalogParsing { path: PathBuf, message: String },

    #[error("Unsupported catalog format '{}' (expected .toml, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
