use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing archive artifact: {}", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No correction settings for site '{0}'")]
    UnknownSite(String),

    #[error("Collaborator stage {stage} failed: {status}")]
    Collaborator {
        stage: String,
        status: std::process::ExitStatus,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
