//! Errors surfaced by the shell.

use kolam_core::{KolamError, StorageError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("container width {0} is too small for a drawing surface")]
    NoSurface(f64),
    #[error(transparent)]
    Kolam(#[from] KolamError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AppResult<T> = Result<T, AppError>;
