use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Nothing to pack: input list is empty")]
    Empty,

    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("failed to decode '{path}': {source}")]
    InputDecodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unable to fit all sprites into {max_width}x{max_height} (placed {placed}/{total})")]
    PackFailed {
        placed: usize,
        total: usize,
        max_width: u32,
        max_height: u32,
    },

    #[error("failed to write '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
