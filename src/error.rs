// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the whole pipeline. Every error is raised at the
/// point of detection; nothing is retried and partial outputs are kept.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("band has zero value range (max == min); cannot normalize")]
    DegenerateBand,

    #[error("{0} not calculated; call calculate_band() first")]
    NotComputed(String),

    #[error("no components fitted; call fit() first")]
    NotFitted,

    #[error("no images matched collection pattern: {0}")]
    EmptyCollection(String),

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("no write permission for directory: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("unsupported pixel format in raster")]
    UnsupportedPixelFormat,

    #[error("TIFF error: {0}")]
    Decode(#[from] tiff::TiffError),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
