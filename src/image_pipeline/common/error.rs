use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to parse FITS file: {0}")]
    ParseError(String),

    #[error("Destination file already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
