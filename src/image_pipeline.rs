//! Image processing pipeline module
//!
//! This module provides a structured approach to relabeling FITS files,
//! with separate modules for FITS reading and writing, directory scanning
//! and conversion orchestration.

pub mod fits;
pub mod scanner;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use fits::{
    Card,
    FitsFile,
    FitsReader,
    FitsWriter,
    Header,
    StandardFitsReader,
    StandardFitsWriter,
};

pub use scanner::{
    matches_fits_pattern,
    prepare_output_dir,
    scan_directory,
};

pub use conversions::{
    BayerStripPipeline,
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionOutcome,
    RunSummary,
};
