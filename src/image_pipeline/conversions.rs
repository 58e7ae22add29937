//! Pipeline conversions module
//!
//! This module contains orchestration logic for rewriting FITS headers.

mod strip_bayer;
pub mod types;


pub use strip_bayer::BayerStripPipeline;
pub use types::{ConversionConfig, ConversionConfigBuilder, ConversionOutcome, RunSummary};
