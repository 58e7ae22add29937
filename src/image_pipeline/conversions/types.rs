//! Run configuration and per-file results

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Keyword that records the color filter array layout of the sensor.
pub const DEFAULT_BAYER_KEY: &str = "BAYERPAT";

/// Name of the output directory created inside the input directory.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "converted-to-mono";

/// Prefix added to the file name of every rewritten file.
pub const DEFAULT_OUTPUT_PREFIX: &str = "mono_";

/// Configuration for a header-stripping run, built once at startup.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Directory scanned for FITS files
    pub input_dir: PathBuf,
    /// Directory that receives the rewritten files
    pub output_dir: PathBuf,
    /// Primary header keyword to remove
    pub bayer_key: String,
    /// Prefix for output file names
    pub output_prefix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::for_directory(".")
    }
}

impl ConversionConfig {
    /// Default settings for `dir`, writing into `dir/converted-to-mono`.
    pub fn for_directory<P: AsRef<Path>>(dir: P) -> Self {
        let input_dir = dir.as_ref().to_path_buf();
        Self {
            output_dir: input_dir.join(DEFAULT_OUTPUT_SUBDIR),
            input_dir,
            bayer_key: DEFAULT_BAYER_KEY.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    /// Destination for an input file name: `<output_dir>/<prefix><name>`.
    pub fn output_path_for<S: AsRef<OsStr>>(&self, file_name: S) -> PathBuf {
        let mut name = OsString::from(&self.output_prefix);
        name.push(file_name);
        self.output_dir.join(name)
    }
}

/// Builder for ConversionConfig
///
/// Unset fields fall back to [`ConversionConfig::for_directory`] of the
/// chosen input directory.
#[derive(Default)]
pub struct ConversionConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    bayer_key: Option<String>,
    output_prefix: Option<String>,
}

impl ConversionConfigBuilder {
    pub fn input_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn bayer_key<S: Into<String>>(mut self, key: S) -> Self {
        self.bayer_key = Some(key.into());
        self
    }

    pub fn output_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = match self.input_dir {
            Some(dir) => ConversionConfig::for_directory(dir),
            None => ConversionConfig::default(),
        };
        ConversionConfig {
            input_dir: default.input_dir,
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            bayer_key: self.bayer_key.unwrap_or(default.bayer_key),
            output_prefix: self.output_prefix.unwrap_or(default.output_prefix),
        }
    }
}

/// What happened to a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The key was removed and the result written to `output`
    Converted { output: PathBuf },
    /// The primary header had no Bayer key; nothing was written
    Skipped,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub converted: Vec<PathBuf>,
    pub skipped: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Converted { output } => self.converted.push(output),
            ConversionOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.converted.len() + self.skipped
    }
}
