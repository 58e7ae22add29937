use tracing::{debug, info, instrument};
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::types::{ConversionConfig, ConversionOutcome, RunSummary},
    fits::{FitsFile, FitsReader, FitsWriter, StandardFitsReader, StandardFitsWriter},
    scanner,
};

/// Removes the Bayer pattern keyword from the primary header of every FITS
/// file in a directory, writing relabeled copies to the output directory.
pub struct BayerStripPipeline<R: FitsReader, W: FitsWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl BayerStripPipeline<StandardFitsReader, StandardFitsWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardFitsReader,
            writer: StandardFitsWriter,
            config,
        }
    }
}

impl<R: FitsReader, W: FitsWriter> BayerStripPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Decodes `input_data` and removes the Bayer key from its primary header.
    ///
    /// Returns `None` when the key is absent, in which case nothing should be
    /// written.
    pub fn strip(&self, input_data: &[u8]) -> Result<Option<FitsFile>> {
        let mut fits = {
            let _span = tracing::info_span!("decode_fits").entered();
            self.reader.read_fits(input_data)?
        };

        if let Some(len) = fits.primary_data_len() {
            debug!(
                cards = fits.primary_header().len(),
                data_bytes = len,
                "Primary HDU"
            );
        }

        let key = self.config.bayer_key.as_str();
        let header = fits.primary_header_mut();
        if !header.has_key(key) {
            return Ok(None);
        }

        info!("Deleting {}", key);
        header.remove_key(key);
        Ok(Some(fits))
    }

    /// In-memory conversion: writes the stripped file to `output` and returns
    /// whether the key was present. Nothing is written when it was not.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<bool> {
        match self.strip(input_data)? {
            Some(fits) => {
                let _span = tracing::info_span!("encode_fits").entered();
                self.writer.write_fits(&fits, output)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Processes one input file.
    ///
    /// The output file is created with create-new semantics, so an existing
    /// destination aborts with [`ConversionError::DestinationExists`].
    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<ConversionOutcome> {
        let input_path = input_path.as_ref();
        let file_name = input_path.file_name().ok_or_else(|| {
            ConversionError::InputReadError(format!(
                "{}: not a valid file name",
                input_path.display()
            ))
        })?;

        info!("Processing {}", file_name.to_string_lossy());

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let fits = self.strip(&input_data).map_err(|e| match e {
            ConversionError::ParseError(msg) => {
                ConversionError::ParseError(format!("{}: {}", input_path.display(), msg))
            }
            other => other,
        })?;

        let Some(fits) = fits else {
            info!(
                "No {} in {}, skipping",
                self.config.bayer_key,
                file_name.to_string_lossy()
            );
            return Ok(ConversionOutcome::Skipped);
        };

        let output_path = self.config.output_path_for(file_name);
        info!("Writing result to {}", output_path.display());

        let output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&output_path)
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => {
                        ConversionError::DestinationExists(output_path.clone())
                    }
                    _ => ConversionError::OutputWriteError(format!(
                        "{}: {}",
                        output_path.display(),
                        e
                    )),
                })?
        };

        {
            let _span = tracing::info_span!("encode_fits").entered();
            let mut output = BufWriter::new(output_file);
            self.writer
                .write_fits(&fits, &mut output)
                .map_err(|e| match e {
                    ConversionError::IoError(e) => ConversionError::OutputWriteError(format!(
                        "{}: {}",
                        output_path.display(),
                        e
                    )),
                    other => other,
                })?;
            output.flush().map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(ConversionOutcome::Converted {
            output: output_path,
        })
    }

    /// Scans the input directory and converts every candidate in order.
    ///
    /// The first error ends the run; files written before it stay on disk.
    #[instrument(skip(self))]
    pub fn run(&self) -> Result<RunSummary> {
        info!("Looking for files in {}", self.config.input_dir.display());

        scanner::prepare_output_dir(&self.config)?;
        let candidates = scanner::scan_directory(&self.config)?;

        let mut summary = RunSummary::default();
        for path in &candidates {
            summary.record(self.convert_file(path)?);
        }

        info!(
            converted = summary.converted.len(),
            skipped = summary.skipped,
            "Run complete"
        );
        Ok(summary)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
