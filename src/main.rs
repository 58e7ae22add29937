use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fits_mono::image_pipeline::{BayerStripPipeline, ConversionConfig};
use fits_mono::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fits_mono")]
#[command(version, about = "Strip Bayer pattern metadata from FITS files", long_about = None)]
struct Cli {
    /// Directory containing the .fit / .fits files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ConversionConfig::for_directory(&cli.directory);
    let pipeline = BayerStripPipeline::new(config);

    info!("Output directory: {}", pipeline.config().output_dir.display());

    let summary = pipeline
        .run()
        .with_context(|| format!("Processing {} failed", cli.directory.display()))?;

    info!(
        "Done: {} converted, {} skipped",
        summary.converted.len(),
        summary.skipped
    );
    Ok(())
}
