use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::FitsFile;

pub trait FitsWriter {
    fn write_fits(&self, file: &FitsFile, output: &mut dyn Write) -> Result<()>;
}
