use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::FitsFile;

pub trait FitsReader {
    fn read_fits(&self, data: &[u8]) -> Result<FitsFile>;
}
