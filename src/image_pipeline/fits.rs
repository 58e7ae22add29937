//! FITS container module
//!
//! Reads a FITS file into its primary header cards plus the untouched
//! remainder of the file, and writes it back out. Pixel data is never decoded.

mod reader;
mod writer;
mod standard_fits_reader;
mod standard_fits_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use reader::FitsReader;
pub use writer::FitsWriter;
pub use standard_fits_reader::StandardFitsReader;
pub use standard_fits_writer::StandardFitsWriter;
pub use types::{Card, FitsFile, Header, BLOCK_SIZE, CARD_SIZE};
