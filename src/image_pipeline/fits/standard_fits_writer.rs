use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::{BLOCK_SIZE, CARDS_PER_BLOCK, Card, FitsFile};
use crate::image_pipeline::fits::writer::FitsWriter;

pub struct StandardFitsWriter;

impl FitsWriter for StandardFitsWriter {
    fn write_fits(&self, file: &FitsFile, output: &mut dyn Write) -> Result<()> {
        let header = file.primary_header();
        debug!("Encoding FITS header: {} cards", header.len());

        let blocks = (header.len() + 1).div_ceil(CARDS_PER_BLOCK);
        let mut buffer = Vec::with_capacity(blocks * BLOCK_SIZE);
        for card in header.cards() {
            buffer.extend_from_slice(card.as_bytes());
        }
        buffer.extend_from_slice(Card::end().as_bytes());

        // Header blocks are padded with ASCII blanks.
        let padded_len = buffer.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
        buffer.resize(padded_len, b' ');

        output.write_all(&buffer)?;
        output.write_all(file.remainder())?;

        debug!(
            header_bytes = padded_len,
            remainder_bytes = file.remainder().len(),
            "FITS encoding complete"
        );
        Ok(())
    }
}
