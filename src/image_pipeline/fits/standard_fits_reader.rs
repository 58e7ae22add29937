//! FITS reader that splits a file into primary header cards and an opaque remainder.
//!
//! The header is read in 2880-byte blocks of 80-byte cards until the `END`
//! card. Everything after the last header block is kept as raw bytes.

use tracing::debug;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::reader::FitsReader;
use crate::image_pipeline::fits::types::{
    BLOCK_SIZE, CARD_SIZE, CARDS_PER_BLOCK, Card, FitsFile, Header,
};

/// Every primary header starts with this keyword.
const FIRST_KEYWORD: &str = "SIMPLE";

pub struct StandardFitsReader;

impl FitsReader for StandardFitsReader {
    /// Decodes the primary header of a FITS file.
    ///
    /// Fails with [`ConversionError::ParseError`] if the data is shorter than
    /// one block, does not start with `SIMPLE`, has a non-ASCII keyword
    /// bytes or has no `END` card in its complete blocks.
    fn read_fits(&self, data: &[u8]) -> Result<FitsFile> {
        debug!("Decoding FITS container, {} bytes", data.len());

        if data.len() < BLOCK_SIZE {
            return Err(ConversionError::ParseError(format!(
                "{} bytes is smaller than one {}-byte FITS block",
                data.len(),
                BLOCK_SIZE
            )));
        }

        let complete = data.len() / BLOCK_SIZE * BLOCK_SIZE;
        let mut cards = Vec::new();
        let mut header_len = None;

        for (index, record) in data[..complete].chunks_exact(CARD_SIZE).enumerate() {
            let card = Card::parse(record)?;

            if index == 0 && card.keyword != FIRST_KEYWORD {
                return Err(ConversionError::ParseError(format!(
                    "first keyword is '{}', expected {}",
                    card.keyword, FIRST_KEYWORD
                )));
            }

            if card.is_end() {
                header_len = Some((index / CARDS_PER_BLOCK + 1) * BLOCK_SIZE);
                break;
            }

            cards.push(card);
        }

        let header_len = header_len.ok_or_else(|| {
            ConversionError::ParseError("primary header has no END card".to_string())
        })?;

        debug!(
            cards = cards.len(),
            header_bytes = header_len,
            remainder_bytes = data.len() - header_len,
            "Primary header decoded"
        );

        Ok(FitsFile::new(Header::new(cards), data[header_len..].to_vec()))
    }
}
