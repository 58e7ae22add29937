//! Builders for small in-memory FITS files used across the unit tests.

use crate::image_pipeline::fits::{BLOCK_SIZE, CARD_SIZE};

/// Pads a card image to 80 bytes.
pub fn card(text: &str) -> Vec<u8> {
    assert!(text.len() <= CARD_SIZE, "card text too long: {text}");
    format!("{:<width$}", text, width = CARD_SIZE).into_bytes()
}

/// Builds a FITS file from header card images and a data segment.
///
/// `END` is appended, the header is padded with blanks and the data with
/// zeros, each to whole blocks.
pub fn fits_bytes(cards: &[&str], data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for text in cards {
        bytes.extend(card(text));
    }
    bytes.extend(card("END"));
    bytes.resize(bytes.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, b' ');

    let data_start = bytes.len();
    bytes.extend_from_slice(data);
    let data_len = bytes.len() - data_start;
    bytes.resize(data_start + data_len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE, 0);
    bytes
}

/// A 4x3 16-bit image header, optionally carrying a Bayer pattern.
pub fn image_cards(bayer: Option<&str>) -> Vec<String> {
    let mut cards = vec![
        "SIMPLE  =                    T / conforms to FITS standard".to_string(),
        "BITPIX  =                   16 / array data type".to_string(),
        "NAXIS   =                    2 / number of array dimensions".to_string(),
        "NAXIS1  =                    4".to_string(),
        "NAXIS2  =                    3".to_string(),
        "INSTRUME= 'ZWO ASI294MC Pro'   / camera".to_string(),
    ];
    if let Some(pattern) = bayer {
        cards.push(format!("BAYERPAT= '{pattern}'             / Bayer color pattern"));
    }
    cards.push("EXPTIME =                 30.0 / exposure in seconds".to_string());
    cards
}

/// Pixel bytes matching [`image_cards`].
pub fn image_data() -> Vec<u8> {
    (0u8..24).map(|v| v.wrapping_mul(37)).collect()
}

/// A complete test image, optionally carrying a Bayer pattern.
pub fn image_file(bayer: Option<&str>) -> Vec<u8> {
    let cards = image_cards(bayer);
    let refs: Vec<&str> = cards.iter().map(String::as_str).collect();
    fits_bytes(&refs, &image_data())
}
