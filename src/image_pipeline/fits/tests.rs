use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::common::test_support::{card, fits_bytes, image_data, image_file};
use crate::image_pipeline::fits::{
    BLOCK_SIZE, Card, FitsReader, FitsWriter, StandardFitsReader, StandardFitsWriter,
};

#[test]
fn test_string_value_is_unquoted() {
    let card = Card::parse(&card("BAYERPAT= 'RGGB    '           / Bayer color pattern")).unwrap();

    assert_eq!(card.keyword, "BAYERPAT");
    assert_eq!(card.value.as_deref(), Some("RGGB"));
    assert_eq!(card.comment.as_deref(), Some("Bayer color pattern"));
}

#[test]
fn test_string_value_with_escaped_quote_and_slash() {
    let card = Card::parse(&card("OBJECT  = 'O''Neil 1/2' / target")).unwrap();

    assert_eq!(card.value.as_deref(), Some("O'Neil 1/2"));
    assert_eq!(card.comment.as_deref(), Some("target"));
}

#[test]
fn test_numeric_value_and_comment() {
    let card = Card::parse(&card("EXPTIME =                 30.0 / exposure in seconds")).unwrap();

    assert_eq!(card.keyword, "EXPTIME");
    assert_eq!(card.value.as_deref(), Some("30.0"));
    assert_eq!(card.comment.as_deref(), Some("exposure in seconds"));
}

#[test]
fn test_commentary_card_has_no_value() {
    let card = Card::parse(&card("HISTORY stacked with 12 frames")).unwrap();

    assert_eq!(card.keyword, "HISTORY");
    assert_eq!(card.value, None);
    assert_eq!(card.comment.as_deref(), Some("stacked with 12 frames"));
}

#[test]
fn test_card_rejects_binary_keyword() {
    let mut record = card("SIMPLE  =                    T");
    record[2] = 0x00;

    let result = Card::parse(&record);
    assert!(matches!(result.unwrap_err(), ConversionError::ParseError(_)));
}

#[test]
fn test_card_tolerates_non_ascii_comment() {
    let mut record = card("SET-TEMP=                -10.0 / sensor setpoint in xC");
    record[52] = 0xb0;

    let card = Card::parse(&record).unwrap();

    assert_eq!(card.keyword, "SET-TEMP");
    assert_eq!(card.value.as_deref(), Some("-10.0"));
    assert!(card.comment.as_deref().unwrap().starts_with("sensor setpoint in"));
    assert_eq!(card.as_bytes(), record.as_slice());
}

#[test]
fn test_non_ascii_comment_survives_rewrite() {
    let mut bytes = image_file(Some("RGGB"));
    // INSTRUME is the sixth card; put a degree sign into its comment.
    let column = 5 * 80 + 70;
    bytes[column] = 0xb0;

    let mut fits = StandardFitsReader.read_fits(&bytes).unwrap();
    fits.primary_header_mut().remove_key("BAYERPAT");
    let mut output = Vec::new();
    StandardFitsWriter.write_fits(&fits, &mut output).unwrap();

    assert_eq!(&output[..6 * 80], &bytes[..6 * 80]);
}

#[test]
fn test_end_card_layout() {
    let end = Card::end();

    assert!(end.is_end());
    assert_eq!(end.as_bytes(), card("END").as_slice());
}

#[test]
fn test_read_primary_header() {
    let bytes = image_file(Some("RGGB"));
    let fits = StandardFitsReader.read_fits(&bytes).unwrap();
    let header = fits.primary_header();

    assert_eq!(header.len(), 8);
    assert!(!header.is_empty());
    assert!(header.has_key("BAYERPAT"));
    assert!(!header.has_key("bayerpat"));
    assert_eq!(header.value_of("BAYERPAT"), Some("RGGB"));
    assert_eq!(header.value_of("INSTRUME"), Some("ZWO ASI294MC Pro"));
    assert_eq!(fits.remainder().len(), BLOCK_SIZE);
    assert_eq!(&fits.remainder()[..24], image_data().as_slice());
}

#[test]
fn test_read_rejects_short_file() {
    let result = StandardFitsReader.read_fits(b"SIMPLE  =                    T");

    assert!(matches!(result.unwrap_err(), ConversionError::ParseError(_)));
}

#[test]
fn test_read_rejects_missing_simple() {
    let bytes = fits_bytes(&["XTENSION= 'IMAGE   '", "BITPIX  =                   16"], &[]);
    let result = StandardFitsReader.read_fits(&bytes);

    assert!(matches!(result.unwrap_err(), ConversionError::ParseError(_)));
}

#[test]
fn test_read_rejects_missing_end() {
    let mut bytes = card("SIMPLE  =                    T");
    bytes.resize(BLOCK_SIZE, b' ');

    let result = StandardFitsReader.read_fits(&bytes);
    assert!(matches!(result.unwrap_err(), ConversionError::ParseError(_)));
}

#[test]
fn test_header_spanning_two_blocks() {
    let mut cards = vec!["SIMPLE  =                    T".to_string()];
    for i in 0..40 {
        cards.push(format!("HISTORY step {i}"));
    }
    let refs: Vec<&str> = cards.iter().map(String::as_str).collect();
    let bytes = fits_bytes(&refs, &[1, 2, 3]);

    let fits = StandardFitsReader.read_fits(&bytes).unwrap();

    assert_eq!(fits.primary_header().len(), 41);
    assert_eq!(fits.remainder().len(), BLOCK_SIZE);
    assert_eq!(&fits.remainder()[..3], &[1, 2, 3]);
}

#[test]
fn test_remove_key_removes_duplicates() {
    let bytes = fits_bytes(
        &[
            "SIMPLE  =                    T",
            "BAYERPAT= 'RGGB'",
            "BAYERPAT= 'GBRG'",
        ],
        &[],
    );
    let mut fits = StandardFitsReader.read_fits(&bytes).unwrap();

    assert_eq!(fits.primary_header_mut().remove_key("BAYERPAT"), 2);
    assert!(!fits.primary_header().has_key("BAYERPAT"));
    assert_eq!(fits.primary_header_mut().remove_key("BAYERPAT"), 0);
}

#[test]
fn test_unmodified_file_is_written_back_identically() {
    let bytes = image_file(Some("RGGB"));
    let fits = StandardFitsReader.read_fits(&bytes).unwrap();

    let mut output = Vec::new();
    StandardFitsWriter.write_fits(&fits, &mut output).unwrap();

    assert_eq!(output, bytes);
}

#[test]
fn test_written_file_lacks_removed_key() {
    let bytes = image_file(Some("RGGB"));
    let mut fits = StandardFitsReader.read_fits(&bytes).unwrap();
    fits.primary_header_mut().remove_key("BAYERPAT");

    let mut output = Vec::new();
    StandardFitsWriter.write_fits(&fits, &mut output).unwrap();

    assert_eq!(output.len() % BLOCK_SIZE, 0);
    let reread = StandardFitsReader.read_fits(&output).unwrap();
    assert!(!reread.primary_header().has_key("BAYERPAT"));
    assert_eq!(reread.primary_header().len(), 7);
    assert_eq!(reread.remainder(), fits.remainder());
}

#[test]
fn test_header_shrinks_by_a_block_when_card_removed() {
    // 35 cards plus END fill exactly one block, one more spills into a second.
    let mut cards = vec![
        "SIMPLE  =                    T".to_string(),
        "BAYERPAT= 'BGGR'".to_string(),
    ];
    for i in 0..34 {
        cards.push(format!("HISTORY note {i}"));
    }
    let refs: Vec<&str> = cards.iter().map(String::as_str).collect();
    let bytes = fits_bytes(&refs, &[9; 10]);
    assert_eq!(bytes.len(), 3 * BLOCK_SIZE);

    let mut fits = StandardFitsReader.read_fits(&bytes).unwrap();
    fits.primary_header_mut().remove_key("BAYERPAT");

    let mut output = Vec::new();
    StandardFitsWriter.write_fits(&fits, &mut output).unwrap();

    assert_eq!(output.len(), 2 * BLOCK_SIZE);
    assert_eq!(&output[BLOCK_SIZE..], &bytes[2 * BLOCK_SIZE..]);
}

#[test]
fn test_primary_data_len() {
    let fits = StandardFitsReader.read_fits(&image_file(None)).unwrap();
    assert_eq!(fits.primary_data_len(), Some(24));

    let float = fits_bytes(
        &[
            "SIMPLE  =                    T",
            "BITPIX  =                  -32",
            "NAXIS   =                    2",
            "NAXIS1  =                    4",
            "NAXIS2  =                    3",
        ],
        &[],
    );
    let fits = StandardFitsReader.read_fits(&float).unwrap();
    assert_eq!(fits.primary_data_len(), Some(48));

    let no_axes = fits_bytes(&["SIMPLE  =                    T"], &[]);
    let fits = StandardFitsReader.read_fits(&no_axes).unwrap();
    assert_eq!(fits.primary_data_len(), None);
}
