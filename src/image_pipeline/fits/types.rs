//! FITS container types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Size of a FITS logical block. Headers and data both occupy whole blocks.
pub const BLOCK_SIZE: usize = 2880;

/// Size of a single header keyword record.
pub const CARD_SIZE: usize = 80;

pub(crate) const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

const KEYWORD_LEN: usize = 8;
const VALUE_INDICATOR: &str = "= ";
const END_KEYWORD: &str = "END";

/// One 80-byte keyword record of a header.
///
/// The original bytes are kept so that cards which are not edited are
/// written back exactly as they were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Keyword name with trailing blanks removed (e.g. `BAYERPAT`)
    pub keyword: String,
    /// Value field; string values are unquoted with trailing blanks removed
    pub value: Option<String>,
    /// Comment after the `/` separator, or the text of a commentary card
    pub comment: Option<String>,
    raw: [u8; CARD_SIZE],
}

impl Card {
    /// Parses a single keyword record.
    ///
    /// The keyword field must be printable ASCII, otherwise the bytes are not a
    /// FITS header. Stray bytes in the value or comment are tolerated; the card
    /// is written back from its original bytes anyway.
    pub fn parse(record: &[u8]) -> Result<Self> {
        let raw: [u8; CARD_SIZE] = record.try_into().map_err(|_| {
            ConversionError::ParseError(format!(
                "header card must be {} bytes, got {}",
                CARD_SIZE,
                record.len()
            ))
        })?;

        if let Some(column) = raw[..KEYWORD_LEN]
            .iter()
            .position(|b| !(0x20..=0x7e).contains(b))
        {
            return Err(ConversionError::ParseError(format!(
                "invalid byte 0x{:02x} in header keyword at column {}",
                raw[column],
                column + 1
            )));
        }

        let keyword = String::from_utf8_lossy(&raw[..KEYWORD_LEN])
            .trim_end()
            .to_string();
        let indicator = &raw[KEYWORD_LEN..KEYWORD_LEN + 2];
        let (value, comment) = if indicator == VALUE_INDICATOR.as_bytes() {
            split_value_field(&String::from_utf8_lossy(&raw[KEYWORD_LEN + 2..]))
        } else {
            (None, non_empty(&String::from_utf8_lossy(&raw[KEYWORD_LEN..])))
        };

        Ok(Self {
            keyword,
            value,
            comment,
            raw,
        })
    }

    /// The `END` record that terminates every header.
    pub fn end() -> Self {
        let mut raw = [b' '; CARD_SIZE];
        raw[..END_KEYWORD.len()].copy_from_slice(END_KEYWORD.as_bytes());
        Self {
            keyword: END_KEYWORD.to_string(),
            value: None,
            comment: None,
            raw,
        }
    }

    pub fn is_end(&self) -> bool {
        self.keyword == END_KEYWORD && self.value.is_none()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

/// Splits the part after `= ` into value and comment.
///
/// A quoted string may itself contain `/`, and `''` inside it stands for a
/// literal quote.
fn split_value_field(field: &str) -> (Option<String>, Option<String>) {
    let trimmed = field.trim_start();

    if let Some(rest) = trimmed.strip_prefix('\'') {
        let mut value = String::new();
        let mut end = rest.len();
        let mut chars = rest.char_indices().peekable();
        while let Some((index, c)) = chars.next() {
            if c != '\'' {
                value.push(c);
                continue;
            }
            if matches!(chars.peek(), Some((_, '\''))) {
                value.push('\'');
                chars.next();
            } else {
                end = index + 1;
                break;
            }
        }
        let comment = rest[end..].split_once('/').and_then(|(_, c)| non_empty(c));
        return (Some(value.trim_end().to_string()), comment);
    }

    match trimmed.split_once('/') {
        Some((value, comment)) => (non_empty(value), non_empty(comment)),
        None => (non_empty(trimmed), None),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Ordered keyword records of a header, without the terminating `END`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn has_key(&self, keyword: &str) -> bool {
        self.cards.iter().any(|card| card.keyword == keyword)
    }

    pub fn get(&self, keyword: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.keyword == keyword)
    }

    pub fn value_of(&self, keyword: &str) -> Option<&str> {
        self.get(keyword).and_then(|card| card.value.as_deref())
    }

    /// Removes every card with this keyword and returns how many were removed.
    pub fn remove_key(&mut self, keyword: &str) -> usize {
        let before = self.cards.len();
        self.cards.retain(|card| card.keyword != keyword);
        before - self.cards.len()
    }
}

/// A FITS file split into its primary header and everything after it.
///
/// The remainder (primary data array and any extensions) is opaque and is
/// never inspected beyond its length.
#[derive(Debug, Clone)]
pub struct FitsFile {
    header: Header,
    remainder: Vec<u8>,
}

impl FitsFile {
    pub fn new(header: Header, remainder: Vec<u8>) -> Self {
        Self { header, remainder }
    }

    pub fn primary_header(&self) -> &Header {
        &self.header
    }

    pub fn primary_header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn remainder(&self) -> &[u8] {
        &self.remainder
    }

    /// Size in bytes of the primary data array according to `BITPIX` and
    /// `NAXISn`, without block padding. `None` if the header does not say.
    pub fn primary_data_len(&self) -> Option<usize> {
        let bitpix: i64 = self.header.value_of("BITPIX")?.parse().ok()?;
        let naxis: usize = self.header.value_of("NAXIS")?.parse().ok()?;
        if naxis == 0 {
            return Some(0);
        }

        let mut elements: usize = 1;
        for axis in 1..=naxis {
            let len: usize = self.header.value_of(&format!("NAXIS{axis}"))?.parse().ok()?;
            elements = elements.checked_mul(len)?;
        }

        elements.checked_mul(bitpix.unsigned_abs() as usize / 8)
    }
}
