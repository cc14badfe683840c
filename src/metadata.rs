//! Provenance metadata embedded in every output PNG.
//!
//! Each image carries four fixed fields describing where it came from
//! ([`SOURCE_PDF`], [`CONVERSION_DATE`], [`PAGE_NUMBER`], [`TOTAL_PAGES`])
//! followed by whatever tags the caller supplied (author, project, …).
//!
//! User tags live in [`UserMetadata`], which refuses the fixed keys outright;
//! a tag can therefore never shadow or duplicate a provenance field.
//! [`ConversionMetadata`] is the per-page result and is immutable once built.

use crate::error::Pdf2ImgError;
use serde::Serialize;
use std::fmt;

/// Basename of the source PDF, extension included.
pub const SOURCE_PDF: &str = "Source_PDF";
/// ISO-8601 local timestamp taken when the page was processed.
pub const CONVERSION_DATE: &str = "Conversion_Date";
/// 1-based page number.
pub const PAGE_NUMBER: &str = "Page_Number";
/// Page count of the source document.
pub const TOTAL_PAGES: &str = "Total_Pages";

/// Keys written for every page, in output order.
pub const RESERVED_KEYS: [&str; 4] = [SOURCE_PDF, CONVERSION_DATE, PAGE_NUMBER, TOTAL_PAGES];

/// PNG keywords are limited to 79 bytes.
const MAX_KEY_LEN: usize = 79;

/// Caller-supplied tags merged into every page's metadata.
///
/// Insertion-ordered with unique keys: inserting an existing key replaces its
/// value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserMetadata {
    entries: Vec<(String, String)>,
}

impl UserMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Any `Display` value is accepted and stored as its string
    /// form, since PNG text chunks only hold strings.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl fmt::Display,
    ) -> Result<(), Pdf2ImgError> {
        let key = key.into();
        validate_key(&key)?;
        let value = value.to_string();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The complete, ordered metadata set for one output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionMetadata {
    entries: Vec<(String, String)>,
}

impl ConversionMetadata {
    /// Build the metadata for one page: fixed provenance fields first, then
    /// every user tag in insertion order.
    ///
    /// # Arguments
    /// * `source_name` — basename of the PDF, extension included
    /// * `page_number` — 1-based page number
    /// * `total_pages` — page count of the document
    /// * `timestamp`   — value for `Conversion_Date`, see [`conversion_timestamp`]
    pub fn for_page(
        source_name: &str,
        page_number: usize,
        total_pages: usize,
        timestamp: String,
        user: &UserMetadata,
    ) -> Self {
        let mut entries = Vec::with_capacity(RESERVED_KEYS.len() + user.len());
        entries.push((SOURCE_PDF.to_string(), source_name.to_string()));
        entries.push((CONVERSION_DATE.to_string(), timestamp));
        entries.push((PAGE_NUMBER.to_string(), page_number.to_string()));
        entries.push((TOTAL_PAGES.to_string(), total_pages.to_string()));
        entries.extend(user.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Current local time in ISO-8601 with microseconds, e.g.
/// `2024-05-01T14:03:27.512093`.
pub fn conversion_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// A key must be usable as a PNG text keyword and must not be a fixed field.
fn validate_key(key: &str) -> Result<(), Pdf2ImgError> {
    let invalid = |reason: &str| Pdf2ImgError::InvalidMetadataKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if RESERVED_KEYS.contains(&key) {
        return Err(Pdf2ImgError::ReservedMetadataKey {
            key: key.to_string(),
        });
    }
    if key.is_empty() {
        return Err(invalid("key is empty"));
    }
    // Latin-1 printable range: one byte per char once encoded.
    if !key
        .chars()
        .all(|c| matches!(c as u32, 0x20..=0x7E | 0xA1..=0xFF))
    {
        return Err(invalid("only printable Latin-1 characters are allowed"));
    }
    if key.chars().count() > MAX_KEY_LEN {
        return Err(invalid("longer than 79 characters"));
    }
    if key.starts_with(' ') || key.ends_with(' ') || key.contains("  ") {
        return Err(invalid("leading, trailing or consecutive spaces"));
    }
    Ok(())
}
