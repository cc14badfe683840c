//! Error types for the pdf2img library.
//!
//! A single enum covers every failure, but failures are handled at two levels:
//!
//! * **Batch-level** — the batch cannot run at all (input folder missing,
//!   output root cannot be created, pdfium cannot be bound). Returned as
//!   `Err(Pdf2ImgError)` from [`crate::batch::batch_convert`] and
//!   [`crate::batch::convert_folder`].
//!
//! * **File-level** — one PDF failed to open, render, or write. The page
//!   converter catches these and records them in
//!   [`crate::convert::ConversionResult::error`], so one bad document never
//!   stops the rest of the batch.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the pdf2img library.
#[derive(Debug, Error)]
pub enum Pdf2ImgError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input folder does not exist.
    #[error("Input folder not found: '{path}'")]
    InputFolderNotFound { path: PathBuf },

    /// The input folder exists but could not be listed.
    #[error("Failed to read input folder '{path}': {source}")]
    InputFolderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The renderer could not open the document (corrupt, truncated, not a PDF).
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// An output directory could not be created.
    #[error("Failed to create output folder '{path}': {source}")]
    OutputFolderFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an image file.
    #[error("Failed to write image '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PNG encoder rejected the pixel buffer or a metadata chunk.
    #[error("Failed to encode PNG '{path}': {detail}")]
    EncodeFailed { path: PathBuf, detail: String },

    // ── Metadata errors ───────────────────────────────────────────────────
    /// A user metadata key cannot be stored as a PNG text keyword.
    #[error("Invalid metadata key '{key}': {reason}")]
    InvalidMetadataKey { key: String, reason: String },

    /// A user metadata key collides with a field written for every page.
    #[error("Metadata key '{key}' is reserved for per-page provenance")]
    ReservedMetadataKey { key: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or pass --pdfium-lib).\n"
    )]
    PdfiumBindingFailed(String),
}
