//! Pipeline stages for PDF-to-image conversion.
//!
//! Each submodule implements exactly one step, so the renderer can be
//! swapped (pdfium in production, an in-memory fake in tests) without
//! touching discovery or encoding.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode
//! (folder)  (pdfium)   (PNG + text chunks)
//! ```
//!
//! 1. [`input`]  — find the PDFs in a folder and derive output paths
//! 2. [`render`] — open a document and rasterise pages at 300 DPI
//! 3. [`encode`] — write each page as PNG with its metadata embedded

pub mod encode;
pub mod input;
pub mod render;
