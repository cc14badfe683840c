//! # pdf2img
//!
//! Batch-convert PDF documents into page-level PNG images, stamping each
//! image with where it came from.
//!
//! Every output PNG carries text chunks readable by standard image tooling:
//!
//! | Key | Value |
//! |-----|-------|
//! | `Source_PDF` | basename of the source PDF |
//! | `Conversion_Date` | ISO-8601 local time the page was processed |
//! | `Page_Number` | 1-based page number |
//! | `Total_Pages` | page count of the document |
//! | *user tags* | e.g. `Author`, `Project`, `Department` |
//!
//! ## Pipeline Overview
//!
//! ```text
//! input folder
//!  │
//!  ├─ 1. Discover  *.pdf (case-insensitive), sorted by name
//!  ├─ 2. Render    each page via pdfium at 300 DPI (scale 300/72)
//!  ├─ 3. Stamp     provenance fields + user tags
//!  └─ 4. Write     output/<stem>/<stem>_page_<n>.png
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2img::{convert_folder, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .tag("Author", "Alice")
//!         .tag("Project", "Archive")
//!         .build()?;
//!     let summary = convert_folder("scans/", "images/", &config)?;
//!     eprintln!("{} ok / {} failed", summary.successful, summary.failed);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2img` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{batch_convert, convert_folder, BatchSummary};
pub use config::{ConversionConfig, ConversionConfigBuilder, RENDER_DPI, RENDER_SCALE};
pub use convert::{convert_pdf, ConversionResult};
pub use error::Pdf2ImgError;
pub use metadata::{ConversionMetadata, UserMetadata};
pub use pipeline::render::{PageSource, PdfRenderer, PdfiumRenderer, RasterPage};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
