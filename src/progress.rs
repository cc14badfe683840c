//! Progress-callback trait for per-file and per-page batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to observe a
//! batch as it runs. The CLI uses it to drive its progress bar and print the
//! per-file result lines; library users can forward events anywhere.
//!
//! # Example
//!
//! ```rust
//! use pdf2img::{BatchProgressCallback, ConversionConfig, ConversionResult};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct FailureCounter {
//!     failed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for FailureCounter {
//!     fn on_file_complete(&self, result: &ConversionResult) {
//!         if !result.is_success() {
//!             self.failed.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(FailureCounter { failed: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::batch::BatchSummary;
use crate::convert::ConversionResult;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch orchestrator and page converter as work progresses.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive in order on the calling thread.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once, after discovery, when at least one PDF was found.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a file is handed to the page converter.
    ///
    /// # Arguments
    /// * `file_num`    — 1-indexed position in the batch
    /// * `total_files` — number of PDFs in the batch
    /// * `source`      — path of the PDF
    fn on_file_start(&self, file_num: usize, total_files: usize, source: &Path) {
        let _ = (file_num, total_files, source);
    }

    /// Called after each PNG is written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — page count of the current document
    /// * `image_path`  — the file just written
    fn on_page_written(&self, page_num: usize, total_pages: usize, image_path: &Path) {
        let _ = (page_num, total_pages, image_path);
    }

    /// Called when a file finishes, successfully or not.
    fn on_file_complete(&self, result: &ConversionResult) {
        let _ = result;
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, summary: &BatchSummary) {
        let _ = summary;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
