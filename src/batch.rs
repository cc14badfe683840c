//! Batch conversion over every PDF in a folder.
//!
//! Each PDF gets its own subfolder under the output root, named after the
//! file stem:
//!
//! ```text
//! output/
//!  ├─ a/
//!  │   ├─ a_page_1.png
//!  │   └─ a_page_2.png
//!  └─ b/
//!      └─ b_page_1.png
//! ```
//!
//! Files are converted one at a time. A failed file is counted and the batch
//! moves on; only problems with the folders themselves (or binding pdfium)
//! abort the run.

use crate::config::ConversionConfig;
use crate::convert::{convert_pdf, ConversionResult};
use crate::error::Pdf2ImgError;
use crate::pipeline::input;
use crate::pipeline::render::{PdfRenderer, PdfiumRenderer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Aggregate outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// PDFs found in the input folder.
    pub discovered: usize,
    pub successful: usize,
    pub failed: usize,
    /// Per-file results in processing order.
    pub files: Vec<ConversionResult>,
}

impl BatchSummary {
    fn with_capacity(discovered: usize) -> Self {
        Self {
            discovered,
            files: Vec::with_capacity(discovered),
            ..Self::default()
        }
    }

    /// Count a finished file.
    pub fn record(&mut self, result: ConversionResult) {
        if result.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.files.push(result);
    }

    /// `true` when the input folder held no PDFs.
    pub fn is_empty(&self) -> bool {
        self.discovered == 0
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Convert every PDF in `input_folder` using `renderer`.
///
/// The output root is created first. If no PDFs are found the returned
/// summary is empty and nothing else is written.
///
/// # Errors
/// Only for batch-level problems: the input folder is missing or unreadable,
/// or the output root cannot be created. Per-file failures are counted in the
/// summary instead.
pub fn batch_convert<R: PdfRenderer>(
    renderer: &R,
    input_folder: &Path,
    output_folder: &Path,
    config: &ConversionConfig,
) -> Result<BatchSummary, Pdf2ImgError> {
    let pdfs = prepare(input_folder, output_folder)?;
    if pdfs.is_empty() {
        return Ok(BatchSummary::default());
    }
    Ok(convert_all(renderer, &pdfs, output_folder, config))
}

/// [`batch_convert`] with a pdfium renderer built from `config`.
///
/// pdfium is bound only once at least one PDF has been found, so an empty
/// input folder works without the library installed.
pub fn convert_folder(
    input_folder: impl AsRef<Path>,
    output_folder: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchSummary, Pdf2ImgError> {
    let (input_folder, output_folder) = (input_folder.as_ref(), output_folder.as_ref());

    let pdfs = prepare(input_folder, output_folder)?;
    if pdfs.is_empty() {
        return Ok(BatchSummary::default());
    }

    let renderer = PdfiumRenderer::bind(config.pdfium_library.as_deref(), config.password.clone())?;
    Ok(convert_all(&renderer, &pdfs, output_folder, config))
}

/// Create the output root and discover the inputs.
fn prepare(input_folder: &Path, output_folder: &Path) -> Result<Vec<PathBuf>, Pdf2ImgError> {
    std::fs::create_dir_all(output_folder).map_err(|source| Pdf2ImgError::OutputFolderFailed {
        path: output_folder.to_path_buf(),
        source,
    })?;

    let pdfs = input::discover_pdfs(input_folder)?;
    if pdfs.is_empty() {
        info!("No PDF files found in {}", input_folder.display());
    } else {
        info!("Found {} PDF files to process", pdfs.len());
    }
    Ok(pdfs)
}

fn convert_all<R: PdfRenderer>(
    renderer: &R,
    pdfs: &[PathBuf],
    output_folder: &Path,
    config: &ConversionConfig,
) -> BatchSummary {
    let start = Instant::now();
    let total = pdfs.len();
    let mut summary = BatchSummary::with_capacity(total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    for (i, pdf) in pdfs.iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(i + 1, total, pdf);
        }

        let doc_folder = input::document_output_folder(output_folder, pdf);
        let result = convert_pdf(renderer, pdf, &doc_folder, config);

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_complete(&result);
        }
        summary.record(result);
    }

    info!(
        "Batch complete: {} succeeded, {} failed, {}ms",
        summary.successful,
        summary.failed,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&summary);
    }
    summary
}
