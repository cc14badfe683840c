//! Single-document conversion: one PDF → one PNG per page.
//!
//! [`convert_pdf`] never returns an error. Every failure (open, render,
//! write, directory creation) is logged with the file name and folded into a
//! failed [`ConversionResult`], which is all the batch orchestrator needs to
//! keep going. Pages written before a failure stay on disk.

use crate::config::{ConversionConfig, RENDER_SCALE};
use crate::error::Pdf2ImgError;
use crate::metadata::{conversion_timestamp, ConversionMetadata};
use crate::pipeline::{encode, input, render::PageSource, render::PdfRenderer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Outcome of converting one PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// The PDF that was converted.
    pub source: PathBuf,
    /// Folder the page images were written to.
    pub output_folder: PathBuf,
    /// Page count, if the document could be opened.
    pub total_pages: Option<usize>,
    /// Images written, including any written before a failure.
    pub pages_written: usize,
    /// Human-readable error; `None` on success.
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn succeeded(source: PathBuf, output_folder: PathBuf, total_pages: usize) -> Self {
        Self {
            source,
            output_folder,
            total_pages: Some(total_pages),
            pages_written: total_pages,
            error: None,
        }
    }

    pub fn failed(
        source: PathBuf,
        output_folder: PathBuf,
        total_pages: Option<usize>,
        pages_written: usize,
        error: String,
    ) -> Self {
        Self {
            source,
            output_folder,
            total_pages,
            pages_written,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Basename of the source PDF.
    pub fn source_name(&self) -> String {
        input::document_name(&self.source)
    }
}

/// Progress through one document, kept outside the fallible body so a
/// failure can still report what was done.
#[derive(Default)]
struct Progress {
    total_pages: Option<usize>,
    pages_written: usize,
}

/// Convert every page of `pdf_path` into `output_folder`.
///
/// The folder (and its parents) is created if missing. Pages are written as
/// `{stem}_page_{n}.png` with `n` starting at 1, each carrying the
/// provenance fields followed by `config.metadata`. A zero-page document
/// succeeds with no images.
pub fn convert_pdf<R: PdfRenderer + ?Sized>(
    renderer: &R,
    pdf_path: &Path,
    output_folder: &Path,
    config: &ConversionConfig,
) -> ConversionResult {
    let name = input::document_name(pdf_path);
    let mut progress = Progress::default();

    match convert_pages(renderer, pdf_path, output_folder, config, &mut progress) {
        Ok(()) => {
            info!("Successfully converted: {}", name);
            ConversionResult::succeeded(
                pdf_path.to_path_buf(),
                output_folder.to_path_buf(),
                progress.pages_written,
            )
        }
        Err(e) => {
            error!("Error converting {}: {}", name, e);
            ConversionResult::failed(
                pdf_path.to_path_buf(),
                output_folder.to_path_buf(),
                progress.total_pages,
                progress.pages_written,
                e.to_string(),
            )
        }
    }
}

fn convert_pages<R: PdfRenderer + ?Sized>(
    renderer: &R,
    pdf_path: &Path,
    output_folder: &Path,
    config: &ConversionConfig,
    progress: &mut Progress,
) -> Result<(), Pdf2ImgError> {
    std::fs::create_dir_all(output_folder).map_err(|source| Pdf2ImgError::OutputFolderFailed {
        path: output_folder.to_path_buf(),
        source,
    })?;

    // Dropped on every return below, which closes the document.
    let document = renderer.open(pdf_path)?;
    let total_pages = document.page_count();
    progress.total_pages = Some(total_pages);
    debug!("{}: {} pages", pdf_path.display(), total_pages);

    let name = input::document_name(pdf_path);
    let stem = input::document_stem(pdf_path);

    for index in 0..total_pages {
        let page_number = index + 1;
        let raster = document.render_page(index, RENDER_SCALE)?;

        let image_path = output_folder.join(input::page_file_name(&stem, page_number));
        let metadata = ConversionMetadata::for_page(
            &name,
            page_number,
            total_pages,
            conversion_timestamp(),
            &config.metadata,
        );
        encode::write_png(&raster, &metadata, &image_path)?;
        progress.pages_written += 1;

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_written(page_number, total_pages, &image_path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_constructors() {
        let ok = ConversionResult::succeeded("in/a.pdf".into(), "out/a".into(), 3);
        assert!(ok.is_success());
        assert_eq!(ok.pages_written, 3);
        assert_eq!(ok.source_name(), "a.pdf");

        let bad = ConversionResult::failed("in/b.pdf".into(), "out/b".into(), None, 0, "x".into());
        assert!(!bad.is_success());
        assert_eq!(bad.total_pages, None);
    }

    #[test]
    fn result_serialises() {
        let ok = ConversionResult::succeeded("in/a.pdf".into(), "out/a".into(), 2);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["pages_written"], 2);
        assert!(json["error"].is_null());
    }
}
