//! Input discovery: find the PDFs in a folder and derive where their pages go.
//!
//! Only the top level of the input folder is scanned. An entry qualifies when
//! its extension is `pdf` in any letter case and it resolves to a regular
//! file. Directory listing order differs across platforms, so the result is
//! sorted by file name to make batches reproducible.

use crate::config::OUTPUT_EXTENSION;
use crate::error::Pdf2ImgError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `true` if the path's extension is `pdf`, compared case-insensitively.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// List the PDF files directly inside `input_folder`, sorted by file name.
pub fn discover_pdfs(input_folder: &Path) -> Result<Vec<PathBuf>, Pdf2ImgError> {
    if !input_folder.exists() {
        return Err(Pdf2ImgError::InputFolderNotFound {
            path: input_folder.to_path_buf(),
        });
    }

    let unreadable = |source| Pdf2ImgError::InputFolderUnreadable {
        path: input_folder.to_path_buf(),
        source,
    };

    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(input_folder).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if !has_pdf_extension(&path) {
            continue;
        }
        // Follows symlinks, so a link to a PDF counts.
        if !path.is_file() {
            warn!("Skipping '{}': not a regular file", path.display());
            continue;
        }
        pdfs.push(path);
    }

    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        "Discovered {} PDF files in {}",
        pdfs.len(),
        input_folder.display()
    );
    Ok(pdfs)
}

/// File name without its final extension: `report.v2.PDF` → `report.v2`.
pub fn document_stem(pdf_path: &Path) -> String {
    pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name with its extension, as recorded in `Source_PDF`.
pub fn document_name(pdf_path: &Path) -> String {
    pdf_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.display().to_string())
}

/// Per-document subfolder inside the batch output root.
pub fn document_output_folder(output_root: &Path, pdf_path: &Path) -> PathBuf {
    output_root.join(document_stem(pdf_path))
}

/// `{stem}_page_{n}.png`, with `n` 1-based.
pub fn page_file_name(stem: &str, page_number: usize) -> String {
    format!("{stem}_page_{page_number}.{OUTPUT_EXTENSION}")
}
