//! PDF rasterisation: open a document and render its pages to RGB buffers.
//!
//! The page converter talks to the renderer only through [`PdfRenderer`] and
//! [`PageSource`], so the pipeline can run against pdfium in production and
//! an in-memory renderer in tests.
//!
//! ## Handle lifetime
//!
//! An opened document is released when its [`PdfRenderer::Document`] value is
//! dropped. Holding it in a local binding is enough to release it on every
//! exit path, `?` early returns included; no explicit close call exists.

use crate::error::Pdf2ImgError;
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rasterised page: 8-bit RGB samples, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes.
    pub samples: Vec<u8>,
}

impl RasterPage {
    /// Expected sample count for the page dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl From<RgbImage> for RasterPage {
    fn from(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            samples: img.into_raw(),
        }
    }
}

/// An open document that can rasterise its pages.
pub trait PageSource {
    /// Number of pages; zero is valid.
    fn page_count(&self) -> usize;

    /// Render the 0-based page `index`, scaling the 72-DPI page space by `scale`.
    fn render_page(&self, index: usize, scale: f32) -> Result<RasterPage, Pdf2ImgError>;
}

/// Opens PDF documents.
pub trait PdfRenderer {
    /// The open handle; dropping it closes the document.
    type Document<'a>: PageSource
    where
        Self: 'a;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, Pdf2ImgError>;
}

// ── pdfium ───────────────────────────────────────────────────────────────

/// Renderer backed by a bound pdfium library.
///
/// Binding loads a shared library, so create one per batch and reuse it for
/// every document.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
    password: Option<String>,
}

impl PdfiumRenderer {
    /// Bind pdfium, optionally from an explicit library path.
    pub fn bind(library: Option<&Path>, password: Option<String>) -> Result<Self, Pdf2ImgError> {
        Ok(Self {
            pdfium: bind_pdfium(library)?,
            password,
        })
    }
}

impl PdfRenderer for PdfiumRenderer {
    type Document<'a> = PdfiumDocument<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<PdfiumDocument<'a>, Pdf2ImgError> {
        let password = self.password.as_deref();
        let document = self
            .pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| classify_open_error(path, password.is_some(), format!("{:?}", e)))?;

        debug!("Opened {}", path.display());
        Ok(PdfiumDocument {
            document,
            path: path.to_path_buf(),
        })
    }
}

/// A document opened by [`PdfiumRenderer`].
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    path: PathBuf,
}

impl PageSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<RasterPage, Pdf2ImgError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| Pdf2ImgError::RasterisationFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            Pdf2ImgError::RasterisationFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image().to_rgb8();
        debug!(
            "Rendered page {} → {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );
        Ok(RasterPage::from(image))
    }
}

impl Drop for PdfiumDocument<'_> {
    fn drop(&mut self) {
        // `PdfDocument` closes the pdfium handle in its own drop, right after this.
        debug!("Closing {}", self.path.display());
    }
}

/// Map a pdfium load error onto the password and corruption variants.
fn classify_open_error(path: &Path, had_password: bool, detail: String) -> Pdf2ImgError {
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            Pdf2ImgError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            Pdf2ImgError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        Pdf2ImgError::CorruptPdf {
            path: path.to_path_buf(),
            detail,
        }
    }
}

/// Bind to a pdfium library.
///
/// Resolution order:
/// 1. `library`, when given (the CLI fills it from `--pdfium-lib` / `PDFIUM_LIB_PATH`)
/// 2. the platform library file in the current working directory
/// 3. the system library search path
pub fn bind_pdfium(library: Option<&Path>) -> Result<Pdfium, Pdf2ImgError> {
    let bindings = match library {
        Some(path) => Pdfium::bind_to_library(path).map_err(|e| {
            Pdf2ImgError::PdfiumBindingFailed(format!("{}: {:?}", path.display(), e))
        })?,
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Pdf2ImgError::PdfiumBindingFailed(format!("{:?}", e)))?,
    };

    info!("pdfium bound");
    Ok(Pdfium::new(bindings))
}
