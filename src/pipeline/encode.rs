//! Image writing: RGB buffer + metadata → PNG file with text chunks.
//!
//! The `image` crate's PNG encoder has no hook for ancillary chunks, so this
//! stage drives the `png` encoder directly. Each metadata pair becomes one
//! chunk, written ahead of the pixel data in metadata order, so tools that
//! read only the header (exiftool, `identify -verbose`) see every field.
//! Values representable in Latin-1 go into `tEXt`; anything else into an
//! uncompressed UTF-8 `iTXt`.

use crate::error::Pdf2ImgError;
use crate::metadata::ConversionMetadata;
use crate::pipeline::render::RasterPage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Encode `page` as an 8-bit RGB PNG at `path`, embedding `metadata`.
///
/// An existing file at `path` is overwritten.
pub fn write_png(
    page: &RasterPage,
    metadata: &ConversionMetadata,
    path: &Path,
) -> Result<(), Pdf2ImgError> {
    let encode_err = |e: png::EncodingError| match e {
        png::EncodingError::IoError(source) => Pdf2ImgError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        },
        other => Pdf2ImgError::EncodeFailed {
            path: path.to_path_buf(),
            detail: other.to_string(),
        },
    };

    if page.samples.len() != page.expected_len() {
        return Err(Pdf2ImgError::EncodeFailed {
            path: path.to_path_buf(),
            detail: format!(
                "pixel buffer holds {} bytes, {}x{} RGB needs {}",
                page.samples.len(),
                page.width,
                page.height,
                page.expected_len()
            ),
        });
    }

    let file = File::create(path).map_err(|source| Pdf2ImgError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);

    {
        let mut encoder = png::Encoder::new(&mut w, page.width, page.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        for (key, value) in metadata.iter() {
            let added = if is_latin1(value) {
                encoder.add_text_chunk(key.to_string(), value.to_string())
            } else {
                encoder.add_itxt_chunk(key.to_string(), value.to_string())
            };
            added.map_err(encode_err)?;
        }

        let mut writer = encoder.write_header().map_err(encode_err)?;
        writer
            .write_image_data(&page.samples)
            .map_err(encode_err)?;
        writer.finish().map_err(encode_err)?;
    }

    w.flush().map_err(|source| Pdf2ImgError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Wrote {} ({}x{}, {} text chunks)",
        path.display(),
        page.width,
        page.height,
        metadata.len()
    );
    Ok(())
}

fn is_latin1(s: &str) -> bool {
    s.chars().all(|c| (c as u32) <= 0xFF)
}
