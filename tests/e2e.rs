//! End-to-end tests against a real pdfium library.
//!
//! PDFs are generated on the fly, so no fixtures are needed, but pdfium must
//! be loadable (working directory, system path, or `PDFIUM_LIB_PATH`). The
//! tests are gated behind `PDF2IMG_E2E` so they do not run in CI unless
//! explicitly requested.
//!
//! Run with:
//!   PDF2IMG_E2E=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

mod common;

use common::{chunk, png_names, read_text_chunks};
use pdf2img::{convert_folder, ConversionConfig};
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn library_path() -> Option<PathBuf> {
    std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from)
}

/// Skip this test unless `PDF2IMG_E2E` is set and pdfium binds.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("PDF2IMG_E2E").is_err() {
            println!("SKIP — set PDF2IMG_E2E=1 to run e2e tests");
            return;
        }
        if let Err(e) = pdf2img::pipeline::render::bind_pdfium(library_path().as_deref()) {
            println!("SKIP — pdfium unavailable: {e}");
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter("pdf2img=debug")
            .with_test_writer()
            .try_init();
    }};
}

/// A valid PDF with `pages` blank 72×72 pt (one inch square) pages.
fn blank_pdf(pages: usize) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages)
                .map(|i| format!("{} 0 R", i + 3))
                .collect::<Vec<_>>()
                .join(" "),
            pages
        ),
    ];
    objects.extend(
        (0..pages).map(|_| "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 72 72] >>".to_string()),
    );

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for off in offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        )
        .as_bytes(),
    );
    out
}

fn config(tags: &[(&str, &str)]) -> ConversionConfig {
    let mut builder = ConversionConfig::builder();
    for (k, v) in tags {
        builder = builder.tag(*k, *v);
    }
    if let Some(lib) = library_path() {
        builder = builder.pdfium_library(lib);
    }
    builder.build().expect("valid config")
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).expect("write input");
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_two_page_and_corrupt_batch() {
    e2e_skip_unless_ready!();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "a.pdf", &blank_pdf(2));
    write(input.path(), "b.pdf", b"this is not a pdf at all");

    let summary = convert_folder(input.path(), output.path(), &config(&[]))
        .expect("batch should run");

    assert_eq!((summary.successful, summary.failed), (1, 1));
    assert_eq!(
        png_names(&output.path().join("a")),
        vec!["a_page_1.png", "a_page_2.png"]
    );
    assert!(png_names(&output.path().join("b")).is_empty());
}

#[test]
fn test_pages_render_at_300_dpi() {
    e2e_skip_unless_ready!();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "inch.pdf", &blank_pdf(1));

    convert_folder(input.path(), output.path(), &config(&[])).unwrap();

    let img = image::open(output.path().join("inch/inch_page_1.png"))
        .expect("png decodes")
        .to_rgb8();
    // One inch at 300 DPI; allow pdfium's rounding.
    assert!((299..=301).contains(&img.width()), "width {}", img.width());
    assert!((299..=301).contains(&img.height()), "height {}", img.height());
    assert_eq!(img.get_pixel(150, 150).0, [255, 255, 255]);
}

#[test]
fn test_metadata_from_tags() {
    e2e_skip_unless_ready!();
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "doc.pdf", &blank_pdf(3));

    convert_folder(
        input.path(),
        output.path(),
        &config(&[("Author", "Alice"), ("Project", "X")]),
    )
    .unwrap();

    for n in 1..=3 {
        let chunks = read_text_chunks(&output.path().join(format!("doc/doc_page_{n}.png")));
        assert_eq!(chunk(&chunks, "Source_PDF"), Some("doc.pdf"));
        assert_eq!(chunk(&chunks, "Total_Pages"), Some("3"));
        let page: usize = chunk(&chunks, "Page_Number").unwrap().parse().unwrap();
        assert_eq!(page, n);
        assert_eq!(chunk(&chunks, "Author"), Some("Alice"));
        assert_eq!(chunk(&chunks, "Project"), Some("X"));
    }
}

#[test]
fn test_nonexistent_input_folder() {
    if std::env::var("PDF2IMG_E2E").is_err() {
        println!("SKIP");
        return;
    }
    let output = tempfile::tempdir().unwrap();
    let result = convert_folder(
        "/definitely/not/a/real/folder",
        output.path().join("out"),
        &config(&[]),
    );
    assert!(result.is_err(), "missing input folder should be an error");
}
