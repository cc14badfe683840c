//! CLI binary for pdf2img.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, prints per-file results, and reports a summary.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2img::{
    convert_folder, BatchProgressCallback, BatchSummary, ConversionConfig, ConversionResult,
    ProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Prints one result line per file. With a bar, lines are printed above it so
/// the bar stays anchored at the bottom of the terminal.
struct CliProgressCallback {
    bar: Option<ProgressBar>,
}

impl CliProgressCallback {
    fn new(show_bar: bool) -> Arc<Self> {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} {prefix:.bold}  \
                     [{bar:42.green/238}] {pos:>3}/{len} PDFs  {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            bar.set_prefix("Converting");
            bar
        });
        Arc::new(Self { bar })
    }

    fn line(&self, msg: String) {
        match self.bar {
            // A hidden bar (stderr not a terminal) swallows println.
            Some(ref bar) if !bar.is_hidden() => bar.println(msg),
            _ => println!("{msg}"),
        }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_length(total_files as u64);
            bar.enable_steady_tick(Duration::from_millis(80));
        }
        self.line(format!("Found {total_files} PDF files to process"));
    }

    fn on_file_start(&self, _file_num: usize, _total_files: usize, source: &Path) {
        if let Some(ref bar) = self.bar {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            bar.set_message(name);
        }
    }

    fn on_page_written(&self, page_num: usize, total_pages: usize, _image_path: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_prefix(format!("page {page_num}/{total_pages}"));
        }
    }

    fn on_file_complete(&self, result: &ConversionResult) {
        let name = result.source_name();
        match result.error {
            None => self.line(format!("{} Successfully converted: {}", green("✓"), name)),
            Some(ref e) => self.line(format!("{} Error converting {}: {}", red("✗"), name, e)),
        }
        if let Some(ref bar) = self.bar {
            bar.set_prefix("Converting");
            bar.inc(1);
        }
    }

    fn on_batch_complete(&self, _summary: &BatchSummary) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every PDF in scans/ into images/<name>/<name>_page_<n>.png
  pdf2img scans/ images/

  # Stamp provenance tags into every image
  pdf2img --author Alice --project Archive --department Legal scans/ images/

  # Arbitrary extra tags
  pdf2img --tag Batch=2024-05 --tag Reviewer=Bob scans/ images/

  # Machine-readable summary
  pdf2img --json scans/ images/ > summary.json

OUTPUT:
  Pages are rendered at 300 DPI as 8-bit RGB PNG. Each image carries the text
  chunks Source_PDF, Conversion_Date, Page_Number and Total_Pages, followed by
  any tags given on the command line.

EXIT STATUS:
  0  every PDF converted (or no PDFs found)
  1  at least one PDF failed
  2  the batch could not run (bad folder, pdfium not found, invalid tag)

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to an existing libpdfium
  RUST_LOG          Override the log filter (e.g. pdf2img=debug)
"#;

/// Convert a folder of PDFs into 300 DPI PNG pages with embedded metadata.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2img",
    version,
    about = "Convert PDFs to images with metadata",
    long_about = "Convert every PDF in INPUT_FOLDER into one PNG per page under \
OUTPUT_FOLDER/<pdf name>/, embedding the source file, conversion time, page number, \
page count and optional tags as PNG text metadata.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder containing PDF files.
    input_folder: PathBuf,

    /// Folder to save image files.
    output_folder: PathBuf,

    /// Author metadata for the images.
    #[arg(long, env = "PDF2IMG_AUTHOR")]
    author: Option<String>,

    /// Project metadata for the images.
    #[arg(long, env = "PDF2IMG_PROJECT")]
    project: Option<String>,

    /// Department metadata for the images.
    #[arg(long, env = "PDF2IMG_DEPARTMENT")]
    department: Option<String>,

    /// Extra metadata as KEY=VALUE; repeatable.
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    tags: Vec<(String, String)>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2IMG_PASSWORD")]
    password: Option<String>,

    /// Path to the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Print the batch summary as JSON on stdout.
    #[arg(long, env = "PDF2IMG_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2IMG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2IMG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2IMG_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", red("error:"), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // When result lines are printed, library logs would repeat them; keep
    // tracing quiet unless asked for.
    let report_lines = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if report_lines {
        "off"
    } else {
        "error"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if report_lines {
        let cb = CliProgressCallback::new(!cli.no_progress && !cli.verbose);
        Some(cb as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run batch ────────────────────────────────────────────────────────
    let summary = convert_folder(&cli.input_folder, &cli.output_folder, &config)
        .context("Batch conversion failed")?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&summary);
    }

    Ok(if summary.has_failures() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn print_summary(summary: &BatchSummary) {
    if summary.is_empty() {
        println!("No PDF files found in the input folder");
        return;
    }
    println!("\n{}", bold("Conversion Summary:"));
    println!("Successfully converted: {} PDFs", summary.successful);
    println!("Failed conversions: {} PDFs", summary.failed);
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let named = [
        ("Author", "--author", cli.author.as_deref()),
        ("Project", "--project", cli.project.as_deref()),
        ("Department", "--department", cli.department.as_deref()),
    ];

    let mut builder = ConversionConfig::builder();
    for (key, _, value) in named {
        builder = builder.tag_opt(key, value);
    }

    for (key, value) in &cli.tags {
        if let Some((_, flag, _)) = named
            .iter()
            .find(|(k, _, v)| *k == key.as_str() && v.is_some_and(|v| !v.is_empty()))
        {
            bail!("--tag {key}=... conflicts with {flag}");
        }
        builder = builder.tag(key.as_str(), value);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.as_str());
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library(lib.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--tag KEY=VALUE`. The value may itself contain `=`.
fn parse_tag(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
