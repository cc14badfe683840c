//! Configuration types for PDF-to-image conversion.
//!
//! Resolution and output format are fixed (300 DPI, PNG); what varies per run
//! is the metadata stamped into each image, the password for encrypted
//! documents, where libpdfium lives, and who listens to progress events.
//! All of it is carried by [`ConversionConfig`], built through
//! [`ConversionConfigBuilder`].

use crate::error::Pdf2ImgError;
use crate::metadata::UserMetadata;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Output resolution in dots per inch.
pub const RENDER_DPI: f32 = 300.0;

/// PDF user space is 72 units per inch.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Scale applied to the native 72-DPI page space to reach [`RENDER_DPI`].
pub const RENDER_SCALE: f32 = RENDER_DPI / PDF_POINTS_PER_INCH;

/// File extension of every output image.
pub const OUTPUT_EXTENSION: &str = "png";

/// Configuration for a batch or single-file conversion.
///
/// # Example
/// ```rust
/// use pdf2img::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .tag("Author", "Alice")
///     .tag("Project", "X")
///     .build()
///     .unwrap();
/// assert_eq!(config.metadata.get("Author"), Some("Alice"));
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Tags merged into every page's metadata after the provenance fields.
    pub metadata: UserMetadata,

    /// PDF user password for encrypted documents. Applied to every file.
    pub password: Option<String>,

    /// Explicit path to the pdfium shared library.
    ///
    /// When `None`, a platform library in the working directory is tried
    /// first, then the system library.
    pub pdfium_library: Option<PathBuf>,

    /// Receives per-file and per-page events. `None` disables reporting.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("metadata", &self.metadata)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_library", &self.pdfium_library)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for [`ConversionConfig`].
///
/// Tags are collected as raw pairs and validated in [`build`](Self::build),
/// so a bad key surfaces once, with the offending key in the error.
#[derive(Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
    tags: Vec<(String, String)>,
}

impl ConversionConfigBuilder {
    /// Add a metadata tag; the value is stored as its string form.
    pub fn tag(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.tags.push((key.into(), value.to_string()));
        self
    }

    /// Add a tag only when `value` is present and renders non-empty.
    pub fn tag_opt(self, key: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.is_empty() => self.tag(key, v),
            _ => self,
        }
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating every tag key.
    pub fn build(self) -> Result<ConversionConfig, Pdf2ImgError> {
        let mut config = self.config;
        for (key, value) in self.tags {
            config.metadata.insert(key, value)?;
        }
        if matches!(config.password.as_deref(), Some("")) {
            return Err(Pdf2ImgError::InvalidConfig(
                "password must not be empty".into(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_300_over_72() {
        assert!((RENDER_SCALE - 300.0 / 72.0).abs() < f32::EPSILON);
    }

    #[test]
    fn default_has_no_tags() {
        let config = ConversionConfig::builder().build().unwrap();
        assert!(config.metadata.is_empty());
        assert!(config.password.is_none());
        assert!(config.progress_callback.is_none());
    }

    #[test]
    fn tag_opt_skips_missing_values() {
        let config = ConversionConfig::builder()
            .tag_opt("Author", Some("Alice"))
            .tag_opt("Project", None::<&str>)
            .tag_opt("Department", Some("R&D"))
            .build()
            .unwrap();
        let keys: Vec<&str> = config.metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Author", "Department"]);
    }

    #[test]
    fn tag_opt_skips_empty_values() {
        let config = ConversionConfig::builder()
            .tag_opt("Author", Some(""))
            .tag_opt("Project", Some("X"))
            .build()
            .unwrap();
        let pairs: Vec<_> = config.metadata.iter().collect();
        assert_eq!(pairs, vec![("Project", "X")]);
    }

    #[test]
    fn reserved_tag_fails_build() {
        let err = ConversionConfig::builder()
            .tag("Total_Pages", 99)
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2ImgError::ReservedMetadataKey { .. }));
    }

    #[test]
    fn empty_password_fails_build() {
        let err = ConversionConfig::builder().password("").build().unwrap_err();
        assert!(matches!(err, Pdf2ImgError::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let config = ConversionConfig::builder()
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
