//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

/// Every text chunk in a PNG, `tEXt` first, then `iTXt`.
pub fn read_text_chunks(path: &Path) -> Vec<(String, String)> {
    let decoder = png::Decoder::new(File::open(path).expect("png exists"));
    let reader = decoder.read_info().expect("valid png header");
    let info = reader.info();

    let mut chunks: Vec<(String, String)> = info
        .uncompressed_latin1_text
        .iter()
        .map(|c| (c.keyword.clone(), c.text.clone()))
        .collect();
    chunks.extend(
        info.utf8_text
            .iter()
            .map(|c| (c.keyword.clone(), c.get_text().expect("utf-8 text"))),
    );
    chunks
}

pub fn chunk<'a>(chunks: &'a [(String, String)], key: &str) -> Option<&'a str> {
    chunks
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Names of the `.png` files directly inside `dir`, sorted. Empty if `dir`
/// does not exist.
pub fn png_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

/// Create `names` inside `dir` with placeholder bytes and return their paths.
pub fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let p = dir.join(name);
            std::fs::write(&p, b"%PDF-placeholder").expect("write input");
            p
        })
        .collect()
}
