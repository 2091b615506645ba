use crate::error::{PrcurveError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve command-line inputs to data files.
///
/// Files are kept as given (any extension). Directories are walked recursively and
/// contribute their `.txt`, `.dat` and `.pr` files in pairing order (see
/// [`pairing_key`]), so `q1.txt, q1_stemmed.txt, q2.txt, ..., q10.txt` stay adjacent.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found = discover_data_files(path);
            log::info!("Discovered {} data files in {}", found.len(), path.display());
            files.append(&mut found);
        } else {
            return Err(PrcurveError::InvalidInput(format!(
                "input path does not exist: {}",
                path.display()
            )));
        }
    }

    Ok(files)
}

fn discover_data_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            let extension = e
                .path()
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_lowercase();
            matches!(extension.as_str(), "txt" | "dat" | "pr")
        })
        .map(|e| e.into_path())
        .collect();
    files.sort_by_cached_key(|path| pairing_key(path));
    files
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    /// Digit run without leading zeros, ordered by length first.
    Number(usize, String),
    Text(String),
}

fn natural_chunks(s: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        chunks.push(if digits {
            let trimmed = chunk.trim_start_matches('0');
            Chunk::Number(trimmed.len(), trimmed.to_string())
        } else {
            Chunk::Text(chunk.to_string())
        });
        rest = tail;
    }
    chunks
}

/// Sort key for discovered files: directory, then the stem up to its first `_`
/// in natural order (`q2` before `q10`), then the full stem, then the extension.
/// A file and its `_variant` share the first two parts and sort next to each other.
fn pairing_key(path: &Path) -> (PathBuf, Vec<Chunk>, String, String) {
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = natural_chunks(stem.split('_').next().unwrap_or_default());
    (parent, base, stem, extension)
}
