//! Ranked result lists with their relevance judgements.

use super::metrics::pr_points;
use crate::data::write_pr_data;
use crate::error::{PrcurveError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One query's ranked results and the documents judged relevant for it.
#[derive(Debug, Clone, Deserialize)]
pub struct RankedRun {
    /// Query text; also names the output file.
    pub query: String,
    /// Optional tag appended to the file name (e.g. "stemmed").
    #[serde(default)]
    pub variant: Option<String>,
    /// Document ids in rank order, best first.
    pub retrieved: Vec<String>,
    /// Document ids judged relevant.
    #[serde(default)]
    pub relevant: Vec<String>,
}

impl RankedRun {
    /// Count of retrieved documents that are relevant.
    pub fn hits(&self) -> usize {
        let relevant: HashSet<&str> = self.relevant.iter().map(String::as_str).collect();
        self.retrieved
            .iter()
            .filter(|id| relevant.contains(id.as_str()))
            .count()
    }

    /// File name for this run's PR data: slugified query plus optional variant.
    pub fn file_name(&self) -> String {
        let mut name = slugify(&self.query);
        if name.is_empty() {
            name.push_str("query");
        }
        if let Some(variant) = self.variant.as_deref() {
            let variant = slugify(variant);
            if !variant.is_empty() {
                name.push('_');
                name.push_str(&variant);
            }
        }
        name.push_str(".txt");
        name
    }

    /// Write this run's per-rank PR points into `dir`, returning the file path.
    pub fn write_pr_file(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let file = std::fs::File::create(&path)?;
        let points = pr_points(&self.retrieved, &self.relevant);
        write_pr_data(std::io::BufWriter::new(file), &points)?;
        log::debug!("Wrote {} points for '{}' to {}", points.len(), self.query, path.display());
        Ok(path)
    }
}

/// Lowercase ASCII alphanumerics, everything else collapsed to single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Read a JSON array of runs.
pub fn load_runs(path: &Path) -> Result<Vec<RankedRun>> {
    let content = std::fs::read_to_string(path)?;
    let runs: Vec<RankedRun> = serde_json::from_str(&content)?;
    if runs.is_empty() {
        return Err(PrcurveError::InvalidInput(format!(
            "no runs in {}",
            path.display()
        )));
    }
    if let Some(run) = runs.iter().find(|r| r.retrieved.is_empty()) {
        return Err(PrcurveError::InvalidInput(format!(
            "run for '{}' has no retrieved documents",
            run.query
        )));
    }
    Ok(runs)
}
