//! Precision-recall data files: one `<rank> <precision> <recall>` triple per line.

pub mod discover;
pub mod reader;

pub use discover::collect_inputs;
pub use reader::{parse_pr_data, read_series, write_pr_data};

use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// A single measured point on a precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrPoint {
    pub precision: f64,
    pub recall: f64,
}

impl PrPoint {
    pub fn new(precision: f64, recall: f64) -> Self {
        Self { precision, recall }
    }
}

/// Points read from one data file, in file order.
#[derive(Debug, Clone)]
pub struct PrSeries {
    /// Display label (file stem).
    pub label: String,
    pub source: PathBuf,
    pub points: Vec<PrPoint>,
}

impl PrSeries {
    pub fn recalls(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.recall).collect()
    }

    pub fn precisions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.precision).collect()
    }
}

/// Resolve inputs (files or directories) and read every data file, preserving order.
pub fn load_inputs(paths: &[PathBuf]) -> Result<Vec<PrSeries>> {
    let files = collect_inputs(paths)?;
    log::info!("Reading {} precision-recall data file(s)", files.len());
    files.iter().map(|path| read_series(path)).collect()
}
