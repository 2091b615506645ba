use super::{PrPoint, PrSeries};
use crate::error::{PrcurveError, Result};
use std::io::Write;
use std::path::Path;

const PRECISION_COLUMN: usize = 1;
const RECALL_COLUMN: usize = 2;

/// Parse precision-recall data.
///
/// Each non-empty line holds whitespace-separated columns `<rank> <precision> <recall>`;
/// the rank column and anything after the recall column are ignored. Lines starting
/// with `#` are comments. `source` is only used in error messages.
pub fn parse_pr_data(content: &str, source: &Path) -> Result<Vec<PrPoint>> {
    let mut points = Vec::new();
    let mut out_of_range = 0usize;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() <= RECALL_COLUMN {
            return Err(PrcurveError::Parse(format!(
                "{}:{}: expected at least 3 columns (rank precision recall), found {}",
                source.display(),
                line_no,
                fields.len()
            )));
        }

        let precision = parse_field(fields[PRECISION_COLUMN], "precision", source, line_no)?;
        let recall = parse_field(fields[RECALL_COLUMN], "recall", source, line_no)?;

        if !(0.0..=1.0).contains(&precision) || !(0.0..=1.0).contains(&recall) {
            out_of_range += 1;
        }
        points.push(PrPoint::new(precision, recall));
    }

    if out_of_range > 0 {
        log::warn!(
            "{}: {} point(s) have precision or recall outside [0, 1]",
            source.display(),
            out_of_range
        );
    }

    Ok(points)
}

fn parse_field(field: &str, name: &str, source: &Path, line_no: usize) -> Result<f64> {
    let value: f64 = field.parse().map_err(|_| {
        PrcurveError::Parse(format!(
            "{}:{}: {} value '{}' is not a number",
            source.display(),
            line_no,
            name,
            field
        ))
    })?;
    if !value.is_finite() {
        return Err(PrcurveError::Parse(format!(
            "{}:{}: {} value '{}' is not finite",
            source.display(),
            line_no,
            name,
            field
        )));
    }
    Ok(value)
}

/// Read a data file into a labelled series. The label is the file stem.
pub fn read_series(path: &Path) -> Result<PrSeries> {
    let content = std::fs::read_to_string(path)?;
    let points = parse_pr_data(&content, path)?;
    if points.is_empty() {
        return Err(PrcurveError::InvalidInput(format!(
            "{} contains no precision-recall points",
            path.display()
        )));
    }

    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    log::debug!("Read {} points from {}", points.len(), path.display());

    Ok(PrSeries {
        label,
        source: path.to_path_buf(),
        points,
    })
}

/// Write points in the three-column format, numbering ranks from 0.
pub fn write_pr_data<W: Write>(mut writer: W, points: &[PrPoint]) -> Result<()> {
    for (rank, point) in points.iter().enumerate() {
        writeln!(writer, "{} {} {}", rank, point.precision, point.recall)?;
    }
    writer.flush()?;
    Ok(())
}
