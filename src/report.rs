//! Numeric summary of an analysis, as a text table or JSON.

use crate::analysis::{Analysis, ComparisonMode};
use crate::curve::{InterpolatedCurve, InterpolationMethod};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub label: String,
    pub source: String,
    pub points: usize,
    pub average_precision: f64,
    pub interpolated_average_precision: f64,
    pub mean_interpolated_precision: f64,
    pub interpolated: InterpolatedCurve,
}

/// Non-stemmed vs stemmed comparison for one pair of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub non_stemmed: String,
    pub stemmed: String,
    pub non_stemmed_average_precision: f64,
    pub stemmed_average_precision: f64,
    /// stemmed - non-stemmed
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageReport {
    pub label: String,
    pub average_precision: f64,
    pub mean_interpolated_precision: f64,
    pub interpolated: InterpolatedCurve,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub mode: ComparisonMode,
    pub method: InterpolationMethod,
    pub levels: usize,
    pub generated_at: DateTime<Utc>,
    pub series: Vec<SeriesReport>,
    pub pairs: Vec<PairReport>,
    pub averages: Vec<AverageReport>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let series = analysis
            .series
            .iter()
            .map(|s| SeriesReport {
                label: s.series.label.clone(),
                source: s.series.source.display().to_string(),
                points: s.series.points.len(),
                average_precision: s.average_precision,
                interpolated_average_precision: s.interpolated_average_precision,
                mean_interpolated_precision: s.interpolated.mean_precision(),
                interpolated: s.interpolated.clone(),
            })
            .collect();

        let pairs = match analysis.mode {
            ComparisonMode::Single => Vec::new(),
            ComparisonMode::Paired => analysis
                .groups()
                .map(|pair| PairReport {
                    non_stemmed: pair[0].series.label.clone(),
                    stemmed: pair[1].series.label.clone(),
                    non_stemmed_average_precision: pair[0].average_precision,
                    stemmed_average_precision: pair[1].average_precision,
                    delta: pair[1].average_precision - pair[0].average_precision,
                })
                .collect(),
        };

        let averages = analysis
            .averages
            .iter()
            .map(|a| AverageReport {
                label: a.label.clone(),
                average_precision: a.area,
                mean_interpolated_precision: a.curve.mean_precision(),
                interpolated: a.curve.clone(),
            })
            .collect();

        Self {
            title: analysis.title.clone(),
            mode: analysis.mode,
            method: analysis.options.method,
            levels: analysis.options.levels,
            generated_at: Utc::now(),
            series,
            pairs,
            averages,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable table.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", self.title);
        let _ = writeln!(
            out,
            "{}-level {} interpolation, {} input(s)\n",
            self.levels,
            self.method,
            self.series.len()
        );

        let _ = writeln!(
            out,
            "{:<32} {:>6} {:>10} {:>12} {:>10}",
            "series", "points", "AP", "interp AP", "mean P"
        );
        for s in &self.series {
            let _ = writeln!(
                out,
                "{:<32} {:>6} {:>10.6} {:>12.6} {:>10.6}",
                s.label,
                s.points,
                s.average_precision,
                s.interpolated_average_precision,
                s.mean_interpolated_precision
            );
        }

        if !self.pairs.is_empty() {
            let _ = writeln!(out, "\nnon-stemmed | stemmed");
            for p in &self.pairs {
                let _ = writeln!(
                    out,
                    "  {} | {}: {:.6} | {:.6} ({:+.6})",
                    p.non_stemmed,
                    p.stemmed,
                    p.non_stemmed_average_precision,
                    p.stemmed_average_precision,
                    p.delta
                );
            }
        }

        for a in &self.averages {
            let _ = writeln!(
                out,
                "\n{}: AP {:.6}, mean P {:.6}",
                a.label, a.average_precision, a.mean_interpolated_precision
            );
            let row: Vec<String> = a
                .interpolated
                .points()
                .iter()
                .map(|(r, p)| format!("{:.2}:{:.3}", r, p))
                .collect();
            let _ = writeln!(out, "  {}", row.join(" "));
        }

        out
    }
}
