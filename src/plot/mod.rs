//! Chart model for precision-recall figures and its SVG renderer.

pub mod svg;

pub use svg::{render_svg, write_svg};

use crate::analysis::{Analysis, AnalyzedSeries, ComparisonMode};
use crate::curve::InterpolatedCurve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    DashDot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: &'static str,
    pub dash: Dash,
    pub width: f64,
    pub marker: Marker,
}

impl SeriesStyle {
    const fn line(color: &'static str) -> Self {
        Self {
            color,
            dash: Dash::Solid,
            width: 1.5,
            marker: Marker::None,
        }
    }
}

const RAW: SeriesStyle = SeriesStyle::line("blue");
const RAW_STEMMED: SeriesStyle = SeriesStyle::line("red");
const INTERPOLATED: SeriesStyle = SeriesStyle {
    color: "green",
    dash: Dash::Solid,
    width: 1.5,
    marker: Marker::Circle,
};
const INTERPOLATED_STEMMED: SeriesStyle = SeriesStyle {
    color: "black",
    dash: Dash::DashDot,
    width: 2.0,
    marker: Marker::Square,
};

/// One line on a panel; points are (recall, precision).
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    /// Inputs drawn in this panel, shown under the title.
    pub caption: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
}

/// Lay out an analysis as panels: one per input (or input pair), then the
/// averaged curve(s) if any.
pub fn build_figure(analysis: &Analysis) -> Figure {
    let steps = analysis.options.levels;
    let mut panels: Vec<Panel> = analysis
        .groups()
        .map(|group| match analysis.mode {
            ComparisonMode::Single => single_panel(&group[0], steps),
            ComparisonMode::Paired => paired_panel(&group[0], &group[1], steps),
        })
        .collect();

    let caption = format!("mean of {} inputs", analysis.groups().count());
    let average_panel = match analysis.averages.as_slice() {
        [] => None,
        [avg] => Some(Panel {
            title: format!("Average precision = {:.6}", avg.area),
            caption,
            series: vec![interpolated_series(&avg.curve, steps, "", INTERPOLATED)],
        }),
        [non_stemmed, stemmed, ..] => Some(Panel {
            title: format!(
                "Average precision (non stemmed | stemmed) = {:.6} | {:.6}",
                non_stemmed.area, stemmed.area
            ),
            caption,
            series: vec![
                interpolated_series(&non_stemmed.curve, steps, " non-stemmed", INTERPOLATED),
                interpolated_series(&stemmed.curve, steps, " stemmed", INTERPOLATED_STEMMED),
            ],
        }),
    };
    panels.extend(average_panel);

    Figure {
        title: analysis.title.clone(),
        panels,
    }
}

fn single_panel(s: &AnalyzedSeries, steps: usize) -> Panel {
    Panel {
        title: format!("Average precision = {:.6}", s.average_precision),
        caption: s.series.label.clone(),
        series: vec![
            raw_series(s, "", RAW),
            interpolated_series(&s.interpolated, steps, "", INTERPOLATED),
        ],
    }
}

fn paired_panel(plain: &AnalyzedSeries, stemmed: &AnalyzedSeries, steps: usize) -> Panel {
    Panel {
        title: format!(
            "Average precision (non stemmed | stemmed) = {:.6} | {:.6}",
            plain.average_precision, stemmed.average_precision
        ),
        caption: format!("{} | {}", plain.series.label, stemmed.series.label),
        series: vec![
            raw_series(plain, " non-stemmed", RAW),
            raw_series(stemmed, " stemmed", RAW_STEMMED),
            interpolated_series(&plain.interpolated, steps, " non-stemmed", INTERPOLATED),
            interpolated_series(&stemmed.interpolated, steps, " stemmed", INTERPOLATED_STEMMED),
        ],
    }
}

fn raw_series(s: &AnalyzedSeries, suffix: &str, style: SeriesStyle) -> Series {
    Series {
        label: format!("Precision-Recall curve{}", suffix),
        points: s.series.points.iter().map(|p| (p.recall, p.precision)).collect(),
        style,
    }
}

fn interpolated_series(
    curve: &InterpolatedCurve,
    steps: usize,
    suffix: &str,
    style: SeriesStyle,
) -> Series {
    Series {
        label: format!("{}-step Interpolated Precision-Recall curve{}", steps, suffix),
        points: curve.points(),
        style,
    }
}
