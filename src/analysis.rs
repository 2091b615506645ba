//! Ties data, interpolation and AUC together for a set of input files.

use crate::config::CurveConfig;
use crate::curve::{
    auc, average_curves, interpolate, recall_levels, InterpolatedCurve, InterpolationMethod,
};
use crate::data::PrSeries;
use crate::error::{PrcurveError, Result};
use serde::Serialize;

/// How input files relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Every file is an independent curve.
    #[default]
    Single,
    /// Files come in consecutive (non-stemmed, stemmed) pairs.
    Paired,
}

/// Interpolation settings applied to every series.
#[derive(Debug, Clone, Copy)]
pub struct CurveOptions {
    pub method: InterpolationMethod,
    pub levels: usize,
    pub average: bool,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::default(),
            levels: crate::curve::DEFAULT_RECALL_LEVELS,
            average: true,
        }
    }
}

impl From<&CurveConfig> for CurveOptions {
    fn from(config: &CurveConfig) -> Self {
        Self {
            method: config.method,
            levels: config.levels,
            average: config.average,
        }
    }
}

impl CurveOptions {
    /// Apply command-line flags on top of configured options. `None` keeps the
    /// configured value; `no_average` can only turn averaging off.
    pub fn with_overrides(
        mut self,
        method: Option<InterpolationMethod>,
        levels: Option<usize>,
        no_average: bool,
    ) -> Self {
        if let Some(method) = method {
            self.method = method;
        }
        if let Some(levels) = levels {
            self.levels = levels;
        }
        if no_average {
            self.average = false;
        }
        self
    }
}

/// One input file with its interpolated curve and areas.
#[derive(Debug, Clone)]
pub struct AnalyzedSeries {
    pub series: PrSeries,
    pub interpolated: InterpolatedCurve,
    /// AUC of the raw (recall, precision) points.
    pub average_precision: f64,
    /// AUC of the interpolated curve.
    pub interpolated_average_precision: f64,
}

/// Mean interpolated curve over several inputs.
#[derive(Debug, Clone)]
pub struct AveragedCurve {
    pub label: String,
    pub curve: InterpolatedCurve,
    pub area: f64,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub title: String,
    pub mode: ComparisonMode,
    pub options: CurveOptions,
    pub series: Vec<AnalyzedSeries>,
    /// Empty unless averaging is enabled and there is more than one group.
    pub averages: Vec<AveragedCurve>,
}

impl Analysis {
    /// Series grouped the way they are plotted: one per panel in single mode,
    /// two per panel in paired mode.
    pub fn groups(&self) -> std::slice::Chunks<'_, AnalyzedSeries> {
        self.series.chunks(self.mode.group_size())
    }
}

impl ComparisonMode {
    pub fn group_size(&self) -> usize {
        match self {
            ComparisonMode::Single => 1,
            ComparisonMode::Paired => 2,
        }
    }
}

/// Interpolate every series, compute its average precision, and build the
/// averaged curve(s).
pub fn analyze(
    title: impl Into<String>,
    series: Vec<PrSeries>,
    mode: ComparisonMode,
    options: CurveOptions,
) -> Result<Analysis> {
    if series.is_empty() {
        return Err(PrcurveError::InvalidInput(
            "at least one precision-recall data file is required".to_string(),
        ));
    }
    if mode == ComparisonMode::Paired && series.len() % 2 != 0 {
        return Err(PrcurveError::InvalidInput(format!(
            "paired mode needs an even number of files (non-stemmed, stemmed), got {}",
            series.len()
        )));
    }

    if mode == ComparisonMode::Paired {
        for pair in series.chunks(2) {
            if !is_variant_of(&pair[1].label, &pair[0].label) {
                log::warn!(
                    "pairing '{}' with '{}': expected the second file to be named '{}_<variant>'",
                    pair[0].label,
                    pair[1].label,
                    pair[0].label
                );
            }
        }
    }

    let levels = recall_levels(options.levels)?;

    let analyzed = series
        .into_iter()
        .map(|series| analyze_series(series, &levels, options.method))
        .collect::<Result<Vec<_>>>()?;

    let group_size = mode.group_size();
    let group_count = analyzed.len() / group_size;

    let mut averages = Vec::new();
    if options.average && group_count > 1 {
        for slot in 0..group_size {
            let curves: Vec<&InterpolatedCurve> = analyzed
                .iter()
                .skip(slot)
                .step_by(group_size)
                .map(|a| &a.interpolated)
                .collect();
            let curve = average_curves(&curves)?;
            let area = curve.area()?;
            averages.push(AveragedCurve {
                label: average_label(mode, slot).to_string(),
                curve,
                area,
            });
        }
        log::info!("Averaged interpolated curves over {} inputs", group_count);
    }

    Ok(Analysis {
        title: title.into(),
        mode,
        options,
        series: analyzed,
        averages,
    })
}

fn analyze_series(
    series: PrSeries,
    levels: &[f64],
    method: InterpolationMethod,
) -> Result<AnalyzedSeries> {
    let interpolated = interpolate(&series.points, levels, method)?;
    let interpolated_average_precision = interpolated.area()?;

    // A single measured point has no area; fall back to the interpolated curve.
    let average_precision = if series.points.len() < 2 {
        log::warn!(
            "{}: only one data point, using interpolated area as average precision",
            series.source.display()
        );
        interpolated_average_precision
    } else {
        auc(&series.recalls(), &series.precisions()).map_err(|e| match e {
            PrcurveError::Auc(msg) => {
                PrcurveError::Auc(format!("{}: {}", series.source.display(), msg))
            }
            other => other,
        })?
    };

    log::info!(
        "{}: {} points, average precision {:.6} (interpolated {:.6})",
        series.label,
        series.points.len(),
        average_precision,
        interpolated_average_precision
    );

    Ok(AnalyzedSeries {
        series,
        interpolated,
        average_precision,
        interpolated_average_precision,
    })
}

/// Whether `label` names a variant of `base`, as `q1_stemmed` is of `q1`.
fn is_variant_of(label: &str, base: &str) -> bool {
    label
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|variant| !variant.is_empty())
}

fn average_label(mode: ComparisonMode, slot: usize) -> &'static str {
    match (mode, slot) {
        (ComparisonMode::Single, _) => "average",
        (ComparisonMode::Paired, 0) => "average non-stemmed",
        (ComparisonMode::Paired, _) => "average stemmed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PrPoint;
    use std::path::PathBuf;

    fn series(label: &str, data: &[(f64, f64)]) -> PrSeries {
        PrSeries {
            label: label.to_string(),
            source: PathBuf::from(format!("{}.txt", label)),
            points: data.iter().map(|&(p, r)| PrPoint::new(p, r)).collect(),
        }
    }

    fn perfect(label: &str) -> PrSeries {
        series(label, &[(1.0, 0.5), (1.0, 1.0)])
    }

    fn poor(label: &str) -> PrSeries {
        series(label, &[(0.0, 0.0), (0.5, 0.5), (0.5, 1.0)])
    }

    #[test]
    fn analyze_single_series_without_average() {
        let analysis = analyze(
            "fig",
            vec![perfect("q1")],
            ComparisonMode::Single,
            CurveOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.series.len(), 1);
        assert!(analysis.averages.is_empty());
        let s = &analysis.series[0];
        assert!((s.average_precision - 0.5).abs() < 1e-12);
        assert_eq!(s.interpolated.len(), 11);
        assert!(s.interpolated.precision.iter().all(|&p| p == 1.0));
        assert!((s.interpolated_average_precision - 1.0).abs() < 1e-12);
    }

    #[test]
    fn analyze_single_mode_averages_all_inputs() {
        let analysis = analyze(
            "fig",
            vec![perfect("a"), poor("b")],
            ComparisonMode::Single,
            CurveOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.averages.len(), 1);
        let avg = &analysis.averages[0];
        assert_eq!(avg.label, "average");
        // poor: levels below 0.5 see max(0.5, 0.5) = 0.5; levels >= 0.5 see 0.5.
        assert!(avg.curve.precision.iter().all(|&p| (p - 0.75).abs() < 1e-12));
        assert!((avg.area - 0.75).abs() < 1e-12);
    }

    #[test]
    fn analyze_respects_average_flag() {
        let options = CurveOptions {
            average: false,
            ..CurveOptions::default()
        };
        let analysis = analyze(
            "fig",
            vec![perfect("a"), poor("b")],
            ComparisonMode::Single,
            options,
        )
        .unwrap();
        assert!(analysis.averages.is_empty());
    }

    #[test]
    fn analyze_paired_averages_per_slot() {
        let analysis = analyze(
            "fig",
            vec![poor("q1"), perfect("q1_stemmed"), poor("q2"), perfect("q2_stemmed")],
            ComparisonMode::Paired,
            CurveOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.groups().count(), 2);
        assert_eq!(analysis.averages.len(), 2);
        assert_eq!(analysis.averages[0].label, "average non-stemmed");
        let non_stemmed = &analysis.averages[0].curve.precision;
        let stemmed = &analysis.averages[1].curve.precision;
        assert!(non_stemmed.iter().all(|&p| (p - 0.5).abs() < 1e-12));
        assert!(stemmed.iter().all(|&p| (p - 1.0).abs() < 1e-12));
    }

    #[test]
    fn analyze_single_pair_has_no_average() {
        let analysis = analyze(
            "fig",
            vec![poor("q1"), perfect("q1_stemmed")],
            ComparisonMode::Paired,
            CurveOptions::default(),
        )
        .unwrap();
        assert!(analysis.averages.is_empty());
    }

    #[test]
    fn analyze_paired_rejects_odd_count() {
        let err = analyze(
            "fig",
            vec![poor("a"), poor("b"), poor("c")],
            ComparisonMode::Paired,
            CurveOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PrcurveError::InvalidInput(_)));
    }

    #[test]
    fn analyze_rejects_no_inputs() {
        assert!(analyze("fig", vec![], ComparisonMode::Single, CurveOptions::default()).is_err());
    }

    #[test]
    fn analyze_non_monotonic_recall_names_file() {
        let bad = series("bad", &[(1.0, 0.5), (1.0, 0.2), (1.0, 0.9)]);
        let err =
            analyze("fig", vec![bad], ComparisonMode::Single, CurveOptions::default()).unwrap_err();
        assert!(err.to_string().contains("bad.txt"));
    }

    #[test]
    fn analyze_single_point_uses_interpolated_area() {
        let one = series("one", &[(0.4, 1.0)]);
        let analysis =
            analyze("fig", vec![one], ComparisonMode::Single, CurveOptions::default()).unwrap();
        let s = &analysis.series[0];
        assert_eq!(s.average_precision, s.interpolated_average_precision);
    }

    #[test]
    fn variant_labels_match_their_base() {
        assert!(is_variant_of("q1_stemmed", "q1"));
        assert!(is_variant_of("motion-control_porter", "motion-control"));
        assert!(!is_variant_of("q10_stemmed", "q1"));
        assert!(!is_variant_of("q10", "q1"));
        assert!(!is_variant_of("q1_", "q1"));
        assert!(!is_variant_of("q1", "q1"));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let configured = CurveOptions {
            method: InterpolationMethod::NearestBucket,
            levels: 21,
            average: true,
        };

        let unchanged = configured.with_overrides(None, None, false);
        assert_eq!(unchanged.method, InterpolationMethod::NearestBucket);
        assert_eq!(unchanged.levels, 21);
        assert!(unchanged.average);

        let overridden =
            configured.with_overrides(Some(InterpolationMethod::ElevenPoint), Some(5), true);
        assert_eq!(overridden.method, InterpolationMethod::ElevenPoint);
        assert_eq!(overridden.levels, 5);
        assert!(!overridden.average);
    }

    #[test]
    fn no_average_flag_cannot_turn_averaging_on() {
        let configured = CurveOptions {
            average: false,
            ..CurveOptions::default()
        };
        assert!(!configured.with_overrides(None, None, false).average);
    }
}
