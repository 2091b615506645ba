use super::InterpolatedCurve;
use crate::data::PrPoint;
use crate::error::{PrcurveError, Result};
use serde::{Deserialize, Serialize};

/// Number of recall levels in classic IR interpolation (0.0, 0.1, ..., 1.0).
pub const DEFAULT_RECALL_LEVELS: usize = 11;

/// Upper bound on the number of recall levels.
pub const MAX_RECALL_LEVELS: usize = 10_000;

/// How precision is read off a measured curve at a given recall level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMethod {
    /// Max precision from the first point whose recall exceeds the level onwards.
    #[default]
    ElevenPoint,
    /// Precision of the point whose recall is nearest to the level.
    NearestBucket,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::ElevenPoint => "eleven-point",
            InterpolationMethod::NearestBucket => "nearest-bucket",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `n` evenly spaced recall levels from 0.0 to 1.0 inclusive.
pub fn recall_levels(n: usize) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(PrcurveError::InvalidInput(format!(
            "at least 2 recall levels are required, got {}",
            n
        )));
    }
    if n > MAX_RECALL_LEVELS {
        return Err(PrcurveError::InvalidInput(format!(
            "at most {} recall levels are supported, got {}",
            MAX_RECALL_LEVELS, n
        )));
    }
    let last = (n - 1) as f64;
    Ok((0..n).map(|i| i as f64 / last).collect())
}

/// Interpolate a measured curve at every level in `levels`.
///
/// `points` must be in measurement (rank) order; the eleven-point rule depends on it.
pub fn interpolate(
    points: &[PrPoint],
    levels: &[f64],
    method: InterpolationMethod,
) -> Result<InterpolatedCurve> {
    if points.is_empty() {
        return Err(PrcurveError::InvalidInput(
            "cannot interpolate an empty precision-recall series".to_string(),
        ));
    }

    let precision = levels
        .iter()
        .map(|&level| match method {
            InterpolationMethod::ElevenPoint => eleven_point_value(level, points),
            InterpolationMethod::NearestBucket => nearest_bucket_value(level, points),
        })
        .collect();

    Ok(InterpolatedCurve {
        recall: levels.to_vec(),
        precision,
    })
}

fn eleven_point_value(level: f64, points: &[PrPoint]) -> f64 {
    match points.iter().position(|p| p.recall > level) {
        Some(start) => points[start..]
            .iter()
            .map(|p| p.precision)
            .fold(f64::NEG_INFINITY, f64::max),
        // Non-empty is checked by the caller.
        None => points[points.len() - 1].precision,
    }
}

fn nearest_bucket_value(level: f64, points: &[PrPoint]) -> f64 {
    let mut best = points[0];
    let mut best_distance = (best.recall - level).abs();
    for point in &points[1..] {
        let distance = (point.recall - level).abs();
        if distance < best_distance {
            best = *point;
            best_distance = distance;
        }
    }
    best.precision
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(data: &[(f64, f64)]) -> Vec<PrPoint> {
        data.iter().map(|&(p, r)| PrPoint::new(p, r)).collect()
    }

    #[test]
    fn recall_levels_eleven() {
        let levels = recall_levels(DEFAULT_RECALL_LEVELS).unwrap();
        assert_eq!(levels.len(), 11);
        assert_eq!(levels[0], 0.0);
        assert_eq!(levels[1], 0.1);
        assert_eq!(levels[3], 0.3);
        assert_eq!(levels[10], 1.0);
    }

    #[test]
    fn recall_levels_too_few() {
        assert!(recall_levels(1).is_err());
        assert!(recall_levels(0).is_err());
    }

    #[test]
    fn recall_levels_too_many() {
        assert_eq!(recall_levels(MAX_RECALL_LEVELS).unwrap().len(), MAX_RECALL_LEVELS);
        let err = recall_levels(MAX_RECALL_LEVELS + 1).unwrap_err();
        assert!(matches!(err, PrcurveError::InvalidInput(_)));
        assert!(recall_levels(usize::MAX).is_err());
    }

    #[test]
    fn eleven_point_takes_max_precision_after_level() {
        // (precision, recall) in rank order
        let points = pts(&[(1.0, 0.25), (0.5, 0.25), (0.67, 0.5), (0.5, 0.5), (0.6, 0.75)]);
        let curve =
            interpolate(&points, &[0.0, 0.3, 0.6], InterpolationMethod::ElevenPoint).unwrap();
        // level 0.0: first recall > 0 is index 0 -> max of all = 1.0
        // level 0.3: first recall > 0.3 is index 2 -> max(0.67, 0.5, 0.6)
        // level 0.6: first recall > 0.6 is index 4 -> 0.6
        assert_eq!(curve.precision, vec![1.0, 0.67, 0.6]);
    }

    #[test]
    fn eleven_point_uses_strictly_greater_recall() {
        let points = pts(&[(1.0, 0.5), (0.2, 1.0)]);
        let curve = interpolate(&points, &[0.5], InterpolationMethod::ElevenPoint).unwrap();
        // recall 0.5 is not > 0.5, so the search starts at the second point
        assert_eq!(curve.precision, vec![0.2]);
    }

    #[test]
    fn eleven_point_falls_back_to_last_precision() {
        let points = pts(&[(1.0, 0.2), (0.4, 0.4)]);
        let curve = interpolate(&points, &[0.9, 1.0], InterpolationMethod::ElevenPoint).unwrap();
        assert_eq!(curve.precision, vec![0.4, 0.4]);
    }

    #[test]
    fn nearest_bucket_picks_closest_recall() {
        let points = pts(&[(1.0, 0.1), (0.8, 0.45), (0.3, 0.9)]);
        let curve =
            interpolate(&points, &[0.0, 0.5, 1.0], InterpolationMethod::NearestBucket).unwrap();
        assert_eq!(curve.precision, vec![1.0, 0.8, 0.3]);
    }

    #[test]
    fn nearest_bucket_tie_prefers_earlier_point() {
        let points = pts(&[(0.9, 0.25), (0.1, 0.75)]);
        let curve = interpolate(&points, &[0.5], InterpolationMethod::NearestBucket).unwrap();
        assert_eq!(curve.precision, vec![0.9]);
    }

    #[test]
    fn interpolate_empty_series_is_error() {
        let err = interpolate(&[], &[0.0], InterpolationMethod::ElevenPoint).unwrap_err();
        assert!(matches!(err, PrcurveError::InvalidInput(_)));
    }

    #[test]
    fn method_display_matches_serde_name() {
        assert_eq!(InterpolationMethod::NearestBucket.to_string(), "nearest-bucket");
        let parsed: InterpolationMethod = serde_json::from_str("\"eleven-point\"").unwrap();
        assert_eq!(parsed, InterpolationMethod::ElevenPoint);
    }
}
