use super::InterpolatedCurve;
use crate::error::{PrcurveError, Result};

const LEVEL_TOLERANCE: f64 = 1e-12;

/// Element-wise mean of interpolated curves sampled at the same recall levels.
pub fn average_curves(curves: &[&InterpolatedCurve]) -> Result<InterpolatedCurve> {
    let first = curves.first().ok_or_else(|| {
        PrcurveError::InvalidInput("cannot average an empty set of curves".to_string())
    })?;

    for (index, curve) in curves.iter().enumerate().skip(1) {
        let same_levels = curve.recall.len() == first.recall.len()
            && curve
                .recall
                .iter()
                .zip(&first.recall)
                .all(|(a, b)| (a - b).abs() <= LEVEL_TOLERANCE);
        if !same_levels {
            return Err(PrcurveError::InvalidInput(format!(
                "curve {} is sampled at different recall levels than curve 0",
                index
            )));
        }
    }

    let count = curves.len() as f64;
    let precision = (0..first.len())
        .map(|i| curves.iter().map(|c| c.precision[i]).sum::<f64>() / count)
        .collect();

    Ok(InterpolatedCurve {
        recall: first.recall.clone(),
        precision,
    })
}
