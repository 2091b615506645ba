use crate::error::{PrcurveError, Result};

/// Area under a curve by the trapezoidal rule.
///
/// `x` must be monotonic. A non-increasing `x` is integrated in reverse so the area
/// stays positive; an `x` that changes direction is rejected.
pub fn auc(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(PrcurveError::InvalidInput(format!(
            "x length {} != y length {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(PrcurveError::Auc(format!(
            "at least 2 points are needed to compute area under curve, got {}",
            x.len()
        )));
    }

    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    let direction = if increasing {
        1.0
    } else if decreasing {
        -1.0
    } else {
        return Err(PrcurveError::Auc(
            "x is neither increasing nor decreasing".to_string(),
        ));
    };

    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();

    Ok(direction * area)
}
