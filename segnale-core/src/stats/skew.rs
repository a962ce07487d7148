/// Below this many observations a series is never classified as skewed.
pub const MIN_SKEW_OBSERVATIONS: usize = 10;

/// Bias-adjusted sample skewness (Fisher-Pearson `G1`).
///
/// Returns `None` for fewer than three values and `Some(0.0)` when the
/// series has no spread.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let (m2, mut m3) = values.iter().fold((0.0_f64, 0.0_f64), |(m2, m3), v| {
        let d = v - mean;
        (d.mul_add(d, m2), (d * d).mul_add(d, m3))
    });
    // floating point residue on constant input
    if m2.abs() < 1e-14 {
        return Some(0.0);
    }
    if m3.abs() < 1e-14 {
        m3 = 0.0;
    }
    Some(nf * (nf - 1.0).sqrt() / (nf - 2.0) * m3 / m2.powf(1.5))
}

/// Decide whether `values` is skewed enough to need the robust estimator.
///
/// Series shorter than [`MIN_SKEW_OBSERVATIONS`] are never skewed.
#[must_use]
pub fn is_skewed(values: &[f64], threshold: f64) -> bool {
    if values.len() < MIN_SKEW_OBSERVATIONS {
        return false;
    }
    sample_skewness(values).is_some_and(|s| s.abs() > threshold)
}
