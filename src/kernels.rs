//! Rolling and recursive numeric kernels.
//!
//! Every helper takes a fixed-length slice and returns a vector of the
//! same length, with `f64::NAN` marking the warmup prefix. Inputs may
//! themselves start with a NaN prefix (composed kernels such as an EMA of
//! another indicator line); recursive kernels skip to the first finite
//! value before seeding. Kernels never panic on short input; they return
//! an all-NaN vector instead.

use crate::error::TtiError;

/// Seeding rule for [`ema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmaSeed {
    /// Seed the recurrence at index `p - 1` with the simple mean of the
    /// first `p` values.
    Mean,
    /// Seed the recurrence at index `p - 1` with the raw value there
    /// (DEMA/TEMA layering).
    Raw,
}

fn first_finite(x: &[f64]) -> Option<usize> {
    x.iter().position(|v| v.is_finite())
}

/// Simple moving average over a window of `period`.
pub fn sma(x: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..x.len() {
        let window = &x[i + 1 - period..=i];
        out[i] = window.iter().sum::<f64>() / period as f64;
    }
    out
}

/// Exponential moving average with smoothing `2 / (period + 1)`.
pub fn ema(x: &[f64], period: usize, seed: EmaSeed) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = first_finite(x) else {
        return out;
    };
    let seed_at = start + period - 1;
    if seed_at >= x.len() {
        return out;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    out[seed_at] = match seed {
        EmaSeed::Mean => x[start..=seed_at].iter().sum::<f64>() / period as f64,
        EmaSeed::Raw => x[seed_at],
    };
    for i in (seed_at + 1)..x.len() {
        out[i] = alpha * x[i] + (1.0 - alpha) * out[i - 1];
    }
    out
}

/// Wilder smoothing: mean seed, then `y[i] = y[i-1] + (x[i] - y[i-1]) / p`.
pub fn wilder(x: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = first_finite(x) else {
        return out;
    };
    let seed_at = start + period - 1;
    if seed_at >= x.len() {
        return out;
    }
    out[seed_at] = x[start..=seed_at].iter().sum::<f64>() / period as f64;
    for i in (seed_at + 1)..x.len() {
        out[i] = out[i - 1] + (x[i] - out[i - 1]) / period as f64;
    }
    out
}

/// Rolling population standard deviation (divides by N).
pub fn rolling_std(x: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..x.len() {
        let window = &x[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance =
            window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / period as f64;
        out[i] = variance.sqrt();
    }
    out
}

/// Population standard deviation over the whole slice.
pub fn full_series_std(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / x.len() as f64;
    variance.sqrt()
}

/// Rolling minimum over a window of `period`. A NaN inside the window
/// yields NaN.
pub fn rolling_min(x: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(x, period, |window| {
        window.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// Rolling maximum over a window of `period`. A NaN inside the window
/// yields NaN.
pub fn rolling_max(x: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(x, period, |window| {
        window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

fn rolling_extreme(x: &[f64], period: usize, pick: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..x.len() {
        let window = &x[i + 1 - period..=i];
        out[i] = if window.iter().any(|v| v.is_nan()) {
            f64::NAN
        } else {
            pick(window)
        };
    }
    out
}

/// Rolling ordinary-least-squares fit `y ~ a + b*t`, `t = 0..p-1`.
///
/// Returns `(slope, intercept)` vectors, each placed at the window's end
/// row. Fails with [`TtiError::NotConverged`] when the normal equation is
/// degenerate (window shorter than two points).
pub fn rolling_ols(x: &[f64], period: usize) -> Result<(Vec<f64>, Vec<f64>), TtiError> {
    if period < 2 {
        return Err(TtiError::NotConverged { length: period });
    }
    let p = period as f64;
    let sum_t = (period * (period - 1)) as f64 / 2.0;
    let sum_t2 = ((period - 1) * period * (2 * period - 1)) as f64 / 6.0;
    let denom = p * sum_t2 - sum_t * sum_t;
    if denom.abs() < f64::EPSILON {
        return Err(TtiError::NotConverged { length: period });
    }

    let mut slope = vec![f64::NAN; x.len()];
    let mut intercept = vec![f64::NAN; x.len()];
    for i in (period - 1)..x.len() {
        let window = &x[i + 1 - period..=i];
        let sum_y: f64 = window.iter().sum();
        let sum_ty: f64 = window
            .iter()
            .enumerate()
            .map(|(t, &y)| t as f64 * y)
            .sum();
        let b = (p * sum_ty - sum_t * sum_y) / denom;
        slope[i] = b;
        intercept[i] = (sum_y - b * sum_t) / p;
    }
    Ok((slope, intercept))
}

/// True range: `max(H - L, |prevC - H|, |prevC - L|)`. Row 0 falls back to
/// the plain high-low range.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(high.len());
    for i in 0..high.len() {
        let tr = if i == 0 {
            high[0] - low[0]
        } else {
            let prev_close = close[i - 1];
            (high[i] - low[i])
                .max((prev_close - high[i]).abs())
                .max((prev_close - low[i]).abs())
        };
        out.push(tr);
    }
    out
}

/// Running cumulative sum. NaN inputs count as zero so a warmup prefix
/// does not poison the accumulation.
pub fn cumsum(x: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    x.iter()
        .map(|&v| {
            if v.is_finite() {
                total += v;
            }
            total
        })
        .collect()
}

/// One-step difference with lag `k`: `x[i] - x[i-k]`, NaN for `i < k`.
pub fn diff(x: &[f64], k: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    for i in k..x.len() {
        out[i] = x[i] - x[i - k];
    }
    out
}

/// Shift forward by `k` rows: `y[i] = x[i-k]`, NaN for `i < k`.
pub fn shift(x: &[f64], k: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; x.len()];
    for i in k..x.len() {
        out[i] = x[i - k];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_flat_series() {
        let x = vec![5.0; 25];
        let out = sma(&x, 20);
        assert!(out[..19].iter().all(|v| v.is_nan()));
        for v in &out[19..] {
            assert_relative_eq!(*v, 5.0);
        }
    }

    #[test]
    fn sma_hand_checked() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 1.5);
        assert_relative_eq!(out[2], 2.5);
        assert_relative_eq!(out[3], 3.5);
    }

    #[test]
    fn ema_mean_seed_matches_sma_at_seed_row() {
        let x = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let out = ema(&x, 3, EmaSeed::Mean);
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 20.0);
        // alpha = 0.5: 0.5*40 + 0.5*20 = 30
        assert_relative_eq!(out[3], 30.0);
        assert_relative_eq!(out[4], 40.0);
    }

    #[test]
    fn ema_raw_seed() {
        let x = vec![10.0, 20.0, 30.0, 40.0];
        let out = ema(&x, 3, EmaSeed::Raw);
        assert_relative_eq!(out[2], 30.0);
        assert_relative_eq!(out[3], 35.0);
    }

    #[test]
    fn ema_skips_nan_prefix() {
        let x = vec![f64::NAN, f64::NAN, 10.0, 20.0, 30.0, 40.0];
        let out = ema(&x, 3, EmaSeed::Mean);
        assert!(out[3].is_nan());
        assert_relative_eq!(out[4], 20.0);
    }

    #[test]
    fn wilder_seed_and_recurrence() {
        let x = vec![10.0, 20.0, 30.0, 40.0];
        let out = wilder(&x, 3);
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 20.0);
        // 20 + (40 - 20) / 3
        assert_relative_eq!(out[3], 20.0 + 20.0 / 3.0);
    }

    #[test]
    fn rolling_std_population_form() {
        let out = rolling_std(&[10.0, 20.0, 30.0], 3);
        let mean = 20.0;
        let expected =
            (((10.0 - mean) as f64).powi(2) * 2.0 / 3.0).sqrt();
        assert_relative_eq!(out[2], expected);
    }

    #[test]
    fn rolling_min_max() {
        let x = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        assert_relative_eq!(rolling_min(&x, 3)[2], 1.0);
        assert_relative_eq!(rolling_max(&x, 3)[4], 5.0);
        assert!(rolling_max(&x, 3)[1].is_nan());
    }

    #[test]
    fn rolling_ols_recovers_exact_line() {
        // y = 2 + 3t on every window of a linear series
        let x: Vec<f64> = (0..10).map(|t| 2.0 + 3.0 * t as f64).collect();
        let (slope, intercept) = rolling_ols(&x, 4).unwrap();
        assert!(slope[2].is_nan());
        for i in 3..10 {
            assert_relative_eq!(slope[i], 3.0, epsilon = 1e-9);
            assert_relative_eq!(intercept[i], x[i + 1 - 4], epsilon = 1e-9);
        }
    }

    #[test]
    fn rolling_ols_degenerate_window() {
        assert!(matches!(
            rolling_ols(&[1.0, 2.0], 1),
            Err(TtiError::NotConverged { length: 1 })
        ));
    }

    #[test]
    fn true_range_picks_largest_span() {
        let high = vec![110.0, 110.0];
        let low = vec![90.0, 90.0];
        let close = vec![70.0, 70.0];
        let tr = true_range(&high, &low, &close);
        assert_relative_eq!(tr[0], 20.0);
        // |70 - 110| = 40 dominates
        assert_relative_eq!(tr[1], 40.0);
    }

    #[test]
    fn cumsum_ignores_nan() {
        let out = cumsum(&[f64::NAN, 1.0, 2.0]);
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[2], 3.0);
    }

    #[test]
    fn diff_and_shift() {
        let x = vec![1.0, 4.0, 9.0];
        let d = diff(&x, 1);
        assert!(d[0].is_nan());
        assert_relative_eq!(d[2], 5.0);
        let s = shift(&x, 2);
        assert!(s[1].is_nan());
        assert_relative_eq!(s[2], 1.0);
    }

    #[test]
    fn kernels_total_on_short_input() {
        assert!(sma(&[1.0], 5).iter().all(|v| v.is_nan()));
        assert!(ema(&[1.0], 5, EmaSeed::Mean).iter().all(|v| v.is_nan()));
        assert!(wilder(&[], 5).is_empty());
    }
}
