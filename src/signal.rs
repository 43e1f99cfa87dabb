//! Trading signals and shared trailing-window rules.
//!
//! A signal is one of `buy`, `hold`, `sell` with the wire mapping
//! `buy = -1`, `hold = 0`, `sell = +1`. The rule helpers below examine the
//! last few rows of a series and are total: a window that is too short or
//! still inside the NaN warmup produces `Hold`, never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => -1,
            Signal::Hold => 0,
            Signal::Sell => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Hold => "hold",
            Signal::Sell => "sell",
        }
    }
}

/// Direction of a strictly monotone run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
}

fn last_two(x: &[f64]) -> Option<(f64, f64)> {
    if x.len() < 2 {
        return None;
    }
    let prev = x[x.len() - 2];
    let cur = x[x.len() - 1];
    (prev.is_finite() && cur.is_finite()).then_some((prev, cur))
}

/// `a` crossed above `b` between the last two rows.
pub fn crossed_above(a: &[f64], b: &[f64]) -> bool {
    match (last_two(a), last_two(b)) {
        (Some((a_prev, a_cur)), Some((b_prev, b_cur))) => a_prev <= b_prev && a_cur > b_cur,
        _ => false,
    }
}

/// `a` crossed below `b` between the last two rows.
pub fn crossed_below(a: &[f64], b: &[f64]) -> bool {
    match (last_two(a), last_two(b)) {
        (Some((a_prev, a_cur)), Some((b_prev, b_cur))) => a_prev >= b_prev && a_cur < b_cur,
        _ => false,
    }
}

pub fn crossed_above_level(x: &[f64], level: f64) -> bool {
    matches!(last_two(x), Some((prev, cur)) if prev <= level && cur > level)
}

pub fn crossed_below_level(x: &[f64], level: f64) -> bool {
    matches!(last_two(x), Some((prev, cur)) if prev >= level && cur < level)
}

/// Price-series cross rule: close crossing above the line is bullish.
pub fn price_cross(close: &[f64], line: &[f64]) -> Signal {
    if crossed_above(close, line) {
        Signal::Buy
    } else if crossed_below(close, line) {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Strict three-change trend over the trailing four values.
pub fn monotone_trend(x: &[f64]) -> Option<Trend> {
    if x.len() < 4 {
        return None;
    }
    let tail = &x[x.len() - 4..];
    if tail.iter().any(|v| !v.is_finite()) {
        return None;
    }
    if tail.windows(2).all(|w| w[1] > w[0]) {
        Some(Trend::Rising)
    } else if tail.windows(2).all(|w| w[1] < w[0]) {
        Some(Trend::Falling)
    } else {
        None
    }
}

/// Trend rule with price polarity: a rising run is bullish.
pub fn trend_signal_price(x: &[f64]) -> Signal {
    match monotone_trend(x) {
        Some(Trend::Rising) => Signal::Buy,
        Some(Trend::Falling) => Signal::Sell,
        None => Signal::Hold,
    }
}

/// Trend rule with cumulative-volume polarity, reversed against price.
pub fn trend_signal_volume(x: &[f64]) -> Signal {
    match monotone_trend(x) {
        Some(Trend::Rising) => Signal::Sell,
        Some(Trend::Falling) => Signal::Buy,
        None => Signal::Hold,
    }
}

/// Mean-reversion zero-line rule: an upward zero cross is bearish.
pub fn zero_cross_reversion(x: &[f64]) -> Signal {
    if crossed_above_level(x, 0.0) {
        Signal::Sell
    } else if crossed_below_level(x, 0.0) {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Direction-following zero-line rule: an upward zero cross is bullish.
pub fn zero_cross_momentum(x: &[f64]) -> Signal {
    if crossed_above_level(x, 0.0) {
        Signal::Buy
    } else if crossed_below_level(x, 0.0) {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Overbought/oversold rule: buy on leaving the oversold region upward,
/// sell on leaving the overbought region downward.
pub fn threshold_exit(x: &[f64], lower: f64, upper: f64) -> Signal {
    match last_two(x) {
        Some((prev, cur)) if prev < lower && cur >= lower => Signal::Buy,
        Some((prev, cur)) if prev > upper && cur <= upper => Signal::Sell,
        _ => Signal::Hold,
    }
}

/// Band rule: sell when close crosses above the upper band, buy when it
/// crosses below the lower band.
pub fn band_envelope(close: &[f64], upper: &[f64], lower: &[f64]) -> Signal {
    if crossed_above(close, upper) {
        Signal::Sell
    } else if crossed_below(close, lower) {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Divergence over a trailing span: a fresh close-price low the indicator
/// does not confirm is bullish, a fresh unconfirmed high is bearish.
pub fn divergence(close: &[f64], indicator: &[f64], span: usize) -> Signal {
    if close.len() < span || indicator.len() < span {
        return Signal::Hold;
    }
    let close_tail = &close[close.len() - span..];
    let ind_tail = &indicator[indicator.len() - span..];
    if ind_tail.iter().any(|v| !v.is_finite()) {
        return Signal::Hold;
    }

    let argmin = |x: &[f64]| {
        x.iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap()
    };
    let argmax = |x: &[f64]| {
        x.iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap()
    };

    let last = span - 1;
    if argmin(close_tail) == last && argmin(ind_tail) != last {
        Signal::Buy
    } else if argmax(close_tail) == last && argmax(ind_tail) != last {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_wire_mapping() {
        assert_eq!(Signal::Buy.as_i8(), -1);
        assert_eq!(Signal::Hold.as_i8(), 0);
        assert_eq!(Signal::Sell.as_i8(), 1);
        assert_eq!(Signal::Buy.label(), "buy");
    }

    #[test]
    fn cross_above_needs_prior_row_at_or_below() {
        assert!(crossed_above(&[1.0, 3.0], &[2.0, 2.0]));
        assert!(!crossed_above(&[3.0, 4.0], &[2.0, 2.0]));
        assert!(!crossed_above(&[3.0], &[2.0]));
    }

    #[test]
    fn cross_with_nan_holds() {
        assert!(!crossed_above(&[f64::NAN, 3.0], &[2.0, 2.0]));
    }

    #[test]
    fn level_crosses() {
        assert!(crossed_above_level(&[-1.0, 1.0], 0.0));
        assert!(crossed_below_level(&[1.0, -1.0], 0.0));
        assert!(!crossed_above_level(&[1.0, 2.0], 0.0));
    }

    #[test]
    fn trend_needs_four_values() {
        assert_eq!(monotone_trend(&[1.0, 2.0, 3.0]), None);
        assert_eq!(monotone_trend(&[1.0, 2.0, 3.0, 4.0]), Some(Trend::Rising));
        assert_eq!(monotone_trend(&[4.0, 3.0, 2.0, 1.0]), Some(Trend::Falling));
        assert_eq!(monotone_trend(&[1.0, 3.0, 2.0, 4.0]), None);
    }

    #[test]
    fn trend_polarities_reversed() {
        let rising = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trend_signal_price(&rising), Signal::Buy);
        assert_eq!(trend_signal_volume(&rising), Signal::Sell);
    }

    #[test]
    fn zero_cross_polarities() {
        let up = [-1.0, 1.0];
        assert_eq!(zero_cross_reversion(&up), Signal::Sell);
        assert_eq!(zero_cross_momentum(&up), Signal::Buy);
        let down = [1.0, -1.0];
        assert_eq!(zero_cross_reversion(&down), Signal::Buy);
        assert_eq!(zero_cross_momentum(&down), Signal::Sell);
    }

    #[test]
    fn threshold_exit_crossings() {
        // leaving oversold upward
        assert_eq!(threshold_exit(&[10.0, 50.0], 20.0, 80.0), Signal::Buy);
        // leaving overbought downward
        assert_eq!(threshold_exit(&[90.0, 70.0], 20.0, 80.0), Signal::Sell);
        // sitting in the middle
        assert_eq!(threshold_exit(&[50.0, 55.0], 20.0, 80.0), Signal::Hold);
    }

    #[test]
    fn envelope_polarity() {
        let close = [9.0, 11.0];
        let upper = [10.0, 10.0];
        let lower = [5.0, 5.0];
        assert_eq!(band_envelope(&close, &upper, &lower), Signal::Sell);
        let close = [6.0, 4.0];
        assert_eq!(band_envelope(&close, &upper, &lower), Signal::Buy);
    }

    #[test]
    fn divergence_unconfirmed_low_is_bullish() {
        // close prints its window low on the last row, indicator does not
        let close = [5.0, 4.0, 3.0, 2.0, 1.0];
        let ind = [5.0, 1.0, 3.0, 4.0, 2.0];
        assert_eq!(divergence(&close, &ind, 5), Signal::Buy);
    }

    #[test]
    fn divergence_short_window_holds() {
        assert_eq!(divergence(&[1.0, 2.0], &[1.0, 2.0], 30), Signal::Hold);
    }
}
