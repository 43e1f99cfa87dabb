//! Mass Index indicator.
//!
//! A 25-day sum of the ratio between a 9-day EMA of the daily range and
//! the same EMA smoothed again. A "bulge" above 27 followed by a fall
//! below 26.5 flags a likely reversal of the prevailing trend.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::Signal;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Mass Index",
    short_name: "MI",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | MI",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const EMA_PERIOD: usize = 9;
const SUM_PERIOD: usize = 25;
const BULGE_UPPER: f64 = 27.0;
const BULGE_LOWER: f64 = 26.5;
const BULGE_SPAN: usize = 30;
// two ema layers then the rolling sum
const MIN_ROWS: usize = 2 * (EMA_PERIOD - 1) + SUM_PERIOD;

/// A run above the upper bound followed by a later drop below the lower
/// bound, anywhere inside the window.
fn reversal_bulge(mi: &[f64]) -> bool {
    let mut armed = false;
    for v in mi {
        if !v.is_finite() {
            continue;
        }
        if *v > BULGE_UPPER {
            armed = true;
        } else if armed && *v < BULGE_LOWER {
            return true;
        }
    }
    false
}

#[derive(Debug)]
pub struct MassIndex {
    input: Frame,
    ti: Frame,
}

impl MassIndex {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, MIN_ROWS, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(MassIndex { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();

        let range: Vec<f64> = high.iter().zip(low).map(|(h, l)| h - l).collect();
        let single = kernels::ema(&range, EMA_PERIOD, EmaSeed::Mean);
        let double = kernels::ema(&single, EMA_PERIOD, EmaSeed::Mean);
        let ratio: Vec<f64> = single
            .iter()
            .zip(&double)
            .map(|(s, d)| if *d == 0.0 { f64::NAN } else { s / d })
            .collect();
        // sma * period gives the rolling sum
        let mi: Vec<f64> = kernels::sma(&ratio, SUM_PERIOD)
            .iter()
            .map(|v| v * SUM_PERIOD as f64)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("mi", mi)])
    }
}

impl Indicator for MassIndex {
    fn properties(&self) -> &'static IndicatorProperties {
        &PROPERTIES
    }

    fn input(&self) -> &Frame {
        &self.input
    }

    fn ti_data(&self) -> &Frame {
        &self.ti
    }

    fn signal_at(&self, prefix_len: usize) -> Signal {
        let n = prefix_len.min(self.ti.len());
        let mi = &self.ti.column("mi").unwrap()[..n];
        let window = &mi[n.saturating_sub(BULGE_SPAN)..];
        if !reversal_bulge(window) {
            return Signal::Hold;
        }
        // the bulge calls a reversal against the prevailing close trend
        let close = &self.input.column("close").unwrap()[..n];
        let smoothed = kernels::ema(close, EMA_PERIOD, EmaSeed::Mean);
        match smoothed.get(n.wrapping_sub(2)..n) {
            Some([prev, cur]) if prev.is_finite() && cur > prev => Signal::Sell,
            Some([prev, cur]) if prev.is_finite() && cur < prev => Signal::Buy,
            _ => Signal::Hold,
        }
    }
}
