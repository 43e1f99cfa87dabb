//! Relative Strength Index indicator.
//!
//! Wilder-smoothed gains against losses, 0..100.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Relative Strength Index",
    short_name: "RSI",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | RSI",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

#[derive(Debug)]
pub struct RelativeStrengthIndex {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl RelativeStrengthIndex {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + 1, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(RelativeStrengthIndex { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let change = kernels::diff(close, 1);
        // keep the warmup NaN so the smoothing seeds past it
        let up: Vec<f64> = change
            .iter()
            .map(|c| if c.is_nan() { f64::NAN } else { c.max(0.0) })
            .collect();
        let down: Vec<f64> = change
            .iter()
            .map(|c| if c.is_nan() { f64::NAN } else { (-c).max(0.0) })
            .collect();
        let smoothed_up = kernels::wilder(&up, period);
        let smoothed_down = kernels::wilder(&down, period);
        let rsi: Vec<f64> = smoothed_up
            .iter()
            .zip(&smoothed_down)
            .map(|(u, d)| {
                if u.is_nan() || d.is_nan() {
                    f64::NAN
                } else if u + d == 0.0 {
                    50.0
                } else {
                    100.0 * u / (u + d)
                }
            })
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("rsi", rsi)])
    }
}

impl Indicator for RelativeStrengthIndex {
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
        signal::threshold_exit(&self.ti.column("rsi").unwrap()[..n], OVERSOLD, OVERBOUGHT)
    }
}
