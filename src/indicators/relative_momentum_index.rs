//! Relative Momentum Index indicator.
//!
//! RSI built on lagged momentum changes instead of one-day changes.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Relative Momentum Index",
    short_name: "RMI",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | RMI",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

#[derive(Debug)]
pub struct RelativeMomentumIndex {
    input: Frame,
    ti: Frame,
    period: usize,
    momentum_period: usize,
}

impl RelativeMomentumIndex {
    pub fn new(
        input_data: &Frame,
        period: usize,
        momentum_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        if momentum_period == 0 {
            return Err(TtiError::bad_period("momentum_period", momentum_period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + momentum_period, input.len())?;
        let ti = Self::calculate(&input, period, momentum_period)?;
        Ok(RelativeMomentumIndex {
            input,
            ti,
            period,
            momentum_period,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn momentum_period(&self) -> usize {
        self.momentum_period
    }

    fn calculate(
        input: &Frame,
        period: usize,
        momentum_period: usize,
    ) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let change = kernels::diff(close, momentum_period);
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
        let rmi: Vec<f64> = smoothed_up
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
        Frame::from_columns(input.index().to_vec(), vec![("rmi", rmi)])
    }
}

impl Indicator for RelativeMomentumIndex {
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
        signal::threshold_exit(&self.ti.column("rmi").unwrap()[..n], OVERSOLD, OVERBOUGHT)
    }
}
