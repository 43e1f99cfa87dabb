//! Stochastic Momentum Index indicator.
//!
//! Double-smoothed distance of the close from the midpoint of the
//! high/low range, scaled to -100..100.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Stochastic Momentum Index",
    short_name: "SMI",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | SMI",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const OVERSOLD: f64 = -40.0;
const OVERBOUGHT: f64 = 40.0;

#[derive(Debug)]
pub struct StochasticMomentumIndex {
    input: Frame,
    ti: Frame,
    period: usize,
    smoothing_period: usize,
}

impl StochasticMomentumIndex {
    pub fn new(
        input_data: &Frame,
        period: usize,
        smoothing_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        if smoothing_period == 0 {
            return Err(TtiError::bad_period("smoothing_period", smoothing_period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(
            PROPERTIES.long_name,
            period + 2 * smoothing_period,
            input.len(),
        )?;
        let ti = Self::calculate(&input, period, smoothing_period)?;
        Ok(StochasticMomentumIndex {
            input,
            ti,
            period,
            smoothing_period,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn smoothing_period(&self) -> usize {
        self.smoothing_period
    }

    fn calculate(
        input: &Frame,
        period: usize,
        smoothing_period: usize,
    ) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let highest = kernels::rolling_max(high, period);
        let lowest = kernels::rolling_min(low, period);

        let distance: Vec<f64> = (0..input.len())
            .map(|i| close[i] - (highest[i] + lowest[i]) / 2.0)
            .collect();
        let span: Vec<f64> = (0..input.len()).map(|i| highest[i] - lowest[i]).collect();

        let smooth = |x: &[f64]| {
            kernels::ema(
                &kernels::ema(x, smoothing_period, EmaSeed::Mean),
                smoothing_period,
                EmaSeed::Mean,
            )
        };
        let numerator = smooth(&distance);
        let denominator = smooth(&span);
        let smi: Vec<f64> = numerator
            .iter()
            .zip(&denominator)
            .map(|(n, d)| {
                if n.is_nan() || d.is_nan() {
                    f64::NAN
                } else if *d == 0.0 {
                    0.0
                } else {
                    100.0 * n / (0.5 * d)
                }
            })
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("smi", smi)])
    }
}

impl Indicator for StochasticMomentumIndex {
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
        signal::threshold_exit(&self.ti.column("smi").unwrap()[..n], OVERSOLD, OVERBOUGHT)
    }
}
