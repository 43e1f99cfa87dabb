//! Moving Average Convergence Divergence indicator.
//!
//! The standard 12/26 EMA spread with a 9-day signal line. Both the
//! zero-line and the signal-line crossovers emit signals; the bullish
//! conditions are checked first.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Moving Average Convergence Divergence",
    short_name: "MACD",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | MACD",
    graph_lines_color: &["black", "tab:blue", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;
// slow ema warmup plus the signal line's own
const MIN_ROWS: usize = SLOW_PERIOD + SIGNAL_PERIOD - 1;

#[derive(Debug)]
pub struct MovingAverageConvergenceDivergence {
    input: Frame,
    ti: Frame,
}

impl MovingAverageConvergenceDivergence {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, MIN_ROWS, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(MovingAverageConvergenceDivergence { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let fast = kernels::ema(close, FAST_PERIOD, EmaSeed::Mean);
        let slow = kernels::ema(close, SLOW_PERIOD, EmaSeed::Mean);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = kernels::ema(&macd, SIGNAL_PERIOD, EmaSeed::Mean);
        Frame::from_columns(
            input.index().to_vec(),
            vec![("macd", macd), ("signal_line", signal_line)],
        )
    }
}

impl Indicator for MovingAverageConvergenceDivergence {
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
        let macd = &self.ti.column("macd").unwrap()[..n];
        let signal_line = &self.ti.column("signal_line").unwrap()[..n];
        if signal::crossed_above_level(macd, 0.0) || signal::crossed_above(macd, signal_line) {
            Signal::Buy
        } else if signal::crossed_below_level(macd, 0.0)
            || signal::crossed_below(macd, signal_line)
        {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
