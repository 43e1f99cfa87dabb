//! Qstick indicator.
//!
//! Average open-to-close body over a window. The signal requires both a
//! sustained directional run and a fresh zero cross in the same
//! direction.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal, Trend};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Qstick",
    short_name: "QST",
    required_input_columns: &["open", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | QST",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct Qstick {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl Qstick {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(Qstick { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let open = input.column("open").unwrap();
        let close = input.column("close").unwrap();
        let body: Vec<f64> = close.iter().zip(open).map(|(c, o)| c - o).collect();
        Frame::from_columns(
            input.index().to_vec(),
            vec![("qst", kernels::sma(&body, period))],
        )
    }
}

impl Indicator for Qstick {
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
        let qst = &self.ti.column("qst").unwrap()[..n];
        match signal::monotone_trend(qst) {
            Some(Trend::Rising) if signal::crossed_above_level(qst, 0.0) => Signal::Buy,
            Some(Trend::Falling) if signal::crossed_below_level(qst, 0.0) => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}
