//! Price Channel indicator.
//!
//! Yesterday's rolling extremes of high and low form the channel, so a
//! close outside it is a genuine breakout.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Price Channel",
    short_name: "PCH",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:cyan", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.6, 0.6],
    graph_areas: &[("upper_band", "lower_band", "lightblue")],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct PriceChannel {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl PriceChannel {
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
        Ok(PriceChannel { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let upper = kernels::shift(&kernels::rolling_max(high, period), 1);
        let lower = kernels::shift(&kernels::rolling_min(low, period), 1);
        Frame::from_columns(
            input.index().to_vec(),
            vec![("upper_band", upper), ("lower_band", lower)],
        )
    }
}

impl Indicator for PriceChannel {
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
        let close = &self.input.column("close").unwrap()[..n];
        let upper = &self.ti.column("upper_band").unwrap()[..n];
        let lower = &self.ti.column("lower_band").unwrap()[..n];
        signal::band_envelope(close, upper, lower)
    }
}
