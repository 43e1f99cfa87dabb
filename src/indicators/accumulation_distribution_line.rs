//! Accumulation Distribution Line indicator.
//!
//! Close location value `clv = ((C - L) - (H - C)) / (H - L)` weighted by
//! volume and accumulated over the series.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Accumulation Distribution Line",
    short_name: "ADL",
    required_input_columns: &["high", "low", "close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | Volume",
    graph_lines_color: &["black", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

/// Per-row close location value; a degenerate bar (high == low) counts as
/// zero accumulation.
pub(crate) fn close_location_value(high: f64, low: f64, close: f64) -> f64 {
    let range = high - low;
    if range == 0.0 {
        0.0
    } else {
        ((close - low) - (high - close)) / range
    }
}

#[derive(Debug)]
pub struct AccumulationDistributionLine {
    input: Frame,
    ti: Frame,
}

impl AccumulationDistributionLine {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(AccumulationDistributionLine { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let flow: Vec<f64> = (0..input.len())
            .map(|i| volume[i] * close_location_value(high[i], low[i], close[i]))
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("adl", kernels::cumsum(&flow))])
    }
}

impl Indicator for AccumulationDistributionLine {
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
        signal::trend_signal_volume(&self.ti.column("adl").unwrap()[..n])
    }
}
