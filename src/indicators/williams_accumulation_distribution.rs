//! Williams Accumulation Distribution indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Williams Accumulation Distribution",
    short_name: "WAD",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | WAD",
    graph_lines_color: &["black", "tab:brown"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const DIVERGENCE_SPAN: usize = 30;

#[derive(Debug)]
pub struct WilliamsAccumulationDistribution {
    input: Frame,
    ti: Frame,
}

impl WilliamsAccumulationDistribution {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(WilliamsAccumulationDistribution { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();

        let mut wad = vec![0.0; input.len()];
        for i in 1..input.len() {
            let step = if close[i] > close[i - 1] {
                close[i] - low[i].min(close[i - 1])
            } else if close[i] < close[i - 1] {
                close[i] - high[i].max(close[i - 1])
            } else {
                0.0
            };
            wad[i] = wad[i - 1] + step;
        }
        Frame::from_columns(input.index().to_vec(), vec![("wad", wad)])
    }
}

impl Indicator for WilliamsAccumulationDistribution {
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
        signal::divergence(
            &self.input.column("close").unwrap()[..n],
            &self.ti.column("wad").unwrap()[..n],
            DIVERGENCE_SPAN,
        )
    }
}
