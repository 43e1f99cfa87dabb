//! Positive Volume Index indicator.
//!
//! The mirror of the negative volume index: the close's percentage
//! change is applied only on days the volume grew.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Positive Volume Index",
    short_name: "PVI",
    required_input_columns: &["close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | PVI",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const BASE: f64 = 1000.0;
const SIGNAL_EMA_PERIOD: usize = 255;

#[derive(Debug)]
pub struct PositiveVolumeIndex {
    input: Frame,
    ti: Frame,
}

impl PositiveVolumeIndex {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(PositiveVolumeIndex { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let mut pvi = Vec::with_capacity(input.len());
        pvi.push(BASE);
        for i in 1..input.len() {
            let prev = pvi[i - 1];
            let next = if volume[i] > volume[i - 1] && close[i - 1] != 0.0 {
                prev * (1.0 + (close[i] - close[i - 1]) / close[i - 1])
            } else {
                prev
            };
            pvi.push(next);
        }
        Frame::from_columns(input.index().to_vec(), vec![("pvi", pvi)])
    }
}

impl Indicator for PositiveVolumeIndex {
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
        let pvi = &self.ti.column("pvi").unwrap()[..n];
        let baseline = kernels::ema(pvi, SIGNAL_EMA_PERIOD, EmaSeed::Mean);
        signal::price_cross(pvi, &baseline)
    }
}
