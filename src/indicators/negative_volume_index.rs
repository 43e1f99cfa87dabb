//! Negative Volume Index indicator.
//!
//! Tracks the close's percentage change only on days the volume shrank,
//! from a base of 1000.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Negative Volume Index",
    short_name: "NVI",
    required_input_columns: &["close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | NVI",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const BASE: f64 = 1000.0;
const SIGNAL_EMA_PERIOD: usize = 255;

#[derive(Debug)]
pub struct NegativeVolumeIndex {
    input: Frame,
    ti: Frame,
}

impl NegativeVolumeIndex {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(NegativeVolumeIndex { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let mut nvi = Vec::with_capacity(input.len());
        nvi.push(BASE);
        for i in 1..input.len() {
            let prev = nvi[i - 1];
            let next = if volume[i] < volume[i - 1] && close[i - 1] != 0.0 {
                prev * (1.0 + (close[i] - close[i - 1]) / close[i - 1])
            } else {
                prev
            };
            nvi.push(next);
        }
        Frame::from_columns(input.index().to_vec(), vec![("nvi", nvi)])
    }
}

impl Indicator for NegativeVolumeIndex {
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
        let nvi = &self.ti.column("nvi").unwrap()[..n];
        // the classic yearly baseline: one 255-trading-day ema
        let baseline = kernels::ema(nvi, SIGNAL_EMA_PERIOD, EmaSeed::Mean);
        signal::price_cross(nvi, &baseline)
    }
}
