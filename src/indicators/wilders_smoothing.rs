//! Wilder's Smoothing indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Wilder's Smoothing",
    short_name: "WS",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct WildersSmoothing {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl WildersSmoothing {
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
        Ok(WildersSmoothing { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        Frame::from_columns(
            input.index().to_vec(),
            vec![("ws", kernels::wilder(close, period))],
        )
    }
}

impl Indicator for WildersSmoothing {
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
        signal::price_cross(
            &self.input.column("close").unwrap()[..n],
            &self.ti.column("ws").unwrap()[..n],
        )
    }
}
