//! Price Rate Of Change indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Price Rate Of Change",
    short_name: "PRC",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | PRC",
    graph_lines_color: &["black", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct PriceRateOfChange {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl PriceRateOfChange {
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
        Ok(PriceRateOfChange { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let mut prc = vec![f64::NAN; input.len()];
        for i in period..input.len() {
            if close[i - period] != 0.0 {
                prc[i] = 100.0 * (close[i] - close[i - period]) / close[i - period];
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("prc", prc)])
    }
}

impl Indicator for PriceRateOfChange {
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
        signal::trend_signal_price(&self.ti.column("prc").unwrap()[..n])
    }
}
