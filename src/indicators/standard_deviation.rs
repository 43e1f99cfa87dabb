//! Standard Deviation indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::Signal;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Standard Deviation",
    short_name: "SD",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | SD",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const SIGNAL_MA_PERIOD: usize = 20;
const VOLATILITY_FLOOR: f64 = 2.0;

#[derive(Debug)]
pub struct StandardDeviation {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl StandardDeviation {
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
        Ok(StandardDeviation { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        Frame::from_columns(
            input.index().to_vec(),
            vec![("sd", kernels::rolling_std(close, period))],
        )
    }
}

impl Indicator for StandardDeviation {
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
        if n < SIGNAL_MA_PERIOD {
            return Signal::Hold;
        }
        let close = &self.input.column("close").unwrap()[..n];
        let sd = self.ti.column("sd").unwrap()[n - 1];
        if !(sd > VOLATILITY_FLOOR) {
            return Signal::Hold;
        }
        let ma = kernels::sma(close, SIGNAL_MA_PERIOD);
        if close[n - 1] > ma[n - 1] {
            Signal::Buy
        } else {
            Signal::Sell
        }
    }
}
