//! Williams %R indicator.
//!
//! Position of the close inside the lookback range, on the -100..0
//! scale. Entering the overbought band sells, leaving the oversold band
//! buys.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::Signal;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Williams %R",
    short_name: "WR",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | WR",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const OVERBOUGHT: f64 = -20.0;
const OVERSOLD: f64 = -80.0;

#[derive(Debug)]
pub struct WilliamsR {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl WilliamsR {
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
        Ok(WilliamsR { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let highest = kernels::rolling_max(high, period);
        let lowest = kernels::rolling_min(low, period);
        let wr: Vec<f64> = (0..input.len())
            .map(|i| {
                let range = highest[i] - lowest[i];
                if !range.is_finite() {
                    f64::NAN
                } else if range == 0.0 {
                    0.0
                } else {
                    -100.0 * (highest[i] - close[i]) / range
                }
            })
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("wr", wr)])
    }
}

impl Indicator for WilliamsR {
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
        if n < 2 {
            return Signal::Hold;
        }
        let wr = &self.ti.column("wr").unwrap()[..n];
        let (prev, cur) = (wr[n - 2], wr[n - 1]);
        if prev.is_nan() || cur.is_nan() {
            return Signal::Hold;
        }
        if prev >= OVERBOUGHT && cur < OVERBOUGHT {
            Signal::Sell
        } else if prev <= OVERSOLD && cur > OVERSOLD {
            Signal::Buy
        } else {
            Signal::Hold
        }
    }
}
