//! Chaikin Oscillator indicator.
//!
//! Difference of a 3-day and a 10-day EMA of the accumulation
//! distribution line. The signal gates the oscillator's own direction
//! behind a 90-day moving average of close.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::indicators::accumulation_distribution_line::close_location_value;
use crate::kernels::{self, EmaSeed};
use crate::signal::{Signal, Trend, monotone_trend};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Chaikin Oscillator",
    short_name: "ChO",
    required_input_columns: &["high", "low", "close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | ChO",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const FAST_PERIOD: usize = 3;
const SLOW_PERIOD: usize = 10;
const SIGNAL_MA_PERIOD: usize = 90;

#[derive(Debug)]
pub struct ChaikinOscillator {
    input: Frame,
    ti: Frame,
}

impl ChaikinOscillator {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, SLOW_PERIOD, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(ChaikinOscillator { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let flow: Vec<f64> = (0..input.len())
            .map(|i| volume[i] * close_location_value(high[i], low[i], close[i]))
            .collect();
        let adl = kernels::cumsum(&flow);
        let fast = kernels::ema(&adl, FAST_PERIOD, EmaSeed::Mean);
        let slow = kernels::ema(&adl, SLOW_PERIOD, EmaSeed::Mean);
        let cho: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        Frame::from_columns(input.index().to_vec(), vec![("cho", cho)])
    }
}

impl Indicator for ChaikinOscillator {
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
        let cho = &self.ti.column("cho").unwrap()[..n];
        let ma = kernels::sma(close, SIGNAL_MA_PERIOD);
        match monotone_trend(cho) {
            Some(Trend::Rising) if close[n - 1] > ma[n - 1] => Signal::Buy,
            Some(Trend::Falling) if close[n - 1] < ma[n - 1] => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}
