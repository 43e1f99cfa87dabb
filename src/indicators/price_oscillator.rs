//! Price Oscillator indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Price Oscillator",
    short_name: "POSC",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | POSC",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct PriceOscillator {
    input: Frame,
    ti: Frame,
    short_period: usize,
    long_period: usize,
}

impl PriceOscillator {
    pub fn new(
        input_data: &Frame,
        short_period: usize,
        long_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if short_period == 0 {
            return Err(TtiError::bad_period("short_period", short_period));
        }
        if long_period <= short_period {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "long_period".to_string(),
                constraint: "> short_period".to_string(),
                actual: long_period.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, long_period, input.len())?;
        let ti = Self::calculate(&input, short_period, long_period)?;
        Ok(PriceOscillator {
            input,
            ti,
            short_period,
            long_period,
        })
    }

    pub fn short_period(&self) -> usize {
        self.short_period
    }

    pub fn long_period(&self) -> usize {
        self.long_period
    }

    fn calculate(
        input: &Frame,
        short_period: usize,
        long_period: usize,
    ) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let short = kernels::sma(close, short_period);
        let long = kernels::sma(close, long_period);
        let posc: Vec<f64> = short
            .iter()
            .zip(&long)
            .map(|(s, l)| if *l == 0.0 { 0.0 } else { 100.0 * (s - l) / l })
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("posc", posc)])
    }
}

impl Indicator for PriceOscillator {
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
        signal::zero_cross_reversion(&self.ti.column("posc").unwrap()[..n])
    }
}
