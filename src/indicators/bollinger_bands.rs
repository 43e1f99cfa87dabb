//! Bollinger Bands indicator.
//!
//! Middle band is `SMA_p(close)`; the envelope offset is `k` times the
//! population standard deviation of the whole close series, not a rolling
//! window. That full-series sigma is deliberate (upstream behavior) and is
//! why the indicator is marked non-prefix-stable.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Bollinger Bands",
    short_name: "BB",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:blue", "tab:cyan", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.8, 0.6, 0.6],
    graph_areas: &[("upper_band", "lower_band", "lightblue")],
    graph_subplots: false,
    prefix_stable: false,
};

#[derive(Debug)]
pub struct BollingerBands {
    input: Frame,
    ti: Frame,
    period: usize,
    std_number: f64,
}

impl BollingerBands {
    pub fn new(
        input_data: &Frame,
        period: usize,
        std_number: f64,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        if !(std_number > 0.0) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "std_number".to_string(),
                constraint: "> 0.0".to_string(),
                actual: std_number.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period, std_number)?;
        Ok(BollingerBands {
            input,
            ti,
            period,
            std_number,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn std_number(&self) -> f64 {
        self.std_number
    }

    fn calculate(input: &Frame, period: usize, std_number: f64) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let middle = kernels::sma(close, period);
        let sigma = kernels::full_series_std(close);
        let offset = std_number * sigma;
        let upper: Vec<f64> = middle.iter().map(|m| m + offset).collect();
        let lower: Vec<f64> = middle.iter().map(|m| m - offset).collect();
        Frame::from_columns(
            input.index().to_vec(),
            vec![
                ("middle_band", middle),
                ("upper_band", upper),
                ("lower_band", lower),
            ],
        )
    }
}

impl Indicator for BollingerBands {
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
        let close = &self.input.column("close").unwrap()[..n];
        let upper = &self.ti.column("upper_band").unwrap()[..n];
        let lower = &self.ti.column("lower_band").unwrap()[..n];
        signal::band_envelope(close, upper, lower)
    }
}
