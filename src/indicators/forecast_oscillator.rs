//! Forecast Oscillator indicator.
//!
//! Percentage miss of yesterday's one-step linear-regression forecast
//! against today's close.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Forecast Oscillator",
    short_name: "FOSC",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | FOSC",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct ForecastOscillator {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl ForecastOscillator {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period < 2 {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "period".to_string(),
                constraint: ">= 2".to_string(),
                actual: period.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + 1, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(ForecastOscillator { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let (slope, intercept) = kernels::rolling_ols(close, period)?;
        // one-step-ahead forecast from the window ending at each row
        let forecast: Vec<f64> = slope
            .iter()
            .zip(&intercept)
            .map(|(b, a)| a + b * period as f64)
            .collect();
        let mut fosc = vec![f64::NAN; input.len()];
        for i in period..input.len() {
            if close[i] != 0.0 {
                fosc[i] = 100.0 * (close[i] - forecast[i - 1]) / close[i];
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("fosc", fosc)])
    }
}

impl Indicator for ForecastOscillator {
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
        signal::zero_cross_momentum(&self.ti.column("fosc").unwrap()[..n])
    }
}
