//! Time Series Forecast indicator.
//!
//! One-step-ahead projection of the rolling regression line.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Time Series Forecast",
    short_name: "TSF",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct TimeSeriesForecast {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl TimeSeriesForecast {
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
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(TimeSeriesForecast { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let (slope, intercept) = kernels::rolling_ols(close, period)?;
        let tsf: Vec<f64> = slope
            .iter()
            .zip(&intercept)
            .map(|(b, a)| a + b * period as f64)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("tsf", tsf)])
    }
}

impl Indicator for TimeSeriesForecast {
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
            &self.ti.column("tsf").unwrap()[..n],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(index, vec![("close", close.to_vec())]).unwrap()
    }

    #[test]
    fn linear_series_forecasts_the_next_value() {
        let close: Vec<f64> = (0..8).map(|i| 100.0 + i as f64).collect();
        let tsf = TimeSeriesForecast::new(&frame(&close), 3, false).unwrap();
        let values = tsf.ti_data().column("tsf").unwrap();
        assert!(values[1].is_nan());
        for i in 2..8 {
            assert_relative_eq!(values[i], close[i] + 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn close_overtaking_the_forecast_buys() {
        // forecast with period 2 is 2*c[i] - c[i-1]
        let tsf = TimeSeriesForecast::new(&frame(&[10.0, 11.0, 12.0, 11.9]), 2, false)
            .unwrap();
        let values = tsf.ti_data().column("tsf").unwrap();
        assert_relative_eq!(values[2], 13.0);
        assert_relative_eq!(values[3], 11.8, epsilon = 1e-9);
        assert_eq!(tsf.signal(), Signal::Buy);
    }
}
