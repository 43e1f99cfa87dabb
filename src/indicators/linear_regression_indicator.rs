//! Linear Regression Indicator.
//!
//! The fitted value at the last point of each rolling OLS window.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Linear Regression Indicator",
    short_name: "LRI",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct LinearRegressionIndicator {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl LinearRegressionIndicator {
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
        Ok(LinearRegressionIndicator { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let (slope, intercept) = kernels::rolling_ols(close, period)?;
        let lri: Vec<f64> = slope
            .iter()
            .zip(&intercept)
            .map(|(b, a)| a + b * (period - 1) as f64)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("lri", lri)])
    }
}

impl Indicator for LinearRegressionIndicator {
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
        let lri = &self.ti.column("lri").unwrap()[..n];
        signal::price_cross(close, lri)
    }
}
