//! Linear Regression Slope indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Linear Regression Slope",
    short_name: "LRS",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | Slope",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct LinearRegressionSlope {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl LinearRegressionSlope {
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
        Ok(LinearRegressionSlope { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let (slope, _) = kernels::rolling_ols(input.column("close").unwrap(), period)?;
        Frame::from_columns(input.index().to_vec(), vec![("lrs", slope)])
    }
}

impl Indicator for LinearRegressionSlope {
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
        signal::zero_cross_momentum(&self.ti.column("lrs").unwrap()[..n])
    }
}
