//! Chaikin Money Flow indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::indicators::accumulation_distribution_line::close_location_value;
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Chaikin Money Flow",
    short_name: "CMF",
    required_input_columns: &["high", "low", "close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | CMF",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const DIVERGENCE_SPAN: usize = 3;

#[derive(Debug)]
pub struct ChaikinMoneyFlow {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl ChaikinMoneyFlow {
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
        Ok(ChaikinMoneyFlow { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let flow: Vec<f64> = (0..input.len())
            .map(|i| volume[i] * close_location_value(high[i], low[i], close[i]))
            .collect();
        // the window length cancels between the two rolling means
        let flow_mean = kernels::sma(&flow, period);
        let volume_mean = kernels::sma(volume, period);
        let cmf: Vec<f64> = flow_mean
            .iter()
            .zip(&volume_mean)
            .map(|(f, v)| if *v == 0.0 { 0.0 } else { f / v })
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("cmf", cmf)])
    }
}

impl Indicator for ChaikinMoneyFlow {
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
        let cmf = &self.ti.column("cmf").unwrap()[..n];
        signal::divergence(close, cmf, DIVERGENCE_SPAN)
    }
}
