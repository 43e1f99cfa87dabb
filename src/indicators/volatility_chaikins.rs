//! Chaikin's Volatility indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Chaikin's Volatility",
    short_name: "VCH",
    required_input_columns: &["high", "low"],
    graph_input_columns: &[],
    graph_y_label: "VCH",
    graph_lines_color: &["tab:red"],
    graph_alpha_values: &[0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct VolatilityChaikins {
    input: Frame,
    ti: Frame,
    period: usize,
    change_period: usize,
}

impl VolatilityChaikins {
    pub fn new(
        input_data: &Frame,
        period: usize,
        change_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        if change_period == 0 {
            return Err(TtiError::bad_period("change_period", change_period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + change_period, input.len())?;
        let ti = Self::calculate(&input, period, change_period)?;
        Ok(VolatilityChaikins {
            input,
            ti,
            period,
            change_period,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn change_period(&self) -> usize {
        self.change_period
    }

    fn calculate(
        input: &Frame,
        period: usize,
        change_period: usize,
    ) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let range: Vec<f64> = high.iter().zip(low).map(|(h, l)| h - l).collect();
        let smoothed = kernels::ema(&range, period, EmaSeed::Mean);

        let mut vch = vec![f64::NAN; input.len()];
        for i in change_period..input.len() {
            let base = smoothed[i - change_period];
            if base.is_finite() && base != 0.0 {
                vch[i] = 100.0 * (smoothed[i] - base) / base;
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("vch", vch)])
    }
}

impl Indicator for VolatilityChaikins {
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
        signal::trend_signal_price(&self.ti.column("vch").unwrap()[..n])
    }
}
