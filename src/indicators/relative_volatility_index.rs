//! Relative Volatility Index indicator.
//!
//! RSI arithmetic applied to 10-day standard deviations of high and low,
//! split by the direction of each series, then averaged.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Relative Volatility Index",
    short_name: "RVI",
    required_input_columns: &["high", "low"],
    graph_input_columns: &[],
    graph_y_label: "RVI",
    graph_lines_color: &["tab:orange"],
    graph_alpha_values: &[0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const STD_PERIOD: usize = 10;
const OVERSOLD: f64 = 40.0;
const OVERBOUGHT: f64 = 60.0;

// one-sided RSI of the rolling deviation of a single series
fn directional_index(series: &[f64], period: usize) -> Vec<f64> {
    let deviation = kernels::rolling_std(series, STD_PERIOD);
    let mut up = vec![f64::NAN; series.len()];
    let mut down = vec![f64::NAN; series.len()];
    for i in 1..series.len() {
        if deviation[i].is_nan() {
            continue;
        }
        up[i] = if series[i] > series[i - 1] { deviation[i] } else { 0.0 };
        down[i] = if series[i] < series[i - 1] { deviation[i] } else { 0.0 };
    }
    let smoothed_up = kernels::wilder(&up, period);
    let smoothed_down = kernels::wilder(&down, period);
    smoothed_up
        .iter()
        .zip(&smoothed_down)
        .map(|(u, d)| {
            if u.is_nan() || d.is_nan() {
                f64::NAN
            } else if u + d == 0.0 {
                50.0
            } else {
                100.0 * u / (u + d)
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct RelativeVolatilityIndex {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl RelativeVolatilityIndex {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, STD_PERIOD + period, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(RelativeVolatilityIndex { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high_index = directional_index(input.column("high").unwrap(), period);
        let low_index = directional_index(input.column("low").unwrap(), period);
        let rvi: Vec<f64> = high_index
            .iter()
            .zip(&low_index)
            .map(|(h, l)| (h + l) / 2.0)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("rvi", rvi)])
    }
}

impl Indicator for RelativeVolatilityIndex {
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
        signal::threshold_exit(&self.ti.column("rvi").unwrap()[..n], OVERSOLD, OVERBOUGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64]) -> Frame {
        let index = (0..high.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![("high", high.to_vec()), ("low", low.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn steady_rise_reads_one_hundred() {
        let high: Vec<f64> = (0..14).map(|i| 110.0 + i as f64).collect();
        let low: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        let rvi = RelativeVolatilityIndex::new(&frame(&high, &low), 2, false).unwrap();
        let values = rvi.ti_data().column("rvi").unwrap();
        assert!(values[9].is_nan());
        assert_relative_eq!(values[13], 100.0);
    }

    #[test]
    fn steady_fall_reads_zero() {
        let high: Vec<f64> = (0..14).map(|i| 200.0 - i as f64).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 2.0).collect();
        let rvi = RelativeVolatilityIndex::new(&frame(&high, &low), 2, false).unwrap();
        assert_relative_eq!(rvi.ti_data().column("rvi").unwrap()[13], 0.0);
    }

    #[test]
    fn sharp_reversal_out_of_the_floor_buys() {
        let mut high: Vec<f64> = (0..13).map(|i| 200.0 - i as f64).collect();
        high.push(250.0);
        let low: Vec<f64> = high.iter().map(|h| h - 2.0).collect();
        let rvi = RelativeVolatilityIndex::new(&frame(&high, &low), 2, false).unwrap();
        let values = rvi.ti_data().column("rvi").unwrap();
        assert_relative_eq!(values[12], 0.0);
        assert!(values[13] > OVERSOLD);
        assert_eq!(rvi.signal(), Signal::Buy);
    }
}
