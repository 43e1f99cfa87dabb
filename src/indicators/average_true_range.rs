//! Average True Range indicator.
//!
//! The value column is the per-row true range; the signal combines a
//! 20-day moving average of close with a volatility floor of 2.0.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::Signal;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Average True Range",
    short_name: "ATR",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | Range",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const SIGNAL_MA_PERIOD: usize = 20;
const VOLATILITY_FLOOR: f64 = 2.0;

#[derive(Debug)]
pub struct AverageTrueRange {
    input: Frame,
    ti: Frame,
}

impl AverageTrueRange {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(AverageTrueRange { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let tr = kernels::true_range(
            input.column("high").unwrap(),
            input.column("low").unwrap(),
            input.column("close").unwrap(),
        );
        Frame::from_columns(input.index().to_vec(), vec![("atr", tr)])
    }
}

impl Indicator for AverageTrueRange {
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
        let atr = self.ti.column("atr").unwrap()[n - 1];
        if atr <= VOLATILITY_FLOOR {
            return Signal::Hold;
        }
        let ma = kernels::sma(close, SIGNAL_MA_PERIOD);
        if close[n - 1] > ma[n - 1] {
            Signal::Buy
        } else {
            Signal::Sell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![
                ("high", high.to_vec()),
                ("low", low.to_vec()),
                ("close", close.to_vec()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn per_row_true_range() {
        let atr = AverageTrueRange::new(
            &frame(&[110.0, 115.0], &[100.0, 105.0], &[105.0, 112.0]),
            false,
        )
        .unwrap();
        let values = atr.ti_data().column("atr").unwrap();
        assert_relative_eq!(values[0], 10.0);
        // max(10, |105-115|, |105-105|) = 10
        assert_relative_eq!(values[1], 10.0);
    }

    #[test]
    fn too_few_rows_rejected() {
        let result = AverageTrueRange::new(&frame(&[110.0], &[100.0], &[105.0]), false);
        assert!(matches!(result, Err(TtiError::NotEnoughInputData { .. })));
    }

    #[test]
    fn quiet_market_holds() {
        let n = 25;
        let close: Vec<f64> = vec![100.0; n];
        let high: Vec<f64> = vec![100.5; n];
        let low: Vec<f64> = vec![99.5; n];
        let atr = AverageTrueRange::new(&frame(&high, &low, &close), false).unwrap();
        assert_eq!(atr.signal(), Signal::Hold);
    }

    #[test]
    fn volatile_market_follows_price_vs_ma() {
        let n = 25;
        // climbing close with a wide daily range keeps atr above the floor
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 3.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 3.0).collect();
        let atr = AverageTrueRange::new(&frame(&high, &low, &close), false).unwrap();
        assert_eq!(atr.signal(), Signal::Buy);
    }
}
