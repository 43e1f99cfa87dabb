//! Typical Price indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Typical Price",
    short_name: "TP",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const SIGNAL_MA_PERIOD: usize = 20;

#[derive(Debug)]
pub struct TypicalPrice {
    input: Frame,
    ti: Frame,
}

impl TypicalPrice {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(TypicalPrice { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let tp: Vec<f64> = (0..input.len())
            .map(|i| (high[i] + low[i] + close[i]) / 3.0)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("tp", tp)])
    }
}

impl Indicator for TypicalPrice {
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
        let tp = &self.ti.column("tp").unwrap()[..n];
        let ma = kernels::sma(tp, SIGNAL_MA_PERIOD);
        signal::price_cross(tp, &ma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
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
    fn averages_the_three_prices() {
        let tp = TypicalPrice::new(&frame(&[12.0], &[9.0], &[10.5]), false).unwrap();
        assert_relative_eq!(tp.ti_data().column("tp").unwrap()[0], 10.5);
    }

    #[test]
    fn short_series_holds() {
        let tp = TypicalPrice::new(&frame(&[12.0, 13.0], &[9.0, 10.0], &[10.5, 11.5]), false)
            .unwrap();
        assert_eq!(tp.signal(), Signal::Hold);
    }

    #[test]
    fn breakout_above_the_average_buys() {
        let n = 25;
        let mut close = vec![100.0; n];
        close[n - 1] = 110.0;
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let tp = TypicalPrice::new(&frame(&high, &low, &close), false).unwrap();
        assert_eq!(tp.signal(), Signal::Buy);
    }
}
