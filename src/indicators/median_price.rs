//! Median Price indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Median Price",
    short_name: "MP",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:olive"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const SIGNAL_EMA_PERIOD: usize = 9;

#[derive(Debug)]
pub struct MedianPrice {
    input: Frame,
    ti: Frame,
}

impl MedianPrice {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(MedianPrice { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let mp: Vec<f64> = high.iter().zip(low).map(|(h, l)| (h + l) / 2.0).collect();
        Frame::from_columns(input.index().to_vec(), vec![("mp", mp)])
    }
}

impl Indicator for MedianPrice {
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
        let mp = &self.ti.column("mp").unwrap()[..n];
        // smoothed close against the median line filters one-day noise
        let smoothed = kernels::ema(close, SIGNAL_EMA_PERIOD, EmaSeed::Mean);
        signal::price_cross(&smoothed, mp)
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
    fn midpoint_of_the_bar() {
        let mp = MedianPrice::new(&frame(&[12.0], &[8.0], &[11.0]), false).unwrap();
        assert_relative_eq!(mp.ti_data().column("mp").unwrap()[0], 10.0);
    }

    #[test]
    fn short_series_holds() {
        let mp = MedianPrice::new(&frame(&[12.0, 13.0], &[8.0, 9.0], &[11.0, 12.0]), false)
            .unwrap();
        assert_eq!(mp.signal(), Signal::Hold);
    }

    #[test]
    fn smoothed_close_crossing_down_sells() {
        // median price steps up while close stays put, pulling the line
        // above the smoothed close on the last row
        let n = 12;
        let close = vec![100.0; n];
        let mut high = vec![101.0; n];
        let mut low = vec![99.0; n];
        high[n - 1] = 112.0;
        low[n - 1] = 110.0;
        let mp = MedianPrice::new(&frame(&high, &low, &close), false).unwrap();
        assert_eq!(mp.signal(), Signal::Sell);
    }
}
