//! Fibonacci Retracement indicator.
//!
//! Horizontal retracement levels spanning the full-series close range.
//! The levels move whenever the range extremes move, so the indicator is
//! not prefix-stable.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Fibonacci Retracement",
    short_name: "FR",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &[
        "black",
        "tab:gray",
        "tab:blue",
        "tab:cyan",
        "tab:olive",
        "tab:orange",
        "tab:gray",
    ],
    graph_alpha_values: &[0.9, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: false,
};

const RATIOS: [(&str, f64); 6] = [
    ("rl_0.0", 0.0),
    ("rl_23.6", 0.236),
    ("rl_38.2", 0.382),
    ("rl_50.0", 0.5),
    ("rl_61.8", 0.618),
    ("rl_100.0", 1.0),
];

#[derive(Debug)]
pub struct FibonacciRetracement {
    input: Frame,
    ti: Frame,
}

impl FibonacciRetracement {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(FibonacciRetracement { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let max = close.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = close.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;

        let columns: Vec<(&str, Vec<f64>)> = RATIOS
            .iter()
            .map(|(name, ratio)| (*name, vec![max - ratio * range; input.len()]))
            .collect();
        Frame::from_columns(input.index().to_vec(), columns)
    }
}

impl Indicator for FibonacciRetracement {
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
        for (name, _) in &RATIOS {
            let level = self.ti.column(name).unwrap()[0];
            if signal::crossed_above_level(close, level) {
                return Signal::Buy;
            }
            if signal::crossed_below_level(close, level) {
                return Signal::Sell;
            }
        }
        Signal::Hold
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
    fn levels_span_the_close_range() {
        let fr = FibonacciRetracement::new(&frame(&[10.0, 15.0, 20.0]), false).unwrap();
        let ti = fr.ti_data();
        assert_relative_eq!(ti.column("rl_0.0").unwrap()[0], 20.0);
        assert_relative_eq!(ti.column("rl_50.0").unwrap()[0], 15.0);
        assert_relative_eq!(ti.column("rl_100.0").unwrap()[0], 10.0);
        assert_relative_eq!(ti.column("rl_23.6").unwrap()[2], 20.0 - 0.236 * 10.0);
    }

    #[test]
    fn levels_are_constant_columns() {
        let fr = FibonacciRetracement::new(&frame(&[10.0, 15.0, 20.0]), false).unwrap();
        let col = fr.ti_data().column("rl_61.8").unwrap();
        assert_relative_eq!(col[0], col[2]);
    }

    #[test]
    fn crossing_a_level_upward_buys() {
        // range 10..16: the 23.6% level sits at 14.584
        let fr = FibonacciRetracement::new(&frame(&[10.0, 12.0, 14.0, 16.0]), false).unwrap();
        assert_eq!(fr.signal(), Signal::Buy);
    }

    #[test]
    fn crossing_a_level_downward_sells() {
        let fr = FibonacciRetracement::new(&frame(&[16.0, 14.0, 15.0, 12.0]), false).unwrap();
        assert_eq!(fr.signal(), Signal::Sell);
    }
}
