//! Weighted Close indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Weighted Close",
    short_name: "WCL",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:green"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct WeightedClose {
    input: Frame,
    ti: Frame,
}

impl WeightedClose {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(WeightedClose { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let wcl: Vec<f64> = (0..input.len())
            .map(|i| (2.0 * close[i] + high[i] + low[i]) / 4.0)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("wcl", wcl)])
    }
}

impl Indicator for WeightedClose {
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
            &self.ti.column("wcl").unwrap()[..n],
        )
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
    fn close_carries_double_weight() {
        let wcl = WeightedClose::new(&frame(&[12.0], &[9.0], &[10.5]), false).unwrap();
        assert_relative_eq!(wcl.ti_data().column("wcl").unwrap()[0], 10.5);
    }

    #[test]
    fn close_moving_above_the_bar_midpoint_buys() {
        // the close sits above the weighted close exactly when it is
        // above the bar midpoint
        let wcl = WeightedClose::new(
            &frame(&[110.0, 111.0], &[99.0, 100.0], &[100.0, 110.0]),
            false,
        )
        .unwrap();
        assert_eq!(wcl.signal(), Signal::Buy);
    }
}
