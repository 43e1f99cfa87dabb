//! Range Indicator.
//!
//! Relates true range to the close-to-close change, rescales the result
//! to 0..100 over a rolling window and smooths it. The signal treats an
//! upward crossing of 20 as a trend start (direction from the concurrent
//! close move) and an upward crossing of 70 as a trend end, judged
//! against the close at the most recent sub-20 reading.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Range Indicator",
    short_name: "RI",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | RI",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const TREND_START: f64 = 20.0;
const TREND_END: f64 = 70.0;

#[derive(Debug)]
pub struct RangeIndicator {
    input: Frame,
    ti: Frame,
    range_period: usize,
    smoothing_period: usize,
}

impl RangeIndicator {
    pub fn new(
        input_data: &Frame,
        range_period: usize,
        smoothing_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if range_period == 0 {
            return Err(TtiError::bad_period("range_period", range_period));
        }
        if smoothing_period == 0 {
            return Err(TtiError::bad_period("smoothing_period", smoothing_period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(
            PROPERTIES.long_name,
            range_period + smoothing_period,
            input.len(),
        )?;
        let ti = Self::calculate(&input, range_period, smoothing_period)?;
        Ok(RangeIndicator {
            input,
            ti,
            range_period,
            smoothing_period,
        })
    }

    pub fn range_period(&self) -> usize {
        self.range_period
    }

    pub fn smoothing_period(&self) -> usize {
        self.smoothing_period
    }

    fn calculate(
        input: &Frame,
        range_period: usize,
        smoothing_period: usize,
    ) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let tr = kernels::true_range(high, low, close);

        let mut x = vec![f64::NAN; input.len()];
        for i in 1..input.len() {
            let change = close[i] - close[i - 1];
            x[i] = if change > 0.0 { tr[i] / change } else { tr[i] };
        }

        let minimum = kernels::rolling_min(&x, range_period);
        let maximum = kernels::rolling_max(&x, range_period);
        let scaled: Vec<f64> = (0..input.len())
            .map(|i| {
                let range = maximum[i] - minimum[i];
                if !range.is_finite() {
                    f64::NAN
                } else if range == 0.0 {
                    0.0
                } else {
                    100.0 * (x[i] - minimum[i]) / range
                }
            })
            .collect();
        let ri = kernels::ema(&scaled, smoothing_period, EmaSeed::Mean);
        Frame::from_columns(input.index().to_vec(), vec![("ri", ri)])
    }
}

impl Indicator for RangeIndicator {
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
        if n < 2 {
            return Signal::Hold;
        }
        let ri = &self.ti.column("ri").unwrap()[..n];
        let close = &self.input.column("close").unwrap()[..n];

        if signal::crossed_above_level(ri, TREND_END) {
            // trend end: compare against the close where the range was
            // last quiet
            let baseline = ri[..n - 1]
                .iter()
                .rposition(|v| v.is_finite() && *v < TREND_START);
            return match baseline {
                Some(i) if close[n - 1] > close[i] => Signal::Sell,
                Some(_) => Signal::Buy,
                None => Signal::Hold,
            };
        }
        if signal::crossed_above_level(ri, TREND_START) {
            // trend start in the direction the close is moving
            return if close[n - 1] > close[n - 2] {
                Signal::Buy
            } else {
                Signal::Sell
            };
        }
        Signal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn trend_start_follows_the_close_direction() {
        // x = [_, 4, 6, 2, 4]: the scaled value jumps from 0 to 50
        // while the close turns up
        let high = [101.0, 101.5, 102.0, 99.5, 101.5];
        let low = [99.0, 97.5, 96.0, 97.5, 97.5];
        let close = [100.0, 99.5, 99.0, 98.5, 99.5];
        let ri = RangeIndicator::new(&frame(&high, &low, &close), 3, 1, false).unwrap();
        let values = ri.ti_data().column("ri").unwrap();
        assert_eq!(values[3], 0.0);
        assert_eq!(values[4], 50.0);
        assert_eq!(ri.signal(), Signal::Buy);
    }

    #[test]
    fn trend_end_reverses_against_the_move_since_quiet() {
        // scaled path 0 -> 37.5 -> 100; the close is above its level at
        // the last quiet reading, so the trend-end call is bearish
        let high = [101.0, 101.5, 102.0, 99.5, 100.0, 103.0];
        let low = [99.0, 97.5, 96.0, 97.5, 96.5, 95.0];
        let close = [100.0, 99.5, 99.0, 98.5, 98.0, 99.0];
        let ri = RangeIndicator::new(&frame(&high, &low, &close), 3, 1, false).unwrap();
        let values = ri.ti_data().column("ri").unwrap();
        assert_eq!(values[3], 0.0);
        assert!(values[4] > TREND_START && values[4] < TREND_END);
        assert!(values[5] > TREND_END);
        assert_eq!(ri.signal(), Signal::Sell);
    }

    #[test]
    fn quiet_series_holds() {
        let n = 10;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + (i % 2) as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let data = frame(&high, &low, &close);
        let ri = RangeIndicator::new(&data, 3, 2, false).unwrap();
        // the rule needs a fresh upward crossing, a steady see-saw never
        // provides one at the final row
        assert_eq!(ri.signal(), Signal::Hold);
    }
}
