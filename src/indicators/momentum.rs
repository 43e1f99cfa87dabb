//! Momentum indicator.
//!
//! `mom = 100 * close / close[i - p]`, read against its own 9-day EMA.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Momentum",
    short_name: "MOM",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | MOM",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const SIGNAL_EMA_PERIOD: usize = 9;

#[derive(Debug)]
pub struct Momentum {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl Momentum {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + 1, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(Momentum { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let mut mom = vec![f64::NAN; input.len()];
        for i in period..input.len() {
            if close[i - period] != 0.0 {
                mom[i] = 100.0 * close[i] / close[i - period];
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("mom", mom)])
    }
}

impl Indicator for Momentum {
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
        let mom = &self.ti.column("mom").unwrap()[..n];
        let smoothed = kernels::ema(mom, SIGNAL_EMA_PERIOD, EmaSeed::Mean);
        if signal::crossed_above(mom, &smoothed) {
            Signal::Buy
        } else if signal::crossed_below(mom, &smoothed) {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
            .collect();
        Frame::from_columns(index, vec![("close", close.to_vec())]).unwrap()
    }

    #[test]
    fn hand_checked_ratio() {
        let mom = Momentum::new(&frame(&[10.0, 11.0, 12.0]), 2, false).unwrap();
        let values = mom.ti_data().column("mom").unwrap();
        assert!(values[1].is_nan());
        assert_relative_eq!(values[2], 120.0);
    }

    #[test]
    fn flat_series_reads_one_hundred_and_holds() {
        let mom = Momentum::new(&frame(&[50.0; 20]), 2, false).unwrap();
        let values = mom.ti_data().column("mom").unwrap();
        assert_relative_eq!(values[19], 100.0);
        assert_eq!(mom.signal(), Signal::Hold);
    }

    #[test]
    fn fresh_acceleration_crosses_the_smoothing_upward() {
        // flat momentum, then the last close jumps
        let mut close = vec![50.0; 20];
        close.push(60.0);
        let mom = Momentum::new(&frame(&close), 2, false).unwrap();
        assert_eq!(mom.signal(), Signal::Buy);
    }
}
