//! Ultimate Oscillator indicator.
//!
//! Buying pressure against true range over three nested windows (7, 14,
//! 28), weighted 4:2:1.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Ultimate Oscillator",
    short_name: "UOSC",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | UOSC",
    graph_lines_color: &["black", "tab:purple"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const SHORT_WINDOW: usize = 7;
const MEDIUM_WINDOW: usize = 14;
const LONG_WINDOW: usize = 28;
const DIVERGENCE_SPAN: usize = 30;

#[derive(Debug)]
pub struct UltimateOscillator {
    input: Frame,
    ti: Frame,
}

impl UltimateOscillator {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, LONG_WINDOW + 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(UltimateOscillator { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();

        let mut pressure = vec![f64::NAN; input.len()];
        let mut range = vec![f64::NAN; input.len()];
        for i in 1..input.len() {
            let floor = low[i].min(close[i - 1]);
            let ceiling = high[i].max(close[i - 1]);
            pressure[i] = close[i] - floor;
            range[i] = ceiling - floor;
        }

        // ratio of window means equals the ratio of window sums
        let average = |window: usize| -> Vec<f64> {
            kernels::sma(&pressure, window)
                .iter()
                .zip(&kernels::sma(&range, window))
                .map(|(p, r)| {
                    if p.is_nan() || r.is_nan() {
                        f64::NAN
                    } else if *r == 0.0 {
                        0.0
                    } else {
                        p / r
                    }
                })
                .collect()
        };
        let short = average(SHORT_WINDOW);
        let medium = average(MEDIUM_WINDOW);
        let long = average(LONG_WINDOW);
        let uosc: Vec<f64> = (0..input.len())
            .map(|i| 100.0 * (4.0 * short[i] + 2.0 * medium[i] + long[i]) / 7.0)
            .collect();
        Frame::from_columns(input.index().to_vec(), vec![("uosc", uosc)])
    }
}

impl Indicator for UltimateOscillator {
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
        signal::divergence(
            &self.input.column("close").unwrap()[..n],
            &self.ti.column("uosc").unwrap()[..n],
            DIVERGENCE_SPAN,
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
    fn centered_close_reads_fifty() {
        let n = 30;
        let high = vec![110.0; n];
        let low = vec![100.0; n];
        let close = vec![105.0; n];
        let uosc = UltimateOscillator::new(&frame(&high, &low, &close), false).unwrap();
        let values = uosc.ti_data().column("uosc").unwrap();
        assert!(values[27].is_nan());
        assert_relative_eq!(values[n - 1], 50.0);
        assert_eq!(uosc.signal(), Signal::Hold);
    }

    #[test]
    fn too_few_rows_rejected() {
        let high = vec![110.0; 20];
        let low = vec![100.0; 20];
        let close = vec![105.0; 20];
        let result = UltimateOscillator::new(&frame(&high, &low, &close), false);
        assert!(matches!(result, Err(TtiError::NotEnoughInputData { .. })));
    }
}
