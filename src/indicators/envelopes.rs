//! Envelopes indicator.
//!
//! A simple moving average shifted up and down by a fixed fraction.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Envelopes",
    short_name: "ENV",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:cyan", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.6, 0.6],
    graph_areas: &[("upper_band", "lower_band", "lightblue")],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct Envelopes {
    input: Frame,
    ti: Frame,
    period: usize,
    shift: f64,
}

impl Envelopes {
    pub fn new(
        input_data: &Frame,
        period: usize,
        shift: f64,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        if !(shift > 0.0 && shift < 1.0) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "shift".to_string(),
                constraint: "in (0.0, 1.0)".to_string(),
                actual: shift.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period, shift)?;
        Ok(Envelopes {
            input,
            ti,
            period,
            shift,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    fn calculate(input: &Frame, period: usize, shift: f64) -> Result<Frame, TtiError> {
        let ma = kernels::sma(input.column("close").unwrap(), period);
        let upper: Vec<f64> = ma.iter().map(|m| (1.0 + shift) * m).collect();
        let lower: Vec<f64> = ma.iter().map(|m| (1.0 - shift) * m).collect();
        Frame::from_columns(
            input.index().to_vec(),
            vec![("upper_band", upper), ("lower_band", lower)],
        )
    }
}

impl Indicator for Envelopes {
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
        let upper = &self.ti.column("upper_band").unwrap()[..n];
        let lower = &self.ti.column("lower_band").unwrap()[..n];
        signal::band_envelope(close, upper, lower)
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
    fn shift_must_be_a_fraction() {
        let data = frame(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            Envelopes::new(&data, 2, 1.5, false),
            Err(TtiError::WrongValueForInputParameter { .. })
        ));
    }

    #[test]
    fn bands_bracket_the_moving_average() {
        let env = Envelopes::new(&frame(&[10.0, 10.0, 10.0]), 2, 0.1, false).unwrap();
        let upper = env.ti_data().column("upper_band").unwrap();
        let lower = env.ti_data().column("lower_band").unwrap();
        assert!(upper[0].is_nan());
        assert_relative_eq!(upper[1], 11.0);
        assert_relative_eq!(lower[1], 9.0);
    }

    #[test]
    fn spike_through_upper_band_sells() {
        let env = Envelopes::new(&frame(&[10.0, 10.0, 10.0, 12.0]), 2, 0.1, false).unwrap();
        assert_eq!(env.signal(), Signal::Sell);
    }

    #[test]
    fn drop_through_lower_band_buys() {
        let env = Envelopes::new(&frame(&[10.0, 10.0, 10.0, 8.0]), 2, 0.1, false).unwrap();
        assert_eq!(env.signal(), Signal::Buy);
    }
}
