//! Parabolic SAR indicator.
//!
//! Wilder's stop-and-reverse state machine. Each row carries an
//! acceleration factor, an extreme point for the open position, and the
//! stop level itself; touching the stop flips the position and reseeds
//! the state from the ended position's extreme.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Parabolic SAR",
    short_name: "SAR",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:red"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const AF_STEP: f64 = 0.02;
const AF_MAX: f64 = 0.2;

#[derive(Debug)]
pub struct ParabolicSar {
    input: Frame,
    ti: Frame,
}

impl ParabolicSar {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(ParabolicSar { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let n = input.len();

        let mut out = Vec::with_capacity(n);
        let mut long = high[1] > high[0];
        let (mut ep, mut sar) = if long {
            (high[0], low[0])
        } else {
            (low[0], high[0])
        };
        let mut af = AF_STEP;
        out.push(sar);

        for i in 1..n {
            let mut next = sar + af * (ep - sar);
            // the stop may not enter the prior two bars' range
            if long {
                next = next.min(low[i - 1].min(low[i.saturating_sub(2)]));
            } else {
                next = next.max(high[i - 1].max(high[i.saturating_sub(2)]));
            }

            if long && low[i] < next {
                long = false;
                next = ep;
                ep = low[i];
                af = AF_STEP;
            } else if !long && high[i] > next {
                long = true;
                next = ep;
                ep = high[i];
                af = AF_STEP;
            } else if long && high[i] > ep {
                ep = high[i];
                af = (af + AF_STEP).min(AF_MAX);
            } else if !long && low[i] < ep {
                ep = low[i];
                af = (af + AF_STEP).min(AF_MAX);
            }

            sar = next;
            out.push(sar);
        }
        Frame::from_columns(input.index().to_vec(), vec![("sar", out)])
    }
}

impl Indicator for ParabolicSar {
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
        let sar = &self.ti.column("sar").unwrap()[..n];
        signal::price_cross(close, sar)
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
    fn long_bootstrap_and_clamp() {
        let sar = ParabolicSar::new(
            &frame(
                &[10.0, 11.0, 12.0, 13.0],
                &[9.0, 10.0, 11.0, 12.0],
                &[9.5, 10.5, 11.5, 12.5],
            ),
            false,
        )
        .unwrap();
        let values = sar.ti_data().column("sar").unwrap();
        assert_relative_eq!(values[0], 9.0);
        // prior-bar lows pin the stop at 9 while row 0 is in range
        assert_relative_eq!(values[1], 9.0);
        assert_relative_eq!(values[2], 9.0);
        // af has accelerated to 0.06 by now
        assert_relative_eq!(values[3], 9.0 + 0.06 * (12.0 - 9.0));
        assert_eq!(sar.signal(), Signal::Hold);
    }

    #[test]
    fn breakdown_flips_to_short_and_sells() {
        let sar = ParabolicSar::new(
            &frame(
                &[10.0, 11.0, 10.0, 9.0],
                &[9.0, 10.0, 7.0, 6.0],
                &[9.5, 10.5, 7.5, 6.5],
            ),
            false,
        )
        .unwrap();
        let values = sar.ti_data().column("sar").unwrap();
        // the flip reseeds the stop at the long position's extreme
        assert_relative_eq!(values[2], 11.0);
        // short stop clamps against the prior two highs
        assert_relative_eq!(values[3], 11.0);
        assert_eq!(sar.signal_at(3), Signal::Sell);
    }

    #[test]
    fn needs_two_rows() {
        assert!(matches!(
            ParabolicSar::new(&frame(&[10.0], &[9.0], &[9.5]), false),
            Err(TtiError::NotEnoughInputData { .. })
        ));
    }
}
