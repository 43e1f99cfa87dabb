//! Ease Of Movement indicator.
//!
//! Mid-price change scaled by a volume/range box ratio, with a smoothed
//! line that drives the signal.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Ease Of Movement",
    short_name: "EMV",
    required_input_columns: &["high", "low", "volume"],
    graph_input_columns: &[],
    graph_y_label: "EMV",
    graph_lines_color: &["tab:blue", "tab:orange"],
    graph_alpha_values: &[0.6, 0.9],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const BOX_SCALE: f64 = 1.0e4;

#[derive(Debug)]
pub struct EaseOfMovement {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl EaseOfMovement {
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
        Ok(EaseOfMovement { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let volume = input.column("volume").unwrap();

        let mut emv = vec![f64::NAN; input.len()];
        for i in 1..input.len() {
            let mid_move = 0.5 * ((high[i] + low[i]) - (high[i - 1] + low[i - 1]));
            let box_ratio = volume[i] / ((high[i] - low[i]) * BOX_SCALE);
            emv[i] = if box_ratio == 0.0 || !box_ratio.is_finite() {
                0.0
            } else {
                mid_move / box_ratio
            };
        }
        let emv_ma = kernels::sma(&emv, period);
        Frame::from_columns(
            input.index().to_vec(),
            vec![("emv", emv), ("emv_ma", emv_ma)],
        )
    }
}

impl Indicator for EaseOfMovement {
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
        signal::zero_cross_reversion(&self.ti.column("emv_ma").unwrap()[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], volume: &[f64]) -> Frame {
        let index = (0..high.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![
                ("high", high.to_vec()),
                ("low", low.to_vec()),
                ("volume", volume.to_vec()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn hand_checked_row() {
        // mid moves up by 1, box ratio = 20000 / (2 * 1e4) = 1
        let emv = EaseOfMovement::new(
            &frame(&[11.0, 12.0], &[9.0, 10.0], &[20000.0, 20000.0]),
            1,
            false,
        )
        .unwrap();
        let values = emv.ti_data().column("emv").unwrap();
        assert!(values[0].is_nan());
        assert_relative_eq!(values[1], 1.0);
    }

    #[test]
    fn degenerate_bar_reads_zero() {
        let emv = EaseOfMovement::new(
            &frame(&[10.0, 10.0], &[10.0, 10.0], &[100.0, 100.0]),
            1,
            false,
        )
        .unwrap();
        assert_relative_eq!(emv.ti_data().column("emv").unwrap()[1], 0.0);
    }

    #[test]
    fn smoothed_line_upward_zero_cross_sells() {
        // mid price falls then rises across the last two rows
        let high = [11.0, 10.0, 12.0];
        let low = [9.0, 8.0, 10.0];
        let volume = [20000.0, 20000.0, 20000.0];
        let emv = EaseOfMovement::new(&frame(&high, &low, &volume), 1, false).unwrap();
        let ma = emv.ti_data().column("emv_ma").unwrap();
        assert!(ma[1] < 0.0);
        assert!(ma[2] > 0.0);
        assert_eq!(emv.signal(), Signal::Sell);
    }
}
