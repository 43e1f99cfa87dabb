//! On Balance Volume indicator.
//!
//! `obv[i] = obv[i-1] + sign(close[i] - close[i-1]) * volume[i]`, seeded
//! at zero.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "On Balance Volume",
    short_name: "OBV",
    required_input_columns: &["close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | Volume",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct OnBalanceVolume {
    input: Frame,
    ti: Frame,
}

impl OnBalanceVolume {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(OnBalanceVolume { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let mut obv = Vec::with_capacity(input.len());
        obv.push(0.0);
        for i in 1..close.len() {
            let step = if close[i] > close[i - 1] {
                volume[i]
            } else if close[i] < close[i - 1] {
                -volume[i]
            } else {
                0.0
            };
            obv.push(obv[i - 1] + step);
        }
        Frame::from_columns(input.index().to_vec(), vec![("obv", obv)])
    }
}

impl Indicator for OnBalanceVolume {
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
        signal::trend_signal_volume(&self.ti.column("obv").unwrap()[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(close: &[f64], volume: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![("close", close.to_vec()), ("volume", volume.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn three_day_hand_checked() {
        let obv = OnBalanceVolume::new(&frame(&[10.0, 12.0, 11.0], &[100.0, 200.0, 150.0]), false)
            .unwrap();
        let values = obv.ti_data().column("obv").unwrap();
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 200.0);
        assert_relative_eq!(values[2], 50.0);
        // trailing window too short for the trend rule
        assert_eq!(obv.signal(), Signal::Hold);
    }

    #[test]
    fn unchanged_close_accumulates_nothing() {
        let obv =
            OnBalanceVolume::new(&frame(&[10.0, 10.0], &[100.0, 500.0]), false).unwrap();
        assert_relative_eq!(obv.ti_data().column("obv").unwrap()[1], 0.0);
    }

    #[test]
    fn rising_run_is_bearish_for_volume_polarity() {
        let obv = OnBalanceVolume::new(
            &frame(
                &[10.0, 11.0, 12.0, 13.0, 14.0],
                &[100.0, 100.0, 100.0, 100.0, 100.0],
            ),
            false,
        )
        .unwrap();
        assert_eq!(obv.signal(), Signal::Sell);
    }

    #[test]
    fn index_matches_input() {
        let obv = OnBalanceVolume::new(&frame(&[10.0, 12.0], &[1.0, 2.0]), false).unwrap();
        assert_eq!(obv.ti_data().index(), obv.input().index());
    }
}
