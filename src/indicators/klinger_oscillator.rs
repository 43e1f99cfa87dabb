//! Klinger Oscillator indicator.
//!
//! Volume force combines the day's trend direction with the ratio of the
//! daily range to a cumulative range measurement; the oscillator is the
//! spread between a 34-day and a 55-day EMA of that force.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Klinger Oscillator",
    short_name: "KO",
    required_input_columns: &["high", "low", "close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | KO",
    graph_lines_color: &["black", "tab:pink"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const FAST_PERIOD: usize = 34;
const SLOW_PERIOD: usize = 55;

#[derive(Debug)]
pub struct KlingerOscillator {
    input: Frame,
    ti: Frame,
}

impl KlingerOscillator {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, SLOW_PERIOD + 1, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(KlingerOscillator { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();
        let n = input.len();

        let hlc: Vec<f64> = (0..n).map(|i| high[i] + low[i] + close[i]).collect();
        let dm: Vec<f64> = (0..n).map(|i| high[i] - low[i]).collect();

        let mut volume_force = vec![f64::NAN; n];
        let mut prev_trend = 0.0;
        let mut cm = 0.0;
        for i in 1..n {
            let trend = if hlc[i] > hlc[i - 1] { 1.0 } else { -1.0 };
            cm = if trend == prev_trend {
                cm + dm[i]
            } else {
                dm[i - 1] + dm[i]
            };
            volume_force[i] = if cm == 0.0 {
                0.0
            } else {
                volume[i] * (2.0 * (dm[i] / cm) - 1.0).abs() * trend * 100.0
            };
            prev_trend = trend;
        }

        let fast = kernels::ema(&volume_force, FAST_PERIOD, EmaSeed::Mean);
        let slow = kernels::ema(&volume_force, SLOW_PERIOD, EmaSeed::Mean);
        let ko: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        Frame::from_columns(input.index().to_vec(), vec![("ko", ko)])
    }
}

impl Indicator for KlingerOscillator {
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
        signal::zero_cross_reversion(&self.ti.column("ko").unwrap()[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Frame {
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
                ("volume", volume.to_vec()),
            ],
        )
        .unwrap()
    }

    fn oscillating(n: usize) -> Frame {
        let close: Vec<f64> = (0..n)
            .map(|i| 100.0 + if i % 2 == 0 { 2.0 } else { -2.0 })
            .collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let volume = vec![1000.0; n];
        frame(&high, &low, &close, &volume)
    }

    #[test]
    fn needs_slow_ema_history() {
        assert!(matches!(
            KlingerOscillator::new(&oscillating(SLOW_PERIOD), false),
            Err(TtiError::NotEnoughInputData { .. })
        ));
    }

    #[test]
    fn warmup_ends_after_slow_ema_seed() {
        let ko = KlingerOscillator::new(&oscillating(70), false).unwrap();
        let values = ko.ti_data().column("ko").unwrap();
        // volume force starts at row 1, slow ema seeds 54 rows later
        assert!(values[SLOW_PERIOD - 1].is_nan());
        assert!(values[SLOW_PERIOD].is_finite());
    }

    #[test]
    fn alternating_days_keep_the_oscillator_bounded() {
        let ko = KlingerOscillator::new(&oscillating(80), false).unwrap();
        let values = ko.ti_data().column("ko").unwrap();
        let last = values[values.len() - 1];
        assert!(last.is_finite());
        // the force flips sign daily, so the ema spread stays small
        // relative to the raw force magnitude (volume * 100)
        assert!(last.abs() < 100_000.0);
    }
}
