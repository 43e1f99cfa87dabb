//! Stochastic Oscillator indicator.
//!
//! %K with optional slowing, %D as a simple or exponential average of
//! %K. Signals fire on threshold exits and on %K/%D crossovers inside
//! the extreme regions.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

use super::moving_average::MaMode;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Stochastic Oscillator",
    short_name: "SO",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | SO",
    graph_lines_color: &["black", "tab:blue", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const OVERSOLD: f64 = 20.0;
const OVERBOUGHT: f64 = 80.0;

#[derive(Debug)]
pub struct StochasticOscillator {
    input: Frame,
    ti: Frame,
    k_periods: usize,
    k_slowing_periods: usize,
    d_periods: usize,
    d_method: MaMode,
}

impl StochasticOscillator {
    pub fn new(
        input_data: &Frame,
        k_periods: usize,
        k_slowing_periods: usize,
        d_periods: usize,
        d_method: MaMode,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if k_periods == 0 {
            return Err(TtiError::bad_period("k_periods", k_periods));
        }
        if k_slowing_periods != 1 && k_slowing_periods != 3 {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "k_slowing_periods".to_string(),
                constraint: "1 or 3".to_string(),
                actual: k_slowing_periods.to_string(),
            });
        }
        if d_periods == 0 {
            return Err(TtiError::bad_period("d_periods", d_periods));
        }
        if !matches!(d_method, MaMode::Simple | MaMode::Exponential) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "d_method".to_string(),
                constraint: "simple or exponential".to_string(),
                actual: d_method.label().to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(
            PROPERTIES.long_name,
            k_periods + k_slowing_periods + d_periods - 2,
            input.len(),
        )?;
        let ti = Self::calculate(&input, k_periods, k_slowing_periods, d_periods, d_method)?;
        Ok(StochasticOscillator {
            input,
            ti,
            k_periods,
            k_slowing_periods,
            d_periods,
            d_method,
        })
    }

    pub fn k_periods(&self) -> usize {
        self.k_periods
    }

    pub fn k_slowing_periods(&self) -> usize {
        self.k_slowing_periods
    }

    pub fn d_periods(&self) -> usize {
        self.d_periods
    }

    pub fn d_method(&self) -> MaMode {
        self.d_method
    }

    fn calculate(
        input: &Frame,
        k_periods: usize,
        k_slowing_periods: usize,
        d_periods: usize,
        d_method: MaMode,
    ) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let highest = kernels::rolling_max(high, k_periods);
        let lowest = kernels::rolling_min(low, k_periods);

        let num: Vec<f64> = (0..input.len()).map(|i| close[i] - lowest[i]).collect();
        let den: Vec<f64> = (0..input.len()).map(|i| highest[i] - lowest[i]).collect();
        // ratio of window means equals the ratio of window sums
        let num_slow = kernels::sma(&num, k_slowing_periods);
        let den_slow = kernels::sma(&den, k_slowing_periods);
        let percent_k: Vec<f64> = num_slow
            .iter()
            .zip(&den_slow)
            .map(|(n, d)| {
                if n.is_nan() || d.is_nan() {
                    f64::NAN
                } else if *d == 0.0 {
                    0.0
                } else {
                    100.0 * n / d
                }
            })
            .collect();
        let percent_d = match d_method {
            MaMode::Exponential => kernels::ema(&percent_k, d_periods, EmaSeed::Mean),
            _ => kernels::sma(&percent_k, d_periods),
        };
        Frame::from_columns(
            input.index().to_vec(),
            vec![("%k", percent_k), ("%d", percent_d)],
        )
    }
}

impl Indicator for StochasticOscillator {
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
        let percent_k = &self.ti.column("%k").unwrap()[..n];
        let percent_d = &self.ti.column("%d").unwrap()[..n];
        let threshold = signal::threshold_exit(percent_k, OVERSOLD, OVERBOUGHT);
        if threshold != Signal::Hold {
            return threshold;
        }
        let last = match percent_k.last() {
            Some(v) if v.is_finite() => *v,
            _ => return Signal::Hold,
        };
        if last < OVERSOLD && signal::crossed_above(percent_k, percent_d) {
            Signal::Buy
        } else if last > OVERBOUGHT && signal::crossed_below(percent_k, percent_d) {
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
    fn rejects_odd_slowing() {
        let high = vec![110.0; 10];
        let low = vec![100.0; 10];
        let close = vec![105.0; 10];
        let result = StochasticOscillator::new(
            &frame(&high, &low, &close),
            3,
            2,
            3,
            MaMode::Simple,
            false,
        );
        assert!(matches!(
            result,
            Err(TtiError::WrongValueForInputParameter { .. })
        ));
    }

    #[test]
    fn percent_k_tracks_the_close_inside_the_band() {
        let n = 6;
        let high = vec![110.0; n];
        let low = vec![100.0; n];
        let mut close = vec![101.0; n];
        close[n - 1] = 105.0;
        let so = StochasticOscillator::new(
            &frame(&high, &low, &close),
            3,
            1,
            3,
            MaMode::Simple,
            false,
        )
        .unwrap();
        let percent_k = so.ti_data().column("%k").unwrap();
        assert!(percent_k[1].is_nan());
        assert_relative_eq!(percent_k[n - 2], 10.0);
        assert_relative_eq!(percent_k[n - 1], 50.0);
        // a fresh exit from the oversold region
        assert_eq!(so.signal(), Signal::Buy);
    }

    #[test]
    fn oversold_crossover_of_the_signal_line_buys() {
        let high = vec![110.0; 6];
        let low = vec![100.0; 6];
        let close = [101.0, 101.0, 101.0, 101.0, 100.2, 101.5];
        let so = StochasticOscillator::new(
            &frame(&high, &low, &close),
            3,
            1,
            3,
            MaMode::Simple,
            false,
        )
        .unwrap();
        let percent_k = so.ti_data().column("%k").unwrap();
        let percent_d = so.ti_data().column("%d").unwrap();
        assert_relative_eq!(percent_k[4], 2.0);
        assert_relative_eq!(percent_k[5], 15.0);
        assert_relative_eq!(percent_d[5], 9.0);
        assert_eq!(so.signal(), Signal::Buy);
    }
}
