//! Moving Average indicator family.
//!
//! One indicator covering five smoothing modes: simple, exponential,
//! time-series (regression forecast), triangular, and variable (Chande's
//! volatility-scaled EMA).

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::indicators::chande_momentum_oscillator::cmo_values;
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Moving Average",
    short_name: "MA",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

const VMA_CMO_PERIOD: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaMode {
    Simple,
    Exponential,
    TimeSeries,
    Triangular,
    Variable,
}

impl MaMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(MaMode::Simple),
            "exponential" => Some(MaMode::Exponential),
            "time_series" => Some(MaMode::TimeSeries),
            "triangular" => Some(MaMode::Triangular),
            "variable" => Some(MaMode::Variable),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaMode::Simple => "simple",
            MaMode::Exponential => "exponential",
            MaMode::TimeSeries => "time_series",
            MaMode::Triangular => "triangular",
            MaMode::Variable => "variable",
        }
    }
}

#[derive(Debug)]
pub struct MovingAverage {
    input: Frame,
    ti: Frame,
    period: usize,
    mode: MaMode,
}

impl MovingAverage {
    pub fn new(
        input_data: &Frame,
        period: usize,
        mode: MaMode,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period < 2 {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "period".to_string(),
                constraint: ">= 2".to_string(),
                actual: period.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        let min_rows = match mode {
            MaMode::Variable => Self::vma_seed_index(period) + 1,
            _ => period,
        };
        ensure_min_rows(PROPERTIES.long_name, min_rows, input.len())?;
        let ti = Self::calculate(&input, period, mode)?;
        Ok(MovingAverage {
            input,
            ti,
            period,
            mode,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn mode(&self) -> MaMode {
        self.mode
    }

    fn vma_seed_index(period: usize) -> usize {
        // the volatility ratio needs its own warmup
        (period + 1).max(VMA_CMO_PERIOD + 1)
    }

    fn calculate(input: &Frame, period: usize, mode: MaMode) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let ma = match mode {
            MaMode::Simple => kernels::sma(close, period),
            MaMode::Exponential => kernels::ema(close, period, EmaSeed::Mean),
            MaMode::TimeSeries => {
                let (slope, intercept) = kernels::rolling_ols(close, period)?;
                slope
                    .iter()
                    .zip(&intercept)
                    .map(|(b, a)| a + b * period as f64)
                    .collect()
            }
            MaMode::Triangular => {
                let (first, second) = if period % 2 == 0 {
                    (period / 2, period / 2 + 1)
                } else {
                    (period.div_ceil(2), period.div_ceil(2))
                };
                kernels::sma(&kernels::sma(close, first), second)
            }
            MaMode::Variable => Self::variable_ma(close, period),
        };
        Frame::from_columns(input.index().to_vec(), vec![("ma", ma)])
    }

    fn variable_ma(close: &[f64], period: usize) -> Vec<f64> {
        let alpha = 2.0 / (period as f64 + 1.0);
        let cmo = cmo_values(close, VMA_CMO_PERIOD);
        let seed = Self::vma_seed_index(period);
        let mut out = vec![f64::NAN; close.len()];
        if seed >= close.len() {
            return out;
        }
        out[seed] = close[seed];
        for i in (seed + 1)..close.len() {
            let ratio = cmo[i].abs() / 100.0;
            out[i] = alpha * ratio * close[i] + (1.0 - alpha * ratio) * out[i - 1];
        }
        out
    }
}

impl Indicator for MovingAverage {
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
        let ma = &self.ti.column("ma").unwrap()[..n];
        signal::price_cross(close, ma)
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
    fn mode_names_round_trip() {
        for mode in [
            MaMode::Simple,
            MaMode::Exponential,
            MaMode::TimeSeries,
            MaMode::Triangular,
            MaMode::Variable,
        ] {
            assert_eq!(MaMode::parse(mode.label()), Some(mode));
        }
        assert_eq!(MaMode::parse("weighted"), None);
    }

    #[test]
    fn simple_mode_matches_the_kernel() {
        let close = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = MovingAverage::new(&frame(&close), 3, MaMode::Simple, false).unwrap();
        let values = ma.ti_data().column("ma").unwrap();
        let expected = kernels::sma(&close, 3);
        assert_relative_eq!(values[4], expected[4]);
    }

    #[test]
    fn time_series_mode_forecasts_one_step_ahead() {
        let close: Vec<f64> = (0..8).map(|i| 10.0 + 2.0 * i as f64).collect();
        let ma = MovingAverage::new(&frame(&close), 3, MaMode::TimeSeries, false).unwrap();
        let values = ma.ti_data().column("ma").unwrap();
        for i in 2..8 {
            assert_relative_eq!(values[i], close[i] + 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn triangular_mode_flat_series() {
        let ma = MovingAverage::new(&frame(&[7.0; 10]), 4, MaMode::Triangular, false).unwrap();
        let values = ma.ti_data().column("ma").unwrap();
        // 2-sma then 3-sma: first defined at index 3
        assert!(values[2].is_nan());
        assert_relative_eq!(values[3], 7.0);
    }

    #[test]
    fn variable_mode_freezes_in_flat_markets() {
        let ma = MovingAverage::new(&frame(&[100.0; 20]), 5, MaMode::Variable, false).unwrap();
        let values = ma.ti_data().column("ma").unwrap();
        // zero volatility ratio keeps the line at its seed
        assert_relative_eq!(values[19], 100.0);
    }

    #[test]
    fn close_crossing_above_buys() {
        let mut close = vec![10.0; 9];
        close.push(8.0);
        close.push(12.0);
        let ma = MovingAverage::new(&frame(&close), 3, MaMode::Simple, false).unwrap();
        assert_eq!(ma.signal(), Signal::Buy);
    }
}
