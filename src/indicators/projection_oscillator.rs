//! Projection Oscillator indicator.
//!
//! Close position inside the projection bands, 0..100, with a 3-day EMA
//! trigger line.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels::{self, EmaSeed};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Projection Oscillator",
    short_name: "PO",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | PO",
    graph_lines_color: &["black", "tab:blue", "tab:orange"],
    graph_alpha_values: &[0.9, 0.8, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const TRIGGER_PERIOD: usize = 3;
const OVERSOLD: f64 = 20.0;
const OVERBOUGHT: f64 = 80.0;

fn projected_extreme(
    series: &[f64],
    slope: &[f64],
    period: usize,
    pick_max: bool,
) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    for i in (period - 1)..series.len() {
        if !slope[i].is_finite() {
            continue;
        }
        let mut extreme = series[i];
        for j in 1..period {
            let candidate = series[i - j] + j as f64 * slope[i];
            extreme = if pick_max {
                extreme.max(candidate)
            } else {
                extreme.min(candidate)
            };
        }
        out[i] = extreme;
    }
    out
}

#[derive(Debug)]
pub struct ProjectionOscillator {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl ProjectionOscillator {
    pub fn new(
        input_data: &Frame,
        period: usize,
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
        ensure_min_rows(PROPERTIES.long_name, period + TRIGGER_PERIOD - 1, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(ProjectionOscillator { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let (slope_high, _) = kernels::rolling_ols(high, period)?;
        let (slope_low, _) = kernels::rolling_ols(low, period)?;
        let upper = projected_extreme(high, &slope_high, period, true);
        let lower = projected_extreme(low, &slope_low, period, false);

        let po: Vec<f64> = (0..input.len())
            .map(|i| {
                let width = upper[i] - lower[i];
                if !width.is_finite() || width == 0.0 {
                    f64::NAN
                } else {
                    100.0 * (close[i] - lower[i]) / width
                }
            })
            .collect();
        let trigger = kernels::ema(&po, TRIGGER_PERIOD, EmaSeed::Mean);
        Frame::from_columns(
            input.index().to_vec(),
            vec![("po", po), ("trigger", trigger)],
        )
    }
}

impl Indicator for ProjectionOscillator {
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
        let po = &self.ti.column("po").unwrap()[..n];
        let trigger = &self.ti.column("trigger").unwrap()[..n];
        let threshold = signal::threshold_exit(po, OVERSOLD, OVERBOUGHT);
        if threshold != Signal::Hold {
            return threshold;
        }
        // trigger crossovers only count in the extreme regions
        let last = match po.last() {
            Some(v) if v.is_finite() => *v,
            _ => return Signal::Hold,
        };
        if last < OVERSOLD && signal::crossed_above(po, trigger) {
            Signal::Buy
        } else if last > OVERBOUGHT && signal::crossed_below(po, trigger) {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
