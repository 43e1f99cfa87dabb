//! Projection Bands indicator.
//!
//! Each band projects the last `p` highs (or lows) forward along the
//! current regression slope and takes the extreme. The signal fires on
//! proximity: within 15% of the band width of either edge.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::Signal;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Projection Bands",
    short_name: "PBS",
    required_input_columns: &["high", "low"],
    graph_input_columns: &["high", "low"],
    graph_y_label: "Price",
    graph_lines_color: &["tab:green", "tab:red", "tab:cyan", "tab:cyan"],
    graph_alpha_values: &[0.5, 0.5, 0.8, 0.8],
    graph_areas: &[("upper_band", "lower_band", "lightblue")],
    graph_subplots: false,
    prefix_stable: true,
};

const PROXIMITY: f64 = 0.15;

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
pub struct ProjectionBands {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl ProjectionBands {
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
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(ProjectionBands { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let (slope_high, _) = kernels::rolling_ols(high, period)?;
        let (slope_low, _) = kernels::rolling_ols(low, period)?;
        let upper = projected_extreme(high, &slope_high, period, true);
        let lower = projected_extreme(low, &slope_low, period, false);
        Frame::from_columns(
            input.index().to_vec(),
            vec![("upper_band", upper), ("lower_band", lower)],
        )
    }
}

impl Indicator for ProjectionBands {
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
        if n == 0 {
            return Signal::Hold;
        }
        let high = self.input.column("high").unwrap()[n - 1];
        let low = self.input.column("low").unwrap()[n - 1];
        let upper = self.ti.column("upper_band").unwrap()[n - 1];
        let lower = self.ti.column("lower_band").unwrap()[n - 1];
        if !upper.is_finite() || !lower.is_finite() {
            return Signal::Hold;
        }
        let width = upper - lower;
        if width <= 0.0 {
            return Signal::Hold;
        }
        if upper - high < PROXIMITY * width {
            Signal::Sell
        } else if low - lower < PROXIMITY * width {
            Signal::Buy
        } else {
            Signal::Hold
        }
    }
}
