//! Vertical Horizontal Filter indicator.
//!
//! Net price travel over gross price travel. High readings mark a
//! trending market, low readings a congested one, so the signal defers
//! to a trend follower or a momentum gauge accordingly.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::Signal;

use super::double_exponential_moving_average::DoubleExponentialMovingAverage;
use super::momentum::Momentum;

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Vertical Horizontal Filter",
    short_name: "VHF",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | VHF",
    graph_lines_color: &["black", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const TREND_MA_PERIOD: usize = 5;
const CONGESTION_MOMENTUM_PERIOD: usize = 12;

#[derive(Debug)]
pub struct VerticalHorizontalFilter {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl VerticalHorizontalFilter {
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
        Ok(VerticalHorizontalFilter { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let highest = kernels::rolling_max(close, period);
        let lowest = kernels::rolling_min(close, period);
        let travel: Vec<f64> = kernels::diff(close, 1).iter().map(|d| d.abs()).collect();

        let mut vhf = vec![f64::NAN; input.len()];
        for i in period..input.len() {
            let gross: f64 = travel[i + 1 - period..=i].iter().sum();
            if gross == 0.0 {
                vhf[i] = 0.0;
            } else {
                vhf[i] = (highest[i] - lowest[i]).abs() / gross;
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("vhf", vhf)])
    }
}

impl Indicator for VerticalHorizontalFilter {
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
        if n < 3 {
            return Signal::Hold;
        }
        let vhf = &self.ti.column("vhf").unwrap()[..n];
        let tail = &vhf[n - 3..];
        if tail.iter().any(|v| v.is_nan()) {
            return Signal::Hold;
        }
        let head = self.input.head(n);
        if tail[0] < tail[1] && tail[1] < tail[2] {
            // trending: follow a fast moving average
            match DoubleExponentialMovingAverage::new(&head, TREND_MA_PERIOD, false) {
                Ok(dema) => dema.signal(),
                Err(_) => Signal::Hold,
            }
        } else if tail[0] > tail[1] && tail[1] > tail[2] {
            // congested: fall back to momentum
            match Momentum::new(&head, CONGESTION_MOMENTUM_PERIOD, false) {
                Ok(mom) => mom.signal(),
                Err(_) => Signal::Hold,
            }
        } else {
            Signal::Hold
        }
    }
}
