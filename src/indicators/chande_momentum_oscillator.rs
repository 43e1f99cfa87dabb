//! Chande Momentum Oscillator indicator.
//!
//! `cmo = 100 * (U - D) / (U + D)` over the trailing window of close
//! changes, bounded in [-100, 100].

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Chande Momentum Oscillator",
    short_name: "CMO",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | CMO",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

/// Shared with the variable moving average, which scales its smoothing by
/// `|cmo| / 100`.
pub(crate) fn cmo_values(close: &[f64], period: usize) -> Vec<f64> {
    let changes = kernels::diff(close, 1);
    let mut out = vec![f64::NAN; close.len()];
    for i in period..close.len() {
        let window = &changes[i + 1 - period..=i];
        let up: f64 = window.iter().filter(|c| **c > 0.0).sum();
        let down: f64 = -window.iter().filter(|c| **c < 0.0).sum::<f64>();
        out[i] = if up + down == 0.0 {
            0.0
        } else {
            100.0 * (up - down) / (up + down)
        };
    }
    out
}

#[derive(Debug)]
pub struct ChandeMomentumOscillator {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl ChandeMomentumOscillator {
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
        Ok(ChandeMomentumOscillator { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let cmo = cmo_values(input.column("close").unwrap(), period);
        Frame::from_columns(input.index().to_vec(), vec![("cmo", cmo)])
    }
}

impl Indicator for ChandeMomentumOscillator {
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
        signal::threshold_exit(&self.ti.column("cmo").unwrap()[..n], -50.0, 50.0)
    }
}
