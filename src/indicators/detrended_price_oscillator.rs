//! Detrended Price Oscillator indicator.
//!
//! `dpo[i] = close[i] - sma_p(close)[i - (p/2 + 1)]`. The displacement
//! leaves the last `p/2 + 1` rows undefined, so the signal rule reads the
//! latest row that still has a value.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Detrended Price Oscillator",
    short_name: "DPO",
    required_input_columns: &["close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | DPO",
    graph_lines_color: &["black", "tab:brown"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct DetrendedPriceOscillator {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl DetrendedPriceOscillator {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let displacement = period / 2 + 1;
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period + displacement, input.len())?;
        let ti = Self::calculate(&input, period, displacement)?;
        Ok(DetrendedPriceOscillator { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize, displacement: usize) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let shifted_ma = kernels::shift(&kernels::sma(close, period), displacement);
        let mut dpo: Vec<f64> = close
            .iter()
            .zip(&shifted_ma)
            .map(|(c, m)| c - m)
            .collect();
        // the displaced tail has no moving average to subtract
        let n = dpo.len();
        for value in &mut dpo[n - displacement..] {
            *value = f64::NAN;
        }
        Frame::from_columns(input.index().to_vec(), vec![("dpo", dpo)])
    }
}

impl Indicator for DetrendedPriceOscillator {
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
        let dpo = &self.ti.column("dpo").unwrap()[..n];
        // skip the undefined tail before reading the crossover
        let defined = dpo
            .iter()
            .rposition(|v| v.is_finite())
            .map(|i| &dpo[..=i])
            .unwrap_or(&[]);
        signal::zero_cross_reversion(defined)
    }
}
