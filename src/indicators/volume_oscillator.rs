//! Volume Oscillator indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Volume Oscillator",
    short_name: "VOSC",
    required_input_columns: &["volume"],
    graph_input_columns: &[],
    graph_y_label: "VOSC",
    graph_lines_color: &["tab:blue"],
    graph_alpha_values: &[0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct VolumeOscillator {
    input: Frame,
    ti: Frame,
    short_period: usize,
    long_period: usize,
}

impl VolumeOscillator {
    pub fn new(
        input_data: &Frame,
        short_period: usize,
        long_period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if short_period == 0 {
            return Err(TtiError::bad_period("short_period", short_period));
        }
        if long_period <= short_period {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "long_period".to_string(),
                constraint: "> short_period".to_string(),
                actual: long_period.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, long_period, input.len())?;
        let ti = Self::calculate(&input, short_period, long_period)?;
        Ok(VolumeOscillator {
            input,
            ti,
            short_period,
            long_period,
        })
    }

    pub fn short_period(&self) -> usize {
        self.short_period
    }

    pub fn long_period(&self) -> usize {
        self.long_period
    }

    fn calculate(
        input: &Frame,
        short_period: usize,
        long_period: usize,
    ) -> Result<Frame, TtiError> {
        let volume = input.column("volume").unwrap();
        let short = kernels::sma(volume, short_period);
        let long = kernels::sma(volume, long_period);
        let vosc: Vec<f64> = short.iter().zip(&long).map(|(s, l)| s - l).collect();
        Frame::from_columns(input.index().to_vec(), vec![("vosc", vosc)])
    }
}

impl Indicator for VolumeOscillator {
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
        if n < 4 {
            return Signal::Hold;
        }
        let vosc = &self.ti.column("vosc").unwrap()[..n];
        // only a sustained positive reading counts
        if vosc[n - 4..].iter().all(|v| *v > 0.0) {
            signal::trend_signal_volume(vosc)
        } else {
            Signal::Hold
        }
    }
}
