//! Volume Rate Of Change indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Volume Rate Of Change",
    short_name: "VRC",
    required_input_columns: &["volume"],
    graph_input_columns: &[],
    graph_y_label: "VRC",
    graph_lines_color: &["tab:blue"],
    graph_alpha_values: &[0.8],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct VolumeRateOfChange {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl VolumeRateOfChange {
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
        Ok(VolumeRateOfChange { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let volume = input.column("volume").unwrap();
        let mut vrc = vec![f64::NAN; input.len()];
        for i in period..input.len() {
            if volume[i - period] != 0.0 {
                vrc[i] = 100.0 * (volume[i] - volume[i - period]) / volume[i - period];
            }
        }
        Frame::from_columns(input.index().to_vec(), vec![("vrc", vrc)])
    }
}

impl Indicator for VolumeRateOfChange {
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
        signal::trend_signal_volume(&self.ti.column("vrc").unwrap()[..n])
    }
}
