//! Intraday Movement Index indicator.
//!
//! An RSI-style ratio built from open-to-close gains and losses.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Intraday Movement Index",
    short_name: "IMI",
    required_input_columns: &["open", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | IMI",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct IntradayMovementIndex {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl IntradayMovementIndex {
    pub fn new(
        input_data: &Frame,
        period: usize,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if period == 0 {
            return Err(TtiError::bad_period("period", period));
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, period, input.len())?;
        let ti = Self::calculate(&input, period)?;
        Ok(IntradayMovementIndex { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let open = input.column("open").unwrap();
        let close = input.column("close").unwrap();

        let gains: Vec<f64> = (0..input.len())
            .map(|i| (close[i] - open[i]).max(0.0))
            .collect();
        let losses: Vec<f64> = (0..input.len())
            .map(|i| (open[i] - close[i]).max(0.0))
            .collect();
        let mut imi = vec![f64::NAN; input.len()];
        for i in (period - 1)..input.len() {
            let up: f64 = gains[i + 1 - period..=i].iter().sum();
            let down: f64 = losses[i + 1 - period..=i].iter().sum();
            imi[i] = if up + down == 0.0 {
                0.0
            } else {
                100.0 * up / (up + down)
            };
        }
        Frame::from_columns(input.index().to_vec(), vec![("imi", imi)])
    }
}

impl Indicator for IntradayMovementIndex {
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
        signal::threshold_exit(&self.ti.column("imi").unwrap()[..n], 30.0, 70.0)
    }
}
