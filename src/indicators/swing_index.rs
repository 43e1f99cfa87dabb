//! Swing Index indicator.
//!
//! Wilder's swing value for consecutive bar pairs, clamped to -100..100.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Swing Index",
    short_name: "SWI",
    required_input_columns: &["open", "high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | SWI",
    graph_lines_color: &["black", "tab:blue"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct SwingIndex {
    input: Frame,
    ti: Frame,
    limit_move: f64,
}

impl SwingIndex {
    pub fn new(
        input_data: &Frame,
        limit_move: f64,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if !(limit_move > 0.0) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "limit_move".to_string(),
                constraint: "> 0".to_string(),
                actual: limit_move.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input, limit_move)?;
        Ok(SwingIndex {
            input,
            ti,
            limit_move,
        })
    }

    pub fn limit_move(&self) -> f64 {
        self.limit_move
    }

    fn calculate(input: &Frame, limit_move: f64) -> Result<Frame, TtiError> {
        let open = input.column("open").unwrap();
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();

        let mut swing = vec![f64::NAN; input.len()];
        for i in 1..input.len() {
            let high_move = (high[i] - close[i - 1]).abs();
            let low_move = (low[i] - close[i - 1]).abs();
            let range = high[i] - low[i];
            let gap = 0.25 * (close[i - 1] - open[i - 1]).abs();
            let r = if high_move >= low_move && high_move >= range {
                high_move - 0.5 * low_move + gap
            } else if low_move >= high_move && low_move >= range {
                low_move - 0.5 * high_move + gap
            } else {
                range + gap
            };
            if r == 0.0 {
                swing[i] = 0.0;
                continue;
            }
            let k = high_move.max(low_move);
            let body = (close[i] - close[i - 1])
                + 0.5 * (close[i] - open[i])
                + 0.25 * (close[i - 1] - open[i - 1]);
            swing[i] = (50.0 * body / r * (k / limit_move)).clamp(-100.0, 100.0);
        }
        Frame::from_columns(input.index().to_vec(), vec![("swing", swing)])
    }
}

impl Indicator for SwingIndex {
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
        signal::zero_cross_reversion(&self.ti.column("swing").unwrap()[..n])
    }
}
