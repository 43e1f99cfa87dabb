//! Performance indicator.
//!
//! Cumulative return against the first close, with a configured profit
//! target. In long mode, reaching the target is the moment to take
//! profit; short mode mirrors the rule below the negated target.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Performance",
    short_name: "PRF",
    required_input_columns: &["close"],
    graph_input_columns: &[],
    graph_y_label: "Return",
    graph_lines_color: &["tab:blue", "tab:red"],
    graph_alpha_values: &[0.9, 0.5],
    graph_areas: &[],
    graph_subplots: false,
    prefix_stable: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceMode {
    LongTarget,
    ShortTarget,
}

impl PerformanceMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "long" => Some(PerformanceMode::LongTarget),
            "short" => Some(PerformanceMode::ShortTarget),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceMode::LongTarget => "long",
            PerformanceMode::ShortTarget => "short",
        }
    }
}

#[derive(Debug)]
pub struct Performance {
    input: Frame,
    ti: Frame,
    mode: PerformanceMode,
    target: f64,
}

impl Performance {
    pub fn new(
        input_data: &Frame,
        mode: PerformanceMode,
        target: f64,
        fill_missing_values: bool,
    ) -> Result<Self, TtiError> {
        if !(target > 0.0) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "target".to_string(),
                constraint: "> 0.0".to_string(),
                actual: target.to_string(),
            });
        }
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 1, input.len())?;
        if input.column("close").unwrap()[0] == 0.0 {
            return Err(TtiError::InvalidInputData {
                reason: "first close value is zero, base return undefined".to_string(),
            });
        }
        let ti = Self::calculate(&input, mode, target)?;
        Ok(Performance {
            input,
            ti,
            mode,
            target,
        })
    }

    pub fn mode(&self) -> PerformanceMode {
        self.mode
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    fn calculate(input: &Frame, mode: PerformanceMode, target: f64) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let base = close[0];
        let prf: Vec<f64> = close.iter().map(|c| (c - base) / base).collect();
        let level = match mode {
            PerformanceMode::LongTarget => target,
            PerformanceMode::ShortTarget => -target,
        };
        let target_line = vec![level; input.len()];
        Frame::from_columns(
            input.index().to_vec(),
            vec![("prf", prf), ("target", target_line)],
        )
    }
}

impl Indicator for Performance {
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
        let prf = &self.ti.column("prf").unwrap()[..n];
        match self.mode {
            PerformanceMode::LongTarget if signal::crossed_above_level(prf, self.target) => {
                Signal::Sell
            }
            PerformanceMode::ShortTarget if signal::crossed_below_level(prf, -self.target) => {
                Signal::Buy
            }
            _ => Signal::Hold,
        }
    }
}
