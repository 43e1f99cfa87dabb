//! Indicator framework.
//!
//! Every concrete indicator owns a validated copy of its input frame and a
//! fully precomputed result frame, both built eagerly at construction. The
//! [`Indicator`] trait supplies the shared lifecycle on top: value access
//! by date, signal emission, graph assembly and simulation dispatch.
//!
//! Signal rules are stateless functions of a trailing window. The
//! framework evaluates them on growing prefixes through
//! [`Indicator::signal_at`]; slicing the owned frames instead of narrowing
//! them in place keeps prefix evaluation side-effect free on all exit
//! paths.

use std::fmt;

use chrono::NaiveDate;

use crate::error::TtiError;
use crate::frame::Frame;
use crate::graph::GraphSpec;
use crate::preprocess::validate_input_frame;
use crate::signal::Signal;
use crate::simulation::{SimulationOutcome, TradingSimulator};

/// Immutable per-type descriptor: identity, required input and the full
/// plotting layout.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorProperties {
    pub long_name: &'static str,
    pub short_name: &'static str,
    pub required_input_columns: &'static [&'static str],
    pub graph_input_columns: &'static [&'static str],
    pub graph_y_label: &'static str,
    pub graph_lines_color: &'static [&'static str],
    pub graph_alpha_values: &'static [f64],
    /// Filled regions between two result columns: `(upper, lower, color)`.
    pub graph_areas: &'static [(&'static str, &'static str, &'static str)],
    pub graph_subplots: bool,
    /// False for indicators whose math looks at the whole series, so a
    /// prefix reconstruction does not reproduce the full-series values.
    pub prefix_stable: bool,
}

/// Capability set shared by every indicator in the catalog.
pub trait Indicator: fmt::Debug {
    fn properties(&self) -> &'static IndicatorProperties;

    /// The validated input series the indicator was built from.
    fn input(&self) -> &Frame;

    /// The precomputed indicator frame, sharing the input's date index.
    fn ti_data(&self) -> &Frame;

    /// Signal rule evaluated on the first `prefix_len` rows.
    fn signal_at(&self, prefix_len: usize) -> Signal;

    fn signal(&self) -> Signal {
        self.signal_at(self.ti_data().len())
    }

    /// Row of indicator values for an exact date, or the latest row when
    /// no date is given. A date outside the index yields `None`.
    fn value_at(&self, date: Option<NaiveDate>) -> Option<Vec<f64>> {
        let ti = self.ti_data();
        match date {
            None => ti.last_row(),
            Some(d) => ti.position(d).and_then(|i| ti.row(i)),
        }
    }

    /// Assemble the declarative plot from the property descriptor.
    fn graph(&self) -> GraphSpec {
        let props = self.properties();
        let input = self.input();
        let ti = self.ti_data();

        let mut spec = GraphSpec::new(props.long_name, props.graph_y_label, props.graph_subplots);
        let indicator_panel = usize::from(props.graph_subplots);

        let color = |i: usize| -> &str {
            if props.graph_lines_color.is_empty() {
                "black"
            } else {
                props.graph_lines_color[i % props.graph_lines_color.len()]
            }
        };
        let alpha = |i: usize| -> f64 {
            if props.graph_alpha_values.is_empty() {
                1.0
            } else {
                props.graph_alpha_values[i % props.graph_alpha_values.len()]
            }
        };

        let mut line = 0;
        for &name in props.graph_input_columns {
            if let Some(values) = input.column(name) {
                spec.add_line(name, input.index(), values, color(line), alpha(line), 0);
                line += 1;
            }
        }
        for name in ti.column_names() {
            let values = ti.column(name).unwrap();
            spec.add_line(
                name,
                ti.index(),
                values,
                color(line),
                alpha(line),
                indicator_panel,
            );
            line += 1;
        }
        for &(upper, lower, fill) in props.graph_areas {
            if let (Some(y1), Some(y2)) = (ti.column(upper), ti.column(lower)) {
                spec.add_area(ti.index(), y1, y2, fill);
            }
        }
        spec
    }

    /// Run the active trading simulation over the full series, feeding the
    /// simulator this indicator's signal on each growing prefix. The
    /// indicator itself is left untouched.
    fn simulate(
        &self,
        close_values: &Frame,
        max_exposure: Option<f64>,
        short_exposure_factor: f64,
    ) -> Result<SimulationOutcome, TtiError> {
        let close = validate_input_frame(close_values, &["close"], false).map_err(|err| {
            TtiError::NotValidInputDataForSimulation {
                argument: "close_values".to_string(),
                details: err.to_string(),
            }
        })?;
        if close.index() != self.input().index() {
            return Err(TtiError::NotValidInputDataForSimulation {
                argument: "close_values".to_string(),
                details: "index does not match the indicator's input series".to_string(),
            });
        }

        let mut simulator = TradingSimulator::new(
            close.index(),
            close.column("close").unwrap(),
            max_exposure,
            short_exposure_factor,
        )?;
        for i in 0..close.len() {
            let signal = if i == 0 {
                Signal::Hold
            } else {
                self.signal_at(i + 1)
            };
            simulator.run_round(signal);
        }
        Ok(simulator.into_outcome())
    }
}

/// Construction-time gate shared by every indicator.
pub fn ensure_min_rows(indicator: &str, required: usize, actual: usize) -> Result<(), TtiError> {
    if actual < required {
        return Err(TtiError::NotEnoughInputData {
            indicator: indicator.to_string(),
            required,
            actual,
        });
    }
    Ok(())
}

/// Validate and prepare the input for an indicator's required columns.
pub fn prepare_input(
    frame: &Frame,
    props: &IndicatorProperties,
    fill_missing_values: bool,
) -> Result<Frame, TtiError> {
    validate_input_frame(frame, props.required_input_columns, fill_missing_values)
}
