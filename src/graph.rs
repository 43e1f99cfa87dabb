//! Declarative plot description.
//!
//! Indicators and the trading simulator hand back a [`GraphSpec`] instead
//! of drawing anything themselves; rendering is an external collaborator.
//! The spec is a plain data structure: labelled series, optional filled
//! areas and a subplot split.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GraphLine {
    pub label: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub color: String,
    pub alpha: f64,
    /// 0 = price panel, 1 = indicator panel when the graph is split.
    pub subplot: usize,
}

/// A shaded region between two series on the same x axis.
#[derive(Debug, Clone, Serialize)]
pub struct GraphArea {
    pub x: Vec<NaiveDate>,
    pub y1: Vec<f64>,
    pub y2: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<GraphLine>,
    pub areas: Vec<GraphArea>,
    pub subplots: bool,
}

impl GraphSpec {
    pub fn new(title: &str, y_label: &str, subplots: bool) -> Self {
        GraphSpec {
            title: title.to_string(),
            x_label: "Date".to_string(),
            y_label: y_label.to_string(),
            lines: Vec::new(),
            areas: Vec::new(),
            subplots,
        }
    }

    pub fn add_line(
        &mut self,
        label: &str,
        x: &[NaiveDate],
        y: &[f64],
        color: &str,
        alpha: f64,
        subplot: usize,
    ) {
        self.lines.push(GraphLine {
            label: label.to_string(),
            x: x.to_vec(),
            y: y.to_vec(),
            color: color.to_string(),
            alpha,
            subplot,
        });
    }

    pub fn add_area(&mut self, x: &[NaiveDate], y1: &[f64], y2: &[f64], color: &str) {
        self.areas.push(GraphArea {
            x: x.to_vec(),
            y1: y1.to_vec(),
            y2: y2.to_vec(),
            color: color.to_string(),
        });
    }
}
