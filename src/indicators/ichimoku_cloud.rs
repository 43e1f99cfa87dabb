//! Ichimoku Cloud indicator.
//!
//! Conversion and base lines over 9/26-day ranges, with the two cloud
//! spans projected 26 rows forward off 26/52-day ranges. The crossover
//! signal additionally requires close to sit on the matching side of the
//! cloud, so it stays quiet until the spans have warmed up.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Ichimoku Cloud",
    short_name: "IC",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price",
    graph_lines_color: &["black", "tab:red", "tab:blue", "tab:green", "tab:brown"],
    graph_alpha_values: &[0.9, 0.8, 0.8, 0.5, 0.5],
    graph_areas: &[("senkou_a", "senkou_b", "lightgreen")],
    graph_subplots: false,
    prefix_stable: true,
};

const CONVERSION_PERIOD: usize = 9;
const BASE_PERIOD: usize = 26;
const SPAN_B_PERIOD: usize = 52;
const DISPLACEMENT: usize = 26;

fn midline(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    kernels::rolling_max(high, period)
        .iter()
        .zip(&kernels::rolling_min(low, period))
        .map(|(h, l)| (h + l) / 2.0)
        .collect()
}

#[derive(Debug)]
pub struct IchimokuCloud {
    input: Frame,
    ti: Frame,
}

impl IchimokuCloud {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, SPAN_B_PERIOD, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(IchimokuCloud { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();

        let tenkan = midline(high, low, CONVERSION_PERIOD);
        let kijun = midline(high, low, BASE_PERIOD);
        let span_a_raw: Vec<f64> = tenkan
            .iter()
            .zip(&kijun)
            .map(|(t, k)| (t + k) / 2.0)
            .collect();
        let senkou_a = kernels::shift(&span_a_raw, DISPLACEMENT);
        let senkou_b = kernels::shift(&midline(high, low, SPAN_B_PERIOD), DISPLACEMENT);

        Frame::from_columns(
            input.index().to_vec(),
            vec![
                ("tenkan_sen", tenkan),
                ("kijun_sen", kijun),
                ("senkou_a", senkou_a),
                ("senkou_b", senkou_b),
            ],
        )
    }
}

impl Indicator for IchimokuCloud {
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
        if n == 0 {
            return Signal::Hold;
        }
        let close = self.input.column("close").unwrap()[n - 1];
        let tenkan = &self.ti.column("tenkan_sen").unwrap()[..n];
        let kijun = &self.ti.column("kijun_sen").unwrap()[..n];
        let span_a = self.ti.column("senkou_a").unwrap()[n - 1];
        let span_b = self.ti.column("senkou_b").unwrap()[n - 1];
        if !span_a.is_finite() || !span_b.is_finite() {
            return Signal::Hold;
        }
        if signal::crossed_above(tenkan, kijun) && close > span_a.max(span_b) {
            Signal::Buy
        } else if signal::crossed_below(tenkan, kijun) && close < span_a.min(span_b) {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
