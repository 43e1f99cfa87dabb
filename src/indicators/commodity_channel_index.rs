//! Commodity Channel Index indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Commodity Channel Index",
    short_name: "CCI",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | CCI",
    graph_lines_color: &["black", "tab:olive"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const SCALING: f64 = 0.015;

#[derive(Debug)]
pub struct CommodityChannelIndex {
    input: Frame,
    ti: Frame,
    period: usize,
}

impl CommodityChannelIndex {
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
        Ok(CommodityChannelIndex { input, ti, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn calculate(input: &Frame, period: usize) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();

        let tp: Vec<f64> = (0..input.len())
            .map(|i| (high[i] + low[i] + close[i]) / 3.0)
            .collect();
        let mut cci = vec![f64::NAN; input.len()];
        for i in (period - 1)..tp.len() {
            let window = &tp[i + 1 - period..=i];
            let mean = window.iter().sum::<f64>() / period as f64;
            let mad = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period as f64;
            cci[i] = if mad == 0.0 {
                0.0
            } else {
                (tp[i] - mean) / (SCALING * mad)
            };
        }
        Frame::from_columns(input.index().to_vec(), vec![("cci", cci)])
    }
}

impl Indicator for CommodityChannelIndex {
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
        signal::threshold_exit(&self.ti.column("cci").unwrap()[..n], -100.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![
                ("high", high.to_vec()),
                ("low", low.to_vec()),
                ("close", close.to_vec()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn hand_checked_three_period() {
        // typical price is 1, 2, 3: mean 2, mad 2/3
        let cci = CommodityChannelIndex::new(
            &frame(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]),
            3,
            false,
        )
        .unwrap();
        let values = cci.ti_data().column("cci").unwrap();
        assert!(values[1].is_nan());
        assert_relative_eq!(values[2], 1.0 / (0.015 * (2.0 / 3.0)), epsilon = 1e-9);
    }

    #[test]
    fn flat_window_reads_zero() {
        let cci = CommodityChannelIndex::new(
            &frame(&[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0]),
            3,
            false,
        )
        .unwrap();
        assert_relative_eq!(cci.ti_data().column("cci").unwrap()[2], 0.0);
    }

    #[test]
    fn leaving_overbought_sells() {
        // spike then pullback takes cci from above +100 back inside
        let tp = [10.0, 10.0, 10.0, 14.0, 10.1];
        let cci = CommodityChannelIndex::new(&frame(&tp, &tp, &tp), 4, false).unwrap();
        let values = cci.ti_data().column("cci").unwrap();
        assert!(values[3] > 100.0);
        assert!(values[4] <= 100.0);
        assert_eq!(cci.signal(), Signal::Sell);
    }
}
