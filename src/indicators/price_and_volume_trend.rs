//! Price And Volume Trend indicator.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Price And Volume Trend",
    short_name: "PVT",
    required_input_columns: &["close", "volume"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | PVT",
    graph_lines_color: &["black", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.8],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

#[derive(Debug)]
pub struct PriceAndVolumeTrend {
    input: Frame,
    ti: Frame,
}

impl PriceAndVolumeTrend {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, 2, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(PriceAndVolumeTrend { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let close = input.column("close").unwrap();
        let volume = input.column("volume").unwrap();

        let mut pvt = Vec::with_capacity(input.len());
        pvt.push(0.0);
        for i in 1..input.len() {
            let step = if close[i - 1] != 0.0 {
                (close[i] - close[i - 1]) / close[i - 1] * volume[i]
            } else {
                0.0
            };
            pvt.push(pvt[i - 1] + step);
        }
        Frame::from_columns(input.index().to_vec(), vec![("pvt", pvt)])
    }
}

impl Indicator for PriceAndVolumeTrend {
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
        signal::trend_signal_price(&self.ti.column("pvt").unwrap()[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(close: &[f64], volume: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap())
            .collect();
        Frame::from_columns(
            index,
            vec![("close", close.to_vec()), ("volume", volume.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn accumulates_fractional_moves() {
        let pvt = PriceAndVolumeTrend::new(
            &frame(&[10.0, 11.0, 9.9], &[100.0, 200.0, 300.0]),
            false,
        )
        .unwrap();
        let values = pvt.ti_data().column("pvt").unwrap();
        assert_relative_eq!(values[0], 0.0);
        // +10% on 200 shares
        assert_relative_eq!(values[1], 20.0);
        // -10% on 300 shares
        assert_relative_eq!(values[2], 20.0 - 30.0, epsilon = 1e-9);
    }

    #[test]
    fn sustained_accumulation_buys() {
        let pvt = PriceAndVolumeTrend::new(
            &frame(
                &[10.0, 11.0, 12.0, 13.0, 14.0],
                &[100.0, 100.0, 100.0, 100.0, 100.0],
            ),
            false,
        )
        .unwrap();
        assert_eq!(pvt.signal(), Signal::Buy);
    }
}
