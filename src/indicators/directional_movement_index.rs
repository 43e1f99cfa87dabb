//! Directional Movement Index indicator.
//!
//! The classic Wilder system over a fixed 14-day period: smoothed
//! directional movements against smoothed true range give +DI/-DI, their
//! normalized spread gives DX, and ADX/ADXR smooth DX again. The DI
//! crossover signal only fires while ADXR reads a trending market.

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorProperties, ensure_min_rows, prepare_input};
use crate::kernels;
use crate::signal::{self, Signal};

static PROPERTIES: IndicatorProperties = IndicatorProperties {
    long_name: "Directional Movement Index",
    short_name: "DMI",
    required_input_columns: &["high", "low", "close"],
    graph_input_columns: &["close"],
    graph_y_label: "Price | DMI",
    graph_lines_color: &["black", "tab:green", "tab:red", "tab:gray", "tab:blue", "tab:cyan"],
    graph_alpha_values: &[0.9, 0.8, 0.8, 0.5, 0.8, 0.6],
    graph_areas: &[],
    graph_subplots: true,
    prefix_stable: true,
};

const PERIOD: usize = 14;
const TREND_FLOOR: f64 = 20.0;
// adx warmup (27 rows) plus the 13-row adxr lookback
const MIN_ROWS: usize = 3 * PERIOD - 1;

#[derive(Debug)]
pub struct DirectionalMovementIndex {
    input: Frame,
    ti: Frame,
}

impl DirectionalMovementIndex {
    pub fn new(input_data: &Frame, fill_missing_values: bool) -> Result<Self, TtiError> {
        let input = prepare_input(input_data, &PROPERTIES, fill_missing_values)?;
        ensure_min_rows(PROPERTIES.long_name, MIN_ROWS, input.len())?;
        let ti = Self::calculate(&input)?;
        Ok(DirectionalMovementIndex { input, ti })
    }

    fn calculate(input: &Frame) -> Result<Frame, TtiError> {
        let high = input.column("high").unwrap();
        let low = input.column("low").unwrap();
        let close = input.column("close").unwrap();
        let n = input.len();

        let mut plus_dm = vec![f64::NAN; n];
        let mut minus_dm = vec![f64::NAN; n];
        let mut tr = vec![f64::NAN; n];
        for i in 1..n {
            let up = high[i] - high[i - 1];
            let down = low[i - 1] - low[i];
            plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
            minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
            let prev_close = close[i - 1];
            tr[i] = (high[i] - low[i])
                .max((prev_close - high[i]).abs())
                .max((prev_close - low[i]).abs());
        }

        let s_plus = kernels::wilder(&plus_dm, PERIOD);
        let s_minus = kernels::wilder(&minus_dm, PERIOD);
        let s_tr = kernels::wilder(&tr, PERIOD);

        let ratio = |dm: &[f64], tr: &[f64]| -> Vec<f64> {
            dm.iter()
                .zip(tr)
                .map(|(d, t)| {
                    if !d.is_finite() || !t.is_finite() {
                        f64::NAN
                    } else if *t == 0.0 {
                        0.0
                    } else {
                        100.0 * d / t
                    }
                })
                .collect()
        };
        let di_plus = ratio(&s_plus, &s_tr);
        let di_minus = ratio(&s_minus, &s_tr);

        let dx: Vec<f64> = di_plus
            .iter()
            .zip(&di_minus)
            .map(|(p, m)| {
                if !p.is_finite() || !m.is_finite() {
                    f64::NAN
                } else if p + m == 0.0 {
                    0.0
                } else {
                    100.0 * (p - m).abs() / (p + m)
                }
            })
            .collect();
        let adx = kernels::wilder(&dx, PERIOD);
        let mut adxr = vec![f64::NAN; n];
        for i in (PERIOD - 1)..n {
            if adx[i].is_finite() && adx[i - (PERIOD - 1)].is_finite() {
                adxr[i] = (adx[i] + adx[i - (PERIOD - 1)]) / 2.0;
            }
        }

        Frame::from_columns(
            input.index().to_vec(),
            vec![
                ("di+", di_plus),
                ("di-", di_minus),
                ("dx", dx),
                ("adx", adx),
                ("adxr", adxr),
            ],
        )
    }
}

impl Indicator for DirectionalMovementIndex {
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
        let di_plus = &self.ti.column("di+").unwrap()[..n];
        let di_minus = &self.ti.column("di-").unwrap()[..n];
        let adxr = &self.ti.column("adxr").unwrap()[..n];
        let trending = matches!(adxr.last(), Some(v) if v.is_finite() && *v >= TREND_FLOOR);
        if !trending {
            return Signal::Hold;
        }
        if signal::crossed_above(di_plus, di_minus) {
            Signal::Buy
        } else if signal::crossed_below(di_plus, di_minus) {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frame(high: &[f64], low: &[f64], close: &[f64]) -> Frame {
        let index = (0..close.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
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

    fn trending_up(n: usize) -> Frame {
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        frame(&high, &low, &close)
    }

    #[test]
    fn needs_full_warmup() {
        let short = trending_up(MIN_ROWS - 1);
        assert!(matches!(
            DirectionalMovementIndex::new(&short, false),
            Err(TtiError::NotEnoughInputData { .. })
        ));
    }

    #[test]
    fn uptrend_reads_plus_di_dominant() {
        let dmi = DirectionalMovementIndex::new(&trending_up(50), false).unwrap();
        let di_plus = dmi.ti_data().column("di+").unwrap();
        let di_minus = dmi.ti_data().column("di-").unwrap();
        let last = di_plus.len() - 1;
        assert!(di_plus[last] > di_minus[last]);
        // every low is higher than the previous, so -DM is always zero
        assert_eq!(di_minus[last], 0.0);
    }

    #[test]
    fn warmup_boundaries() {
        let dmi = DirectionalMovementIndex::new(&trending_up(50), false).unwrap();
        let adx = dmi.ti_data().column("adx").unwrap();
        let adxr = dmi.ti_data().column("adxr").unwrap();
        assert!(adx[2 * PERIOD - 2].is_nan());
        assert!(adx[2 * PERIOD - 1].is_finite());
        assert!(adxr[MIN_ROWS - 2].is_nan());
        assert!(adxr[MIN_ROWS - 1].is_finite());
    }

    #[test]
    fn dx_bounded() {
        let dmi = DirectionalMovementIndex::new(&trending_up(50), false).unwrap();
        for v in dmi.ti_data().column("dx").unwrap() {
            if v.is_finite() {
                assert!((0.0..=100.0).contains(v));
            }
        }
    }

    #[test]
    fn steady_trend_without_fresh_cross_holds() {
        let dmi = DirectionalMovementIndex::new(&trending_up(60), false).unwrap();
        assert_eq!(dmi.signal(), Signal::Hold);
    }
}
