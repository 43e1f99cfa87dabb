//! End-to-end scenarios exercising the catalog and the simulator with
//! literal hand-checked fixtures.

use chrono::NaiveDate;

use tti::indicators::{
    BollingerBands, MaMode, MovingAverage, OnBalanceVolume, ParabolicSar,
    StochasticOscillator,
};
use tti::{Frame, Indicator, Signal, TradingSimulator};

fn dates(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
        .collect()
}

fn ohlc_frame(high: &[f64], low: &[f64], close: &[f64]) -> Frame {
    Frame::from_columns(
        dates(close.len()),
        vec![
            ("high", high.to_vec()),
            ("low", low.to_vec()),
            ("close", close.to_vec()),
        ],
    )
    .unwrap()
}

#[test]
fn obv_three_day_series() {
    let data = Frame::from_columns(
        dates(3),
        vec![
            ("close", vec![10.0, 12.0, 11.0]),
            ("volume", vec![100.0, 200.0, 150.0]),
        ],
    )
    .unwrap();
    let obv = OnBalanceVolume::new(&data, false).unwrap();
    let values = obv.ti_data().column("obv").unwrap();
    assert_eq!(values, &[0.0, 200.0, 50.0]);
    // three rows cannot yet show three monotone changes
    assert_eq!(obv.signal(), Signal::Hold);
}

#[test]
fn flat_simple_moving_average() {
    let data = Frame::from_columns(dates(25), vec![("close", vec![5.0; 25])]).unwrap();
    let ma = MovingAverage::new(&data, 20, MaMode::Simple, false).unwrap();
    let values = ma.ti_data().column("ma").unwrap();
    for value in &values[..19] {
        assert!(value.is_nan());
    }
    for value in &values[19..] {
        assert!((value - 5.0).abs() < 1e-9);
    }
    assert_eq!(ma.signal(), Signal::Hold);
}

#[test]
fn bollinger_upper_band_breakout_sells() {
    let n = 30;
    let mut close = vec![100.0; n];
    close[n - 1] = 200.0;
    let data = Frame::from_columns(dates(n), vec![("close", close)]).unwrap();
    let bb = BollingerBands::new(&data, 20, 2.0, false).unwrap();
    let upper = bb.ti_data().column("upper_band").unwrap();
    let close = bb.input().column("close").unwrap();
    assert!(close[n - 2] < upper[n - 2]);
    assert!(close[n - 1] > upper[n - 1]);
    assert_eq!(bb.signal(), Signal::Sell);
}

#[test]
fn simulator_long_then_short_round_trip() {
    let close = [10.0, 11.0, 9.0, 12.0];
    let signals = [Signal::Hold, Signal::Buy, Signal::Sell, Signal::Hold];
    let mut sim = TradingSimulator::new(&dates(4), &close, None, 1.5).unwrap();
    for signal in signals {
        sim.run_round(signal);
    }
    let ledger = sim.ledger();
    // the long opened at 11 closes at 12; the short opened at 13.5 stays
    // open because 13.5 < 1.5 * 12
    assert!((ledger.earnings[3] - 1.0).abs() < 1e-9);
    assert!((ledger.exposure[3] - 13.5).abs() < 1e-9);
    assert!((ledger.portfolio_value[3] - (-12.0)).abs() < 1e-9);
    assert!((ledger.balance[3] - (-11.0)).abs() < 1e-9);
    let stats = sim.statistics();
    assert_eq!(stats.last_open_long_positions, 0);
    assert_eq!(stats.last_open_short_positions, 1);
    assert_eq!(stats.final_balance, -11.0);
}

#[test]
fn fast_stochastic_oversold_exit_buys() {
    let n = 16;
    let high = vec![110.0; n];
    let low = vec![100.0; n];
    let mut close = vec![101.0; n];
    close[n - 1] = 105.0;
    let so = StochasticOscillator::new(
        &ohlc_frame(&high, &low, &close),
        14,
        1,
        3,
        MaMode::Simple,
        false,
    )
    .unwrap();
    let percent_k = so.ti_data().column("%k").unwrap();
    assert!((percent_k[n - 2] - 10.0).abs() < 1e-9);
    assert!((percent_k[n - 1] - 50.0).abs() < 1e-9);
    assert_eq!(so.signal(), Signal::Buy);
}

#[test]
fn parabolic_sar_bootstrap_and_flip() {
    let high = [10.0, 11.0, 12.0, 10.0];
    let low = [9.0, 10.0, 11.0, 8.0];
    let close = [9.5, 10.5, 11.5, 8.5];
    let sar = ParabolicSar::new(&ohlc_frame(&high, &low, &close), false).unwrap();
    let values = sar.ti_data().column("sar").unwrap();
    // rising second high starts the run long at the first low
    assert!((values[0] - 9.0).abs() < 1e-9);
    assert!((values[1] - 9.0).abs() < 1e-9);
    assert!((values[2] - 9.0).abs() < 1e-9);
    // the low at row 3 pierces the stop, the flip reseeds at the extreme
    assert!((values[3] - 12.0).abs() < 1e-9);
    assert_eq!(sar.signal(), Signal::Sell);
}
