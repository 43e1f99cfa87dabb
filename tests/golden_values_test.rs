//! Per-row golden values for every catalog indicator on a shared sample
//! dataset, pinned to four decimal places.
//!
//! Each fixture under `tests/golden/` holds the expected output columns,
//! row by row, with `NaN` marking warmup cells. The sample dataset below
//! must stay in sync with the fixture generator.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use tti::Frame;
use tti::registry::{Params, build_indicator, indicator_names};

// fixtures store values rounded to four decimals, so half a unit in the
// last place bounds the agreement
const TOLERANCE: f64 = 5.1e-5;

fn sample() -> Frame {
    let n = 90;
    let index = (0..n)
        .map(|i| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64))
        .collect();
    let close: Vec<f64> = (0..n)
        .map(|i| 100.0 + (((i * 73) % 97) as f64 - 48.0) * 0.25)
        .collect();
    let open: Vec<f64> = (0..n)
        .map(|i| close[i] - (((i * 31) % 11) as f64 - 5.0) * 0.2)
        .collect();
    let high: Vec<f64> = (0..n)
        .map(|i| close[i].max(open[i]) + ((i * 13) % 7) as f64 * 0.4 + 0.3)
        .collect();
    let low: Vec<f64> = (0..n)
        .map(|i| close[i].min(open[i]) - ((i * 19) % 5) as f64 * 0.3 - 0.2)
        .collect();
    let volume: Vec<f64> = (0..n)
        .map(|i| 1000.0 + ((i * 157) % 211) as f64 * 25.0)
        .collect();
    Frame::from_columns(
        index,
        vec![
            ("open", open),
            ("high", high),
            ("low", low),
            ("close", close),
            ("volume", volume),
        ],
    )
    .unwrap()
}

struct Golden {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

fn load_golden(name: &str) -> Golden {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(format!("{name}.csv"));
    let text =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_else(|| panic!("{name}: empty fixture"));
    let columns: Vec<String> = header.split(',').skip(1).map(str::to_string).collect();
    let rows: Vec<Vec<f64>> = lines
        .map(|line| {
            line.split(',')
                .skip(1)
                .map(|cell| {
                    if cell == "NaN" {
                        f64::NAN
                    } else {
                        cell.parse()
                            .unwrap_or_else(|e| panic!("{name}: bad cell {cell:?}: {e}"))
                    }
                })
                .collect()
        })
        .collect();
    Golden { columns, rows }
}

#[test]
fn every_indicator_matches_its_golden_fixture() {
    let data = sample();
    for name in indicator_names() {
        let indicator = build_indicator(name, &data, &Params::new(), false)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        let golden = load_golden(name);
        let ti = indicator.ti_data();
        assert_eq!(ti.column_names(), golden.columns, "{name}: column layout");
        assert_eq!(ti.len(), golden.rows.len(), "{name}: row count");
        for (position, column) in golden.columns.iter().enumerate() {
            let actual = ti.column(column).unwrap();
            for (row, cells) in golden.rows.iter().enumerate() {
                let want = cells[position];
                let got = actual[row];
                if want.is_nan() {
                    assert!(
                        got.is_nan(),
                        "{name}.{column} row {row}: expected NaN, got {got}"
                    );
                } else {
                    assert!(
                        (got - want).abs() <= TOLERANCE,
                        "{name}.{column} row {row}: expected {want}, got {got}"
                    );
                }
            }
        }
    }
}

#[test]
fn every_catalog_entry_carries_a_fixture() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    for name in indicator_names() {
        assert!(
            dir.join(format!("{name}.csv")).is_file(),
            "missing fixture for {name}"
        );
    }
}
