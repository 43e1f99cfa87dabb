//! Input series preprocessing.
//!
//! Every indicator constructor funnels its caller-supplied frame through
//! [`validate_input_frame`] before any math runs. The caller's frame is
//! never mutated; validation works on a filtered copy.

use crate::error::TtiError;
use crate::frame::Frame;

/// Validate and prepare a raw input frame for indicator math.
///
/// Steps: normalize column names to lowercase, reject an empty frame,
/// require each listed column, keep only the required columns, sort rows
/// ascending by date (duplicate dates are rejected), optionally fill gaps
/// forward first then backward, and finally reject any remaining
/// non-finite cell.
pub fn validate_input_frame(
    frame: &Frame,
    required_columns: &[&str],
    fill_missing_values: bool,
) -> Result<Frame, TtiError> {
    if frame.is_empty() {
        return Err(TtiError::InvalidInputData {
            reason: "input frame is empty".to_string(),
        });
    }

    let order = sort_order(frame.index())?;
    let index: Vec<_> = order.iter().map(|&i| frame.index()[i]).collect();

    let lowered: Vec<(String, &[f64])> = frame
        .column_names()
        .iter()
        .map(|&name| (name.to_lowercase(), frame.column(name).unwrap()))
        .collect();

    let mut prepared = Frame::with_index(index);
    for &required in required_columns {
        let source = lowered
            .iter()
            .find(|(name, _)| name == required)
            .map(|(_, values)| *values)
            .ok_or_else(|| TtiError::InvalidInputData {
                reason: format!("required column {required} is missing"),
            })?;

        let mut values: Vec<f64> = order.iter().map(|&i| source[i]).collect();
        if fill_missing_values {
            fill_forward_then_backward(&mut values);
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(TtiError::InvalidInputData {
                reason: format!("column {required} holds a non-finite value at row {i}"),
            });
        }
        prepared.push_column(required, values)?;
    }

    Ok(prepared)
}

/// Ascending permutation of the date index; duplicates are an error.
fn sort_order(index: &[chrono::NaiveDate]) -> Result<Vec<usize>, TtiError> {
    let mut order: Vec<usize> = (0..index.len()).collect();
    order.sort_by_key(|&i| index[i]);
    for pair in order.windows(2) {
        if index[pair[0]] == index[pair[1]] {
            return Err(TtiError::InvalidInputData {
                reason: format!("duplicate date {} in index", index[pair[0]]),
            });
        }
    }
    Ok(order)
}

/// Forward-fill then backward-fill in place. Forward first, so an interior
/// gap takes the last known observation; the backward pass only reaches a
/// leading all-NaN prefix.
fn fill_forward_then_backward(values: &mut [f64]) {
    let mut last_seen = f64::NAN;
    for v in values.iter_mut() {
        if v.is_nan() {
            *v = last_seen;
        } else {
            last_seen = *v;
        }
    }
    let mut next_seen = f64::NAN;
    for v in values.iter_mut().rev() {
        if v.is_nan() {
            *v = next_seen;
        } else {
            next_seen = *v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn empty_frame_rejected() {
        let frame = Frame::with_index(vec![]);
        let result = validate_input_frame(&frame, &["close"], false);
        assert!(matches!(result, Err(TtiError::InvalidInputData { .. })));
    }

    #[test]
    fn missing_required_column_rejected() {
        let frame =
            Frame::from_columns(vec![day(1)], vec![("close", vec![1.0])]).unwrap();
        let result = validate_input_frame(&frame, &["close", "volume"], false);
        assert!(matches!(result, Err(TtiError::InvalidInputData { .. })));
    }

    #[test]
    fn column_names_lowercased_and_extra_columns_dropped() {
        let frame = Frame::from_columns(
            vec![day(1), day(2)],
            vec![("Close", vec![1.0, 2.0]), ("turnover", vec![9.0, 9.0])],
        )
        .unwrap();
        let prepared = validate_input_frame(&frame, &["close"], false).unwrap();
        assert_eq!(prepared.column_names(), vec!["close"]);
        assert_eq!(prepared.column("close").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn rows_sorted_by_date() {
        let frame = Frame::from_columns(
            vec![day(3), day(1), day(2)],
            vec![("close", vec![3.0, 1.0, 2.0])],
        )
        .unwrap();
        let prepared = validate_input_frame(&frame, &["close"], false).unwrap();
        assert_eq!(prepared.index(), &[day(1), day(2), day(3)]);
        assert_eq!(prepared.column("close").unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn duplicate_dates_rejected() {
        let frame = Frame::from_columns(
            vec![day(1), day(1)],
            vec![("close", vec![1.0, 2.0])],
        )
        .unwrap();
        let result = validate_input_frame(&frame, &["close"], false);
        assert!(matches!(result, Err(TtiError::InvalidInputData { .. })));
    }

    #[test]
    fn interior_gap_takes_preceding_value() {
        let frame = Frame::from_columns(
            vec![day(1), day(2), day(3)],
            vec![("close", vec![1.0, f64::NAN, 3.0])],
        )
        .unwrap();
        let prepared = validate_input_frame(&frame, &["close"], true).unwrap();
        assert_eq!(prepared.column("close").unwrap(), &[1.0, 1.0, 3.0]);
    }

    #[test]
    fn leading_gap_takes_first_observation() {
        let frame = Frame::from_columns(
            vec![day(1), day(2), day(3)],
            vec![("close", vec![f64::NAN, 2.0, 3.0])],
        )
        .unwrap();
        let prepared = validate_input_frame(&frame, &["close"], true).unwrap();
        assert_eq!(prepared.column("close").unwrap(), &[2.0, 2.0, 3.0]);
    }

    #[test]
    fn unfilled_nan_rejected() {
        let frame = Frame::from_columns(
            vec![day(1), day(2)],
            vec![("close", vec![1.0, f64::NAN])],
        )
        .unwrap();
        let result = validate_input_frame(&frame, &["close"], false);
        assert!(matches!(result, Err(TtiError::InvalidInputData { .. })));
    }

    #[test]
    fn idempotent() {
        let frame = Frame::from_columns(
            vec![day(2), day(1)],
            vec![("close", vec![2.0, f64::NAN])],
        )
        .unwrap();
        let once = validate_input_frame(&frame, &["close"], true).unwrap();
        let twice = validate_input_frame(&once, &["close"], true).unwrap();
        assert_eq!(once, twice);
    }
}
