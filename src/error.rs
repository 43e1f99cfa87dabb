//! Library error types.

/// Top-level error type for tti.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TtiError {
    #[error("wrong type for input parameter {parameter}: expected {expected}, got {actual}")]
    WrongTypeForInputParameter {
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("wrong value for input parameter {parameter}: requires {constraint}, got {actual}")]
    WrongValueForInputParameter {
        parameter: String,
        constraint: String,
        actual: String,
    },

    #[error("invalid input data: {reason}")]
    InvalidInputData { reason: String },

    #[error("not enough input data for {indicator}: need {required} rows, got {actual}")]
    NotEnoughInputData {
        indicator: String,
        required: usize,
        actual: usize,
    },

    #[error("close values not valid for simulation ({argument}): {details}")]
    NotValidInputDataForSimulation { argument: String, details: String },

    #[error("linear regression did not converge over a window of {length} points")]
    NotConverged { length: usize },

    #[error("deprecated entry point {name}: use {replacement} instead")]
    DeprecatedMethod { name: String, replacement: String },
}

impl TtiError {
    /// Shorthand for the common period-must-be-positive failure.
    pub fn bad_period(parameter: &str, actual: usize) -> Self {
        TtiError::WrongValueForInputParameter {
            parameter: parameter.to_string(),
            constraint: "> 0".to_string(),
            actual: actual.to_string(),
        }
    }
}
