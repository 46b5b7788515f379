use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("input series is empty")]
    EmptySeries,
    #[error("length mismatch: {field} has {actual} samples, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("timestamp at index {index} is non-finite: {value}")]
    NonFiniteTime { index: usize, value: f64 },
    #[error("timestamps must be strictly increasing: t[{index}] = {next} after {prev}")]
    NonIncreasingTime { index: usize, prev: f64, next: f64 },
    #[error("weight at index {index} is outside [0, 1]: {value}")]
    InvalidWeight { index: usize, value: f64 },
    #[error("no samples qualify for range estimation (w >= {w_critical})")]
    EmptyQualifiedSubset { w_critical: f64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("missing timestamps")]
    MissingTimes,
    #[error("missing values")]
    MissingValues,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
