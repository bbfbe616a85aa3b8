//! Defines the error types for the casting module.
use crate::value::DType;
use thiserror::Error;

/// Why a value could not be normalised into a canonical representation.
///
/// Casting failures are an expected outcome: validators turn them into a
/// plain "invalid" verdict and never let them escape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CastingError {
    #[error("a value of type '{type_name}' cannot be read as {target}")]
    Incompatible { type_name: String, target: &'static str },
    #[error("element {index} has type '{type_name}', expected an integer")]
    NonIntegerElement { index: usize, type_name: String },
    #[error("{value} has a fractional part and is not a dimension size")]
    Fractional { value: f64 },
    #[error("{value} is too large to be a dimension size")]
    OutOfRange { value: f64 },
    #[error("dimension size {value} is negative")]
    NegativeDimension { value: i64 },
    #[error("sequence is ragged: element {index} has shape {found:?}, expected {expected:?}")]
    Ragged { index: usize, expected: Vec<usize>, found: Vec<usize> },
    #[error("a value of type '{type_name}' is not numeric")]
    NonNumeric { type_name: String },
    #[error("cannot safely cast array from {from} to {to}")]
    UnsafeCast { from: DType, to: DType },
    #[error("buffer of {len} elements does not fill shape {shape:?}")]
    ShapeMismatch { len: usize, shape: Vec<usize> },
}
