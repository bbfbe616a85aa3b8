//! The casting protocol: normalises heterogeneous inputs into the canonical
//! representation a validator checks against.
//!
//! Every function here is pure. Inputs are borrowed and never modified, and
//! nothing is cached between calls.

pub use self::error::CastingError;

use crate::value::{DType, Dims, NdArray, Value};

mod error;

/// Either the canonical value or the reason it could not be produced.
pub type CastResult<T> = Result<T, CastingError>;

/// Casts a single dimension size.
///
/// Permissive of any numeric value whose fractional part is zero: `4`,
/// `4.0` and `true` all cast, `4.2` does not.
pub fn dimension_size(value: &Value) -> CastResult<usize> {
    match *value {
        Value::Bool(b) => Ok(usize::from(b)),
        Value::Int(i) => non_negative(i),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if f < 0.0 {
                Err(CastingError::NegativeDimension { value: f as i64 })
            } else if f >= usize::MAX as f64 {
                // `usize::MAX as f64` rounds up, so this bound is exclusive.
                Err(CastingError::OutOfRange { value: f })
            } else {
                Ok(f as usize)
            }
        }
        Value::Float(f) => Err(CastingError::Fractional { value: f }),
        _ => Err(CastingError::Incompatible {
            type_name: value.type_name().to_string(),
            target: "a dimension size",
        }),
    }
}

/// The integer-typed elements of a shape-like value, in order.
///
/// Accepts lists, tuples and 1-d `int`/`bool` arrays. Unlike
/// [`dimension_size`], integral floats are rejected: shape elements must
/// already be integers.
pub fn shape_elements(value: &Value) -> CastResult<Vec<Value>> {
    scan_shape(value, |item, _| item.clone())
}

/// Casts a shape-like value to its canonical extents.
pub fn shape(value: &Value) -> CastResult<Dims> {
    scan_shape(value, |_, extent| extent).map(Dims::from_vec)
}

/// Checks every element of a shape-like value once, mapping each checked
/// element and its extent through `each`.
fn scan_shape<T>(value: &Value, mut each: impl FnMut(&Value, usize) -> T) -> CastResult<Vec<T>> {
    let mut visit = |index: usize, item: &Value| integer_element(index, item).map(|extent| each(item, extent));
    match value {
        Value::List(items) | Value::Tuple(items) => {
            items.iter().enumerate().map(|(index, item)| visit(index, item)).collect()
        }
        Value::Array(array) if array.ndim() == 1 && array.dtype() <= DType::Int => (0..array.len())
            .filter_map(|i| array.data().get(i))
            .enumerate()
            .map(|(index, item)| visit(index, &item))
            .collect(),
        _ => Err(CastingError::Incompatible {
            type_name: value.type_name().to_string(),
            target: "a shape",
        }),
    }
}

/// Casts a one-shot sequence of elements to a shape.
pub fn shape_from_iter<I>(elements: I) -> CastResult<Dims>
where
    I: IntoIterator<Item = Value>,
{
    elements
        .into_iter()
        .enumerate()
        .map(|(index, item)| integer_element(index, &item))
        .collect()
}

/// Casts any scalar, nested sequence, or array to an array of `dtype`
/// using safe casting: widening succeeds, narrowing fails.
pub fn array(value: &Value, dtype: DType) -> CastResult<NdArray> {
    match value {
        Value::Array(existing) => existing.astype(dtype),
        other => NdArray::from_value(other)?.astype(dtype),
    }
}

fn integer_element(index: usize, item: &Value) -> CastResult<usize> {
    match *item {
        Value::Bool(b) => Ok(usize::from(b)),
        Value::Int(i) => non_negative(i),
        _ => Err(CastingError::NonIntegerElement { index, type_name: item.type_name().to_string() }),
    }
}

fn non_negative(i: i64) -> CastResult<usize> {
    usize::try_from(i).map_err(|_| CastingError::NegativeDimension { value: i })
}
