//! array.rs
//! Canonical numeric n-d array: one flat buffer of a single dtype plus a shape.

use super::Value;
use crate::cast::CastingError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Array extents. Most annotated tensors are rank 4 or below, so shapes stay inline.
pub type Dims = SmallVec<[usize; 4]>;

/// Element types, ordered by safe widening: `Bool < Int < Float < Complex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    Int,
    #[default]
    Float,
    Complex,
}

impl DType {
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int => "int",
            DType::Float => "float",
            DType::Complex => "complex",
        }
    }

    /// Whether every value of `self` is representable in `to` without loss.
    #[inline]
    pub fn can_cast_safely(self, to: DType) -> bool {
        self <= to
    }

    /// The narrowest dtype both operands cast to safely.
    #[inline]
    pub fn promote(self, other: DType) -> DType {
        self.max(other)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat, row-major element storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl ArrayData {
    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::Bool(_) => DType::Bool,
            ArrayData::Int(_) => DType::Int,
            ArrayData::Float(_) => DType::Float,
            ArrayData::Complex(_) => DType::Complex,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::Int(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `i` as a scalar `Value`.
    pub fn get(&self, i: usize) -> Option<Value> {
        match self {
            ArrayData::Bool(v) => v.get(i).map(|&x| Value::Bool(x)),
            ArrayData::Int(v) => v.get(i).map(|&x| Value::Int(x)),
            ArrayData::Float(v) => v.get(i).map(|&x| Value::Float(x)),
            ArrayData::Complex(v) => v.get(i).map(|&x| Value::Complex(x)),
        }
    }

    /// Widens to `to`. Callers guarantee `self.dtype().can_cast_safely(to)`.
    fn widen(&self, to: DType) -> ArrayData {
        match (self, to) {
            (ArrayData::Bool(v), DType::Bool) => ArrayData::Bool(v.clone()),
            (ArrayData::Bool(v), DType::Int) => ArrayData::Int(v.iter().map(|&b| i64::from(b)).collect()),
            (ArrayData::Bool(v), DType::Float) => {
                ArrayData::Float(v.iter().map(|&b| f64::from(u8::from(b))).collect())
            }
            (ArrayData::Bool(v), DType::Complex) => ArrayData::Complex(
                v.iter().map(|&b| Complex64::new(f64::from(u8::from(b)), 0.0)).collect(),
            ),
            (ArrayData::Int(v), DType::Float) => ArrayData::Float(v.iter().map(|&i| i as f64).collect()),
            (ArrayData::Int(v), DType::Complex) => {
                ArrayData::Complex(v.iter().map(|&i| Complex64::new(i as f64, 0.0)).collect())
            }
            (ArrayData::Float(v), DType::Complex) => {
                ArrayData::Complex(v.iter().map(|&f| Complex64::new(f, 0.0)).collect())
            }
            _ => self.clone(),
        }
    }
}

/// The canonical representation numeric arguments are cast into.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Dims,
    data: ArrayData,
}

impl NdArray {
    /// Wraps a flat buffer; its length must equal the product of `shape`.
    pub fn from_shape_vec(shape: &[usize], data: ArrayData) -> Result<Self, CastingError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(CastingError::ShapeMismatch { len: data.len(), shape: shape.to_vec() });
        }
        Ok(Self { shape: Dims::from_slice(shape), data })
    }

    /// A 1-d array.
    pub fn from_vec(data: ArrayData) -> Self {
        let mut shape = Dims::new();
        shape.push(data.len());
        Self { shape, data }
    }

    /// A 0-d array holding one element.
    pub fn scalar(data: ArrayData) -> Result<Self, CastingError> {
        Self::from_shape_vec(&[], data)
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Safe-casting conversion: widening succeeds, narrowing is a `CastingError`.
    pub fn astype(&self, to: DType) -> Result<NdArray, CastingError> {
        let from = self.dtype();
        if !from.can_cast_safely(to) {
            return Err(CastingError::UnsafeCast { from, to });
        }
        Ok(Self { shape: self.shape.clone(), data: self.data.widen(to) })
    }

    /// Builds an array from arbitrarily nested sequences, inferring the dtype.
    ///
    /// Scalars become 0-d arrays, nested lists/tuples/arrays must be
    /// rectangular, and the dtype is the widest element dtype. An empty
    /// sequence carries no elements to infer from and defaults to `float`.
    pub fn from_value(value: &Value) -> Result<NdArray, CastingError> {
        let mut scan = Scan::default();
        let shape = scan.visit(value)?;
        let dtype = scan.dtype.unwrap_or(DType::Float);
        let data = match dtype {
            DType::Bool => ArrayData::Bool(scan.elements.iter().filter_map(as_bool).collect()),
            DType::Int => ArrayData::Int(scan.elements.iter().filter_map(as_int).collect()),
            DType::Float => ArrayData::Float(scan.elements.iter().filter_map(as_float).collect()),
            DType::Complex => {
                ArrayData::Complex(scan.elements.iter().filter_map(Value::as_complex).collect())
            }
        };
        Self::from_shape_vec(&shape, data)
    }

    /// Nested-list form; 0-d arrays become their single scalar.
    pub fn to_value(&self) -> Value {
        fn nest(data: &ArrayData, shape: &[usize], offset: &mut usize) -> Value {
            match shape.split_first() {
                None => {
                    let item = data.get(*offset).unwrap_or(Value::None);
                    *offset += 1;
                    item
                }
                Some((&n, rest)) => Value::List((0..n).map(|_| nest(data, rest, offset)).collect()),
            }
        }
        let mut offset = 0;
        nest(&self.data, &self.shape, &mut offset)
    }
}

/// Accumulates leaf scalars in row-major order while checking rectangularity.
#[derive(Default)]
struct Scan {
    elements: Vec<Value>,
    dtype: Option<DType>,
}

impl Scan {
    fn visit(&mut self, value: &Value) -> Result<Dims, CastingError> {
        if let Some(dtype) = value.scalar_dtype() {
            self.note(dtype);
            self.elements.push(value.clone());
            return Ok(Dims::new());
        }
        match value {
            Value::List(items) | Value::Tuple(items) => {
                let mut inner: Option<Dims> = None;
                for (index, item) in items.iter().enumerate() {
                    let dims = self.visit(item)?;
                    let expected = inner.get_or_insert_with(|| dims.clone());
                    if *expected != dims {
                        return Err(CastingError::Ragged {
                            index,
                            expected: expected.to_vec(),
                            found: dims.to_vec(),
                        });
                    }
                }
                let mut dims = Dims::new();
                dims.push(items.len());
                dims.extend(inner.unwrap_or_default());
                Ok(dims)
            }
            Value::Array(array) => {
                self.note(array.dtype());
                self.elements.extend((0..array.len()).filter_map(|i| array.data.get(i)));
                Ok(array.shape.clone())
            }
            other => Err(CastingError::NonNumeric { type_name: other.type_name().to_string() }),
        }
    }

    fn note(&mut self, dtype: DType) {
        self.dtype = Some(self.dtype.map_or(dtype, |d| d.promote(dtype)));
    }
}

fn as_bool(v: &Value) -> Option<bool> {
    match *v {
        Value::Bool(b) => Some(b),
        _ => None,
    }
}

fn as_int(v: &Value) -> Option<i64> {
    match *v {
        Value::Bool(b) => Some(i64::from(b)),
        Value::Int(i) => Some(i),
        _ => None,
    }
}

fn as_float(v: &Value) -> Option<f64> {
    match *v {
        Value::Bool(b) => Some(f64::from(u8::from(b))),
        Value::Int(i) => Some(i as f64),
        Value::Float(f) => Some(f),
        _ => None,
    }
}
