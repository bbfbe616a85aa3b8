//! Numeric tensor validator: element dtype plus shape.
use super::{Shape, Spec};
use crate::cast::{self, CastResult};
use crate::value::{DType, NdArray, Value};
use tracing::trace;

/// Valid iff the value safe-casts to an array of `dtype` whose shape
/// satisfies `shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tensor {
    dtype: DType,
    shape: Shape,
}

impl Tensor {
    pub fn new(dtype: DType, shape: Shape) -> Self {
        Self { dtype, shape }
    }

    /// A 0-d tensor.
    pub fn scalar(dtype: DType) -> Self {
        Self::new(dtype, Shape::from_dimensions(Vec::new()))
    }

    pub fn vector(dtype: DType, length: Option<usize>) -> Self {
        Self::new(dtype, Shape::fixed([length]))
    }

    pub fn matrix(dtype: DType, (rows, cols): (Option<usize>, Option<usize>)) -> Self {
        Self::new(dtype, Shape::fixed([rows, cols]))
    }

    /// A tensor of fixed rank with arbitrary extents, or of any rank.
    pub fn array(dtype: DType, ndim: Option<usize>) -> Self {
        Self::new(dtype, ndim.map_or_else(Shape::arbitrary, Shape::ndim))
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn check(&self, array: &NdArray) -> bool {
        self.shape.accepts(array.shape())
    }
}

impl Spec for Tensor {
    fn type_conforms(&self, value: &Value) -> bool {
        cast::array(value, self.dtype).is_ok()
    }

    fn value_conforms(&self, value: &Value) -> bool {
        cast::array(value, self.dtype).map_or(false, |array| self.check(&array))
    }

    fn validate(&self, value: &Value) -> bool {
        match cast::array(value, self.dtype) {
            Ok(array) => self.check(&array),
            Err(cause) => {
                trace!(dtype = %self.dtype, %cause, "tensor cast failed");
                false
            }
        }
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        cast::array(value, self.dtype).map(Value::Array)
    }
}

/// `Tensor::scalar` shorthand.
pub fn scalar(dtype: DType) -> Tensor {
    Tensor::scalar(dtype)
}

/// `Tensor::vector` shorthand.
pub fn vector(dtype: DType, length: Option<usize>) -> Tensor {
    Tensor::vector(dtype, length)
}

/// `Tensor::matrix` shorthand.
pub fn matrix(dtype: DType, shape: (Option<usize>, Option<usize>)) -> Tensor {
    Tensor::matrix(dtype, shape)
}

/// `Tensor::array` shorthand.
pub fn array(dtype: DType, ndim: Option<usize>) -> Tensor {
    Tensor::array(dtype, ndim)
}
