//! Dimension-size and shape validators.
use super::Spec;
use crate::cast::{self, CastResult};
use crate::value::Value;

/// A single array extent: either a fixed size or arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DimensionSize {
    size: Option<usize>,
}

impl DimensionSize {
    pub fn new(size: Option<usize>) -> Self {
        Self { size }
    }

    pub fn arbitrary() -> Self {
        Self { size: None }
    }

    pub fn exact(size: usize) -> Self {
        Self { size: Some(size) }
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn is_arbitrary(&self) -> bool {
        self.size.is_none()
    }

    /// Whether an already-canonical extent satisfies the constraint.
    #[inline]
    pub fn accepts(&self, extent: usize) -> bool {
        self.size.map_or(true, |size| size == extent)
    }

    /// Sentence form used in documentation and reports.
    pub fn describe(&self) -> String {
        match self.size {
            None => "Array dimension size arbitrary.".to_string(),
            Some(size) => format!("Array dimension size {size}."),
        }
    }
}

impl Spec for DimensionSize {
    // Booleans coerce to 0/1 but only count as sizes when no size is fixed.
    fn type_conforms(&self, value: &Value) -> bool {
        match value {
            Value::Bool(_) => self.size.is_none(),
            other => cast::dimension_size(other).is_ok(),
        }
    }

    fn value_conforms(&self, value: &Value) -> bool {
        match self.size {
            None => true,
            Some(size) => cast::dimension_size(value).map_or(false, |extent| extent == size),
        }
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        cast::dimension_size(value).map(|extent| Value::Int(extent as i64))
    }
}

/// An ordered sequence of dimension sizes, or an arbitrary shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Option<Vec<DimensionSize>>,
}

impl Shape {
    /// `None` is an arbitrary shape; `Some` fixes the rank, with `None`
    /// entries marking arbitrary extents.
    pub fn new(dims: Option<Vec<Option<usize>>>) -> Self {
        Self { dims: dims.map(|d| d.into_iter().map(DimensionSize::new).collect()) }
    }

    pub fn arbitrary() -> Self {
        Self { dims: None }
    }

    pub fn fixed<I>(dims: I) -> Self
    where
        I: IntoIterator<Item = Option<usize>>,
    {
        Self { dims: Some(dims.into_iter().map(DimensionSize::new).collect()) }
    }

    /// A shape of rank `ndim` with every extent arbitrary.
    pub fn ndim(ndim: usize) -> Self {
        Self { dims: Some(vec![DimensionSize::arbitrary(); ndim]) }
    }

    pub fn from_dimensions(dims: Vec<DimensionSize>) -> Self {
        Self { dims: Some(dims) }
    }

    pub fn dims(&self) -> Option<&[DimensionSize]> {
        self.dims.as_deref()
    }

    pub fn is_arbitrary(&self) -> bool {
        self.dims.is_none()
    }

    /// Whether already-canonical extents satisfy the constraint.
    pub fn accepts(&self, extents: &[usize]) -> bool {
        match &self.dims {
            None => true,
            Some(dims) => {
                dims.len() == extents.len() && dims.iter().zip(extents).all(|(d, &e)| d.accepts(e))
            }
        }
    }

    fn elements_conform(&self, elements: &[Value]) -> bool {
        match &self.dims {
            None => true,
            Some(dims) => {
                dims.len() == elements.len() && dims.iter().zip(elements).all(|(d, e)| d.validate(e))
            }
        }
    }
}

impl Spec for Shape {
    fn type_conforms(&self, value: &Value) -> bool {
        cast::shape_elements(value).is_ok()
    }

    fn value_conforms(&self, value: &Value) -> bool {
        cast::shape_elements(value).map_or(false, |elements| self.elements_conform(&elements))
    }

    fn validate(&self, value: &Value) -> bool {
        match cast::shape_elements(value) {
            Ok(elements) => self.elements_conform(&elements),
            Err(_) => false,
        }
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        let dims = cast::shape(value)?;
        Ok(Value::Tuple(dims.iter().map(|&d| Value::Int(d as i64)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArrayData, NdArray};
    use crate::{list, tuple};
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("not a dimspec"), false, false)]
    #[case(Value::None, false, false)]
    #[case(Value::Float(4.2), false, false)]
    #[case(Value::from(crate::type_system::TypeDescriptor::Int), false, false)]
    #[case(Value::Int(4), true, true)]
    #[case(Value::Float(4.0), true, true)]
    #[case(Value::Int(42098507180), true, false)]
    #[case(Value::Bool(false), true, false)]
    #[case(Value::Bool(true), true, false)]
    fn test_dimension_size(#[case] value: Value, #[case] arbitrary: bool, #[case] four: bool) {
        assert_eq!(DimensionSize::arbitrary().validate(&value), arbitrary);
        assert_eq!(DimensionSize::exact(4).validate(&value), four);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn test_fixed_size_rejects_bools_even_when_equal(#[case] size: usize) {
        let dim = DimensionSize::exact(size);
        assert!(!dim.validate(&Value::Bool(size == 1)));
        assert!(dim.validate(&Value::Int(size as i64)));
    }

    #[test]
    fn test_huge_float_never_matches_a_size() {
        let huge = Value::Float(1e30);
        assert!(!DimensionSize::exact(usize::MAX).validate(&huge));
        assert!(!DimensionSize::arbitrary().validate(&huge));
    }

    #[test]
    fn test_describe() {
        assert_eq!(DimensionSize::arbitrary().describe(), "Array dimension size arbitrary.");
        assert_eq!(DimensionSize::exact(4).describe(), "Array dimension size 4.");
    }

    fn shape_samples() -> Vec<Value> {
        vec![
            Value::from("not a shapespec"),
            tuple![4, "4"],
            tuple![4, Value::None],
            tuple![Value::None],
            tuple![],
            tuple![4],
            tuple![5, 4],
            tuple![5, 0],
            tuple![5, false],
            tuple![5, 42098507180i64],
            tuple![5, 4, 0, 9],
        ]
    }

    // Expected outcome for each entry of `shape_samples()`, in order.
    #[rstest]
    #[case(Shape::arbitrary(), [false, false, false, false, true, true, true, true, true, true, true])]
    #[case(Shape::fixed([Some(5), Some(4)]), [false, false, false, false, false, false, true, false, false, false, false])]
    #[case(Shape::fixed([Some(5), None]), [false, false, false, false, false, false, true, true, true, true, false])]
    fn test_shape(#[case] shape: Shape, #[case] expected: [bool; 11]) {
        for (value, want) in shape_samples().iter().zip(expected) {
            assert_eq!(shape.validate(value), want, "{:?} against {:?}", value, shape);
        }
    }

    #[test]
    fn test_non_tuple_sequences() {
        let shape = Shape::arbitrary();
        assert!(!shape.validate(&list!["one", "love"]));
        assert!(shape.validate(&list![1, 3]));
        assert!(shape.validate(&Value::from(NdArray::from_vec(ArrayData::Int(vec![1, 3])))));
    }

    #[test]
    fn test_shape_cast_is_canonical_tuple() {
        let shape = Shape::fixed([Some(2), None]);
        assert_eq!(shape.cast(&list![2, true]), Ok(tuple![2, 1]));
        assert!(shape.cast(&tuple![2.0, 3]).is_err());
    }

    #[test]
    fn test_ndim_shape() {
        let shape = Shape::ndim(2);
        assert!(shape.accepts(&[3, 7]));
        assert!(!shape.accepts(&[3]));
        assert!(!shape.accepts(&[3, 7, 1]));
    }

    proptest! {
        #[test]
        fn prop_arbitrary_shape_accepts_integer_sequences(
            dims in proptest::collection::vec(0i64..10_000, 0..8),
        ) {
            let value = Value::Tuple(dims.into_iter().map(Value::Int).collect());
            prop_assert!(Shape::arbitrary().validate(&value));
        }

        #[test]
        fn prop_arbitrary_shape_rejects_non_integer_element(
            dims in proptest::collection::vec(0i64..10_000, 0..8),
            at in any::<proptest::sample::Index>(),
            junk in prop_oneof![Just(Value::None), Just(Value::Float(1.0)), Just(Value::from("4"))],
        ) {
            let mut items: Vec<Value> = dims.into_iter().map(Value::Int).collect();
            let at = at.index(items.len() + 1);
            items.insert(at, junk);
            prop_assert!(!Shape::arbitrary().validate(&Value::Tuple(items)));
        }

        #[test]
        fn prop_rank_mismatch_is_invalid(
            spec in proptest::collection::vec(proptest::option::of(0usize..8), 0..5),
            dims in proptest::collection::vec(0i64..8, 0..5),
        ) {
            prop_assume!(spec.len() != dims.len());
            let value = Value::Tuple(dims.into_iter().map(Value::Int).collect());
            prop_assert!(!Shape::fixed(spec).validate(&value));
        }
    }
}
