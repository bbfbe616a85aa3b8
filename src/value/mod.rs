//! The dynamic value model that validators inspect.
//!
//! Arguments arrive as `Value`s: a tagged enum covering the scalar, sequence,
//! mapping, array and nominal-object shapes a call site can pass. Validators
//! never mutate a `Value`; casting produces new ones.

use crate::type_system::TypeDescriptor;
use num_complex::Complex64;
use std::sync::Arc;

pub mod array;

pub use array::{ArrayData, DType, Dims, NdArray};

/// A nominal class with an ordered list of base classes.
///
/// Classes are compared by identity, so two distinct classes that happen to
/// share a name are unrelated.
#[derive(Debug)]
pub struct Class {
    name: String,
    bases: Vec<Arc<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::with_bases(name, Vec::new())
    }

    pub fn with_bases(name: impl Into<String>, bases: Vec<Arc<Class>>) -> Arc<Self> {
        Arc::new(Self { name: name.into(), bases })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<Class>] {
        &self.bases
    }

    /// Whether `self` is `other` or inherits from it through any base.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        std::ptr::eq(self, other) || self.bases.iter().any(|b| b.is_subclass_of(other))
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// An instance of a nominal class.
///
/// Cloning an `Object` yields another handle to the same instance.
#[derive(Debug, Clone)]
pub struct Object(Arc<ObjectData>);

#[derive(Debug)]
struct ObjectData {
    class: Arc<Class>,
    repr: Option<String>,
}

impl Object {
    /// An instance without a printable form.
    pub fn new(class: &Arc<Class>) -> Self {
        Self(Arc::new(ObjectData { class: Arc::clone(class), repr: None }))
    }

    pub fn with_repr(class: &Arc<Class>, repr: impl Into<String>) -> Self {
        Self(Arc::new(ObjectData { class: Arc::clone(class), repr: Some(repr.into()) }))
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.0.class
    }

    pub fn repr(&self) -> Option<&str> {
        self.0.repr.as_deref()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A call-time argument, default value, or option literal.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Insertion-ordered key/value pairs.
    Dict(Vec<(Value, Value)>),
    Array(NdArray),
    /// A type used as a value (e.g. passed as an option or argument).
    Type(TypeDescriptor),
    Object(Object),
}

impl Value {
    /// The runtime type name used in error reports.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Array(_) => "ndarray",
            Value::Type(_) => "type",
            Value::Object(obj) => obj.class().name(),
        }
    }

    /// The numeric dtype of a scalar, if it is one.
    pub fn scalar_dtype(&self) -> Option<DType> {
        match self {
            Value::Bool(_) => Some(DType::Bool),
            Value::Int(_) => Some(DType::Int),
            Value::Float(_) => Some(DType::Float),
            Value::Complex(_) => Some(DType::Complex),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.scalar_dtype().is_some()
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match *self {
            Value::Bool(b) => Some(Complex64::new(f64::from(u8::from(b)), 0.0)),
            Value::Int(i) => Some(Complex64::new(i as f64, 0.0)),
            Value::Float(f) => Some(Complex64::new(f, 0.0)),
            Value::Complex(c) => Some(c),
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Bool(b) => Some(i64::from(b)),
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The elements of a list or tuple.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

/// Exact comparison of an integer with a real or complex number.
///
/// `None` when `other` is neither a float nor a complex.
fn integer_eq(i: i64, other: &Value) -> Option<bool> {
    // `i64::MIN as f64` is exact; `i64::MAX as f64` rounds up to 2^63.
    let exact = |f: f64| f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 && f as i64 == i;
    match *other {
        Value::Float(f) => Some(exact(f)),
        Value::Complex(c) => Some(c.im == 0.0 && exact(c.re)),
        _ => None,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
            return a == b;
        }
        if let Some(eq) = self.as_integer().and_then(|i| integer_eq(i, other)) {
            return eq;
        }
        if let Some(eq) = other.as_integer().and_then(|i| integer_eq(i, self)) {
            return eq;
        }
        if let (Some(a), Some(b)) = (self.as_complex(), other.as_complex()) {
            return a == b;
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.iter().any(|(bk, bv)| k == bk && v == bv))
            }
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Int(v) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Int(i64::from(v)) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}

impl From<Complex64> for Value {
    fn from(v: Complex64) -> Self { Value::Complex(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Str(v.to_string()) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::Str(v) }
}

impl From<NdArray> for Value {
    fn from(v: NdArray) -> Self { Value::Array(v) }
}

impl From<TypeDescriptor> for Value {
    fn from(v: TypeDescriptor) -> Self { Value::Type(v) }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self { Value::Object(v) }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self { Value::List(v) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX and non-integral numbers
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Dict(
                map.into_iter().map(|(k, v)| (Value::Str(k), Value::from(v))).collect(),
            ),
        }
    }
}

/// Builds a `Value::List`, converting each element with `Value::from`.
#[macro_export]
macro_rules! list {
    ($($item:expr),* $(,)?) => {
        $crate::value::Value::List(vec![$($crate::value::Value::from($item)),*])
    };
}

/// Builds a `Value::Tuple`, converting each element with `Value::from`.
#[macro_export]
macro_rules! tuple {
    ($($item:expr),* $(,)?) => {
        $crate::value::Value::Tuple(vec![$($crate::value::Value::from($item)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(true), Value::Int(1))]
    #[case(Value::Int(1), Value::Float(1.0))]
    #[case(Value::Bool(false), Value::Complex(Complex64::new(0.0, 0.0)))]
    #[case(Value::Int(9_007_199_254_740_992), Value::Float(9_007_199_254_740_992.0))]
    #[case(Value::Int(i64::MIN), Value::Float(-9_223_372_036_854_775_808.0))]
    #[case(list![1, 2], list![1.0, 2.0])]
    #[case(Value::from("xx"), Value::from("xx"))]
    fn test_loose_numeric_equality(#[case] a: Value, #[case] b: Value) {
        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[rstest]
    #[case(Value::Int(9_007_199_254_740_993), Value::Float(9_007_199_254_740_992.0))]
    #[case(Value::Int(i64::MAX), Value::Float(9_223_372_036_854_775_808.0))]
    #[case(Value::Int(3), Value::Complex(Complex64::new(3.0, 1.0)))]
    #[case(list![1, 2], tuple![1, 2])]
    #[case(Value::Int(2), Value::from("2"))]
    #[case(Value::None, Value::Bool(false))]
    #[case(Value::Float(f64::NAN), Value::Float(f64::NAN))]
    fn test_values_not_equal(#[case] a: Value, #[case] b: Value) {
        assert_ne!(a, b);
    }

    #[test]
    fn test_dict_equality_ignores_order() {
        let a = Value::Dict(vec![(Value::from("a"), Value::Int(1)), (Value::from("b"), Value::Int(2))]);
        let b = Value::Dict(vec![(Value::from("b"), Value::Int(2)), (Value::from("a"), Value::Int(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_class_lattice() {
        let a = Class::new("A");
        let b = Class::new("B");
        let c = Class::with_bases("C", vec![Arc::clone(&a)]);
        let d = Class::with_bases("D", vec![Arc::clone(&b), Arc::clone(&c)]);

        assert!(d.is_subclass_of(&a));
        assert!(d.is_subclass_of(&b));
        assert!(d.is_subclass_of(&c));
        assert!(!c.is_subclass_of(&b));
        // Same name, different class.
        assert!(!Class::new("A").is_subclass_of(&a));
    }

    #[test]
    fn test_object_identity() {
        let class = Class::new("Widget");
        let first = Object::new(&class);
        let alias = first.clone();
        assert_eq!(Value::from(first.clone()), Value::from(alias));
        assert_ne!(Value::from(first), Value::from(Object::new(&class)));
    }

    #[test]
    fn test_type_names() {
        let class = Class::new("Widget");
        assert_eq!(Value::None.type_name(), "NoneType");
        assert_eq!(tuple![1].type_name(), "tuple");
        assert_eq!(Value::from(TypeDescriptor::Int).type_name(), "type");
        assert_eq!(Value::from(Object::new(&class)).type_name(), "Widget");
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"shape": [2, 3], "scale": 0.5, "name": null}"#).unwrap();
        let value = Value::from(json);
        let Value::Dict(pairs) = value else { panic!("expected a dict") };
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&(Value::from("shape"), list![2, 3])));
        assert!(pairs.contains(&(Value::from("scale"), Value::Float(0.5))));
        assert!(pairs.contains(&(Value::from("name"), Value::None)));
    }
}
