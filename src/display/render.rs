use crate::spec::{Choice, ChoiceOption, DimensionSize, Shape, Tensor, TypePredicate, Validator};
use crate::type_system::TypeDescriptor;
use crate::validation::Annotation;
use crate::value::{NdArray, Value};
use num_complex::Complex64;
use std::fmt::{self, Display, Formatter, Write};

/// Writes `items` separated by `", "`.
fn write_joined<I>(f: &mut Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: Display,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_float(f: &mut Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(f, "{:?}", x)
    }
}

// Complex parts drop the trailing `.0`: `(4-0.1j)`, not `(4.0-0.1j)`.
fn complex_part(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        "inf".to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{}", x as i64)
    } else {
        format!("{:?}", x)
    }
}

fn write_complex(f: &mut Formatter<'_>, c: Complex64) -> fmt::Result {
    if c.re == 0.0 && c.re.is_sign_positive() {
        let sign = if c.im.is_sign_negative() { "-" } else { "" };
        return write!(f, "{}{}j", sign, complex_part(c.im.abs()));
    }
    let sign = if c.im.is_sign_negative() { '-' } else { '+' };
    let re = if c.re.is_sign_negative() { format!("-{}", complex_part(c.re.abs())) } else { complex_part(c.re) };
    write!(f, "({}{}{}j)", re, sign, complex_part(c.im.abs()))
}

struct Entry<'a>(&'a Value, &'a Value);

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.1)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::Complex(c) => write_complex(f, *c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                f.write_char('[')?;
                write_joined(f, items)?;
                f.write_char(']')
            }
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Dict(pairs) => {
                f.write_char('{')?;
                write_joined(f, pairs.iter().map(|(k, v)| Entry(k, v)))?;
                f.write_char('}')
            }
            Value::Array(array) => write!(f, "{}", array),
            Value::Type(ty) => write!(f, "{}", ty),
            // Objects without a printable form fall back to their class name.
            Value::Object(obj) => match obj.repr() {
                Some(repr) => f.write_str(repr),
                None => write!(f, "<{} object>", obj.class().name()),
            },
        }
    }
}

impl Display for NdArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "array({})", self.to_value())
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Any => f.write_str("Any"),
            TypeDescriptor::NoneType => f.write_str("None"),
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::Int => f.write_str("int"),
            TypeDescriptor::Float => f.write_str("float"),
            TypeDescriptor::Complex => f.write_str("complex"),
            TypeDescriptor::Str => f.write_str("str"),
            TypeDescriptor::List(item) => write!(f, "List[{}]", item),
            TypeDescriptor::Tuple(items) if items.is_empty() => f.write_str("Tuple[()]"),
            TypeDescriptor::Tuple(items) => {
                f.write_str("Tuple[")?;
                write_joined(f, items)?;
                f.write_char(']')
            }
            TypeDescriptor::TupleOf(item) => write!(f, "Tuple[{}, ...]", item),
            TypeDescriptor::Sequence(item) => write!(f, "Sequence[{}]", item),
            TypeDescriptor::Dict(key, value) => write!(f, "Dict[{}, {}]", key, value),
            TypeDescriptor::Union(members) => {
                f.write_str("Union[")?;
                write_joined(f, members)?;
                f.write_char(']')
            }
            TypeDescriptor::Type(inner) if **inner == TypeDescriptor::Any => f.write_str("type"),
            TypeDescriptor::Type(inner) => write!(f, "Type[{}]", inner),
            TypeDescriptor::Array => f.write_str("ndarray"),
            TypeDescriptor::Class(class) => f.write_str(class.name()),
        }
    }
}

impl Display for TypePredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor())
    }
}

impl Display for ChoiceOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceOption::Literal(value) => write!(f, "{}", value),
            ChoiceOption::Type(ty) => write!(f, "{}", ty),
            ChoiceOption::Spec(validator) => write!(f, "{}", validator),
        }
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Choice(")?;
        write_joined(f, self.options())?;
        f.write_char(')')
    }
}

/// One extent of a shape; `*` marks an arbitrary size.
struct Extent(DimensionSize);

impl Display for Extent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.size() {
            Some(size) => write!(f, "{}", size),
            None => f.write_char('*'),
        }
    }
}

impl Display for DimensionSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DimensionSize({})", Extent(*self))
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.dims() {
            None => f.write_str("Shape(...)"),
            Some(dims) => {
                f.write_str("Shape(")?;
                write_joined(f, dims.iter().copied().map(Extent))?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Tensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor[{}, ", self.dtype())?;
        match self.shape().dims() {
            None => f.write_str("...")?,
            Some(dims) => {
                f.write_char('(')?;
                write_joined(f, dims.iter().copied().map(Extent))?;
                if dims.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')?;
            }
        }
        f.write_char(']')
    }
}

impl Display for Validator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Type(v) => write!(f, "{}", v),
            Validator::Choice(v) => write!(f, "{}", v),
            Validator::DimensionSize(v) => write!(f, "{}", v),
            Validator::Shape(v) => write!(f, "{}", v),
            Validator::Tensor(v) => write!(f, "{}", v),
        }
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Unconstrained => f.write_str("Any"),
            Annotation::Type(ty) => write!(f, "{}", ty),
            Annotation::Spec(validator) | Annotation::Cast(validator) => write!(f, "{}", validator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArrayData, Class, DType, Object};
    use crate::{choice, list, tuple};
    use rstest::rstest;

    #[rstest]
    #[case(Value::None, "None")]
    #[case(Value::Bool(true), "True")]
    #[case(Value::Int(-233), "-233")]
    #[case(Value::Float(22.0), "22.0")]
    #[case(Value::Float(0.1), "0.1")]
    #[case(Value::Float(f64::NAN), "nan")]
    #[case(Value::Float(f64::NEG_INFINITY), "-inf")]
    #[case(Value::Complex(Complex64::new(4.0, -0.1)), "(4-0.1j)")]
    #[case(Value::Complex(Complex64::new(1.5, 2.0)), "(1.5+2j)")]
    #[case(Value::Complex(Complex64::new(0.0, 3.0)), "3j")]
    #[case(Value::from("99"), "\"99\"")]
    #[case(Value::from("say \"hi\""), "\"say \\\"hi\\\"\"")]
    #[case(list![1, 2.5], "[1, 2.5]")]
    #[case(tuple![4.0, 4], "(4.0, 4)")]
    #[case(tuple!["xx"], "(\"xx\",)")]
    #[case(tuple![], "()")]
    #[case(Value::Dict(vec![(Value::from("k"), Value::None)]), "{\"k\": None}")]
    #[case(Value::from(TypeDescriptor::Int), "int")]
    fn test_value_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn test_array_display() {
        let matrix = NdArray::from_shape_vec(&[2, 2], ArrayData::Int(vec![1, 2, 3, 4])).unwrap();
        assert_eq!(Value::from(matrix).to_string(), "array([[1, 2], [3, 4]])");
        let scalar = NdArray::scalar(ArrayData::Bool(vec![true])).unwrap();
        assert_eq!(scalar.to_string(), "array(True)");
    }

    #[test]
    fn test_object_display_falls_back_to_class_name() {
        let class = Class::new("Widget");
        assert_eq!(Value::from(Object::new(&class)).to_string(), "<Widget object>");
        assert_eq!(Value::from(Object::with_repr(&class, "Widget(7)")).to_string(), "Widget(7)");
    }

    #[rstest]
    #[case(TypeDescriptor::Union(vec![TypeDescriptor::Str, TypeDescriptor::Float]), "Union[str, float]")]
    #[case(TypeDescriptor::list(TypeDescriptor::Int), "List[int]")]
    #[case(TypeDescriptor::Tuple(vec![TypeDescriptor::Str, TypeDescriptor::Bool]), "Tuple[str, bool]")]
    #[case(TypeDescriptor::tuple_of(TypeDescriptor::Int), "Tuple[int, ...]")]
    #[case(TypeDescriptor::sequence(TypeDescriptor::Float), "Sequence[float]")]
    #[case(TypeDescriptor::dict(TypeDescriptor::Str, TypeDescriptor::Any), "Dict[str, Any]")]
    #[case(TypeDescriptor::type_of(TypeDescriptor::Str), "Type[str]")]
    #[case(TypeDescriptor::type_of(TypeDescriptor::Any), "type")]
    #[case(TypeDescriptor::NoneType, "None")]
    #[case(TypeDescriptor::Array, "ndarray")]
    fn test_type_display(#[case] ty: TypeDescriptor, #[case] expected: &str) {
        assert_eq!(ty.to_string(), expected);
    }

    #[rstest]
    #[case(Validator::from(choice!("xx", TypeDescriptor::Bool).unwrap()), "Choice(\"xx\", bool)")]
    #[case(Validator::from(DimensionSize::arbitrary()), "DimensionSize(*)")]
    #[case(Validator::from(DimensionSize::exact(4)), "DimensionSize(4)")]
    #[case(Validator::from(Shape::fixed([Some(5), None])), "Shape(5, *)")]
    #[case(Validator::from(Shape::arbitrary()), "Shape(...)")]
    #[case(Validator::from(Tensor::vector(DType::Float, Some(2))), "Tensor[float, (2,)]")]
    #[case(Validator::from(Tensor::matrix(DType::Complex, (None, Some(3)))), "Tensor[complex, (*, 3)]")]
    #[case(Validator::from(Tensor::scalar(DType::Bool)), "Tensor[bool, ()]")]
    #[case(Validator::from(Tensor::array(DType::Int, None)), "Tensor[int, ...]")]
    fn test_validator_display(#[case] validator: Validator, #[case] expected: &str) {
        assert_eq!(validator.to_string(), expected);
    }

    #[test]
    fn test_nested_choice_display() {
        let inner = choice!(TypeDescriptor::Str, choice!(1, 2.5).unwrap()).unwrap();
        let outer = choice!(Tensor::vector(DType::Float, Some(2)), inner).unwrap();
        assert_eq!(outer.to_string(), "Choice(Tensor[float, (2,)], Choice(str, Choice(1, 2.5)))");
    }

    #[test]
    fn test_annotation_display() {
        assert_eq!(Annotation::Unconstrained.to_string(), "Any");
        assert_eq!(Annotation::Type(TypeDescriptor::Float).to_string(), "float");
        let cast = Annotation::Cast(Tensor::vector(DType::Int, None).into());
        assert_eq!(cast.to_string(), "Tensor[int, (*,)]");
    }
}
