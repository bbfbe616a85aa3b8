//! The conformance check behind every type annotation.
use super::TypeDescriptor;
use crate::value::Value;

/// Whether `value` satisfies `ty`.
///
/// Numeric descriptors follow the widening tower `bool ⊂ int ⊂ float ⊂ complex`,
/// so an `int` argument satisfies a `float` annotation. Containers are checked
/// element by element; classes by walking the base lattice.
pub fn conforms(value: &Value, ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::Any => true,
        TypeDescriptor::NoneType => matches!(value, Value::None),
        TypeDescriptor::Bool => matches!(value, Value::Bool(_)),
        TypeDescriptor::Int => matches!(value, Value::Bool(_) | Value::Int(_)),
        TypeDescriptor::Float => matches!(value, Value::Bool(_) | Value::Int(_) | Value::Float(_)),
        TypeDescriptor::Complex => value.is_numeric(),
        TypeDescriptor::Str => matches!(value, Value::Str(_)),
        TypeDescriptor::List(item) => match value {
            Value::List(items) => items.iter().all(|v| conforms(v, item)),
            _ => false,
        },
        TypeDescriptor::Tuple(types) => match value {
            Value::Tuple(items) => {
                items.len() == types.len() && items.iter().zip(types).all(|(v, t)| conforms(v, t))
            }
            _ => false,
        },
        TypeDescriptor::TupleOf(item) => match value {
            Value::Tuple(items) => items.iter().all(|v| conforms(v, item)),
            _ => false,
        },
        TypeDescriptor::Sequence(item) => match value {
            Value::List(items) | Value::Tuple(items) => items.iter().all(|v| conforms(v, item)),
            // A string is a sequence of one-character strings.
            Value::Str(s) => s.chars().all(|c| conforms(&Value::Str(c.to_string()), item)),
            _ => false,
        },
        TypeDescriptor::Dict(key, val) => match value {
            Value::Dict(pairs) => pairs.iter().all(|(k, v)| conforms(k, key) && conforms(v, val)),
            _ => false,
        },
        TypeDescriptor::Union(members) => members.iter().any(|m| conforms(value, m)),
        TypeDescriptor::Type(inner) => match value {
            Value::Type(t) => is_subtype(t, inner),
            _ => false,
        },
        TypeDescriptor::Array => matches!(value, Value::Array(_)),
        TypeDescriptor::Class(class) => match value {
            Value::Object(obj) => obj.class().is_subclass_of(class),
            _ => false,
        },
    }
}

/// Nominal subtyping between descriptors, used for `Type[...]` annotations.
///
/// Unlike value conformance there is no numeric widening here: `int` is not a
/// subtype of `float`, although `bool` is a subtype of `int`.
pub fn is_subtype(sub: &TypeDescriptor, sup: &TypeDescriptor) -> bool {
    match (sub, sup) {
        (_, TypeDescriptor::Any) => true,
        (TypeDescriptor::Union(members), _) => members.iter().all(|m| is_subtype(m, sup)),
        (_, TypeDescriptor::Union(members)) => members.iter().any(|m| is_subtype(sub, m)),
        (TypeDescriptor::Class(a), TypeDescriptor::Class(b)) => a.is_subclass_of(b),
        (TypeDescriptor::Bool, TypeDescriptor::Int) => true,
        _ => sub == sup,
    }
}
