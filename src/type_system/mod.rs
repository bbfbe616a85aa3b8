//! The structural type predicate.
//!
//! A `TypeDescriptor` describes the runtime type an argument must have; the
//! `conforms` check answers whether a `Value` satisfies it. This is the leaf
//! check every validator falls back to.

// Publicly export the primary components for use by other modules.
pub use self::checker::{conforms, is_subtype};

use crate::spec::ConfigError;
use crate::value::Class;
use std::sync::Arc;

// --- MODULE DECLARATIONS ---
mod checker;

/// A type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Matches every value.
    Any,
    NoneType,
    Bool,
    /// `bool` values also conform.
    Int,
    /// `int` and `bool` values also conform.
    Float,
    /// Every real number also conforms.
    Complex,
    Str,
    /// A list whose elements all conform.
    List(Box<TypeDescriptor>),
    /// A tuple of exactly these element types.
    Tuple(Vec<TypeDescriptor>),
    /// A tuple of any length whose elements all conform.
    TupleOf(Box<TypeDescriptor>),
    /// A list, tuple, or string whose elements all conform.
    Sequence(Box<TypeDescriptor>),
    Dict(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Union(Vec<TypeDescriptor>),
    /// A type value that is a subtype of the inner descriptor.
    Type(Box<TypeDescriptor>),
    /// Any numeric array.
    Array,
    /// Instances of the class or of any subclass.
    Class(Arc<Class>),
}

impl TypeDescriptor {
    pub fn list(item: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(item))
    }

    pub fn tuple_of(item: TypeDescriptor) -> Self {
        TypeDescriptor::TupleOf(Box::new(item))
    }

    pub fn sequence(item: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(item))
    }

    pub fn dict(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Dict(Box::new(key), Box::new(value))
    }

    pub fn type_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Type(Box::new(inner))
    }

    pub fn class(class: &Arc<Class>) -> Self {
        TypeDescriptor::Class(Arc::clone(class))
    }

    /// Rejects descriptors that cannot describe any check, such as an empty
    /// `Union`. Constructors call this so a malformed annotation fails when the
    /// validator is built rather than on some later call.
    pub fn check_well_formed(&self) -> Result<(), ConfigError> {
        match self {
            TypeDescriptor::Union(members) => {
                if members.is_empty() {
                    return Err(ConfigError::EmptyUnion);
                }
                members.iter().try_for_each(TypeDescriptor::check_well_formed)
            }
            TypeDescriptor::Tuple(items) => items.iter().try_for_each(TypeDescriptor::check_well_formed),
            TypeDescriptor::List(inner)
            | TypeDescriptor::TupleOf(inner)
            | TypeDescriptor::Sequence(inner)
            | TypeDescriptor::Type(inner) => inner.check_well_formed(),
            TypeDescriptor::Dict(key, value) => {
                key.check_well_formed()?;
                value.check_well_formed()
            }
            _ => Ok(()),
        }
    }
}
