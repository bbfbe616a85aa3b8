//! The validator algebra.
//!
//! Each validator answers two questions about a value: does it have the
//! right type (`type_conforms`), and does it satisfy the value-level
//! constraint (`value_conforms`). `validate` is their conjunction. Validators
//! are immutable once built, so one instance can be shared by every call to
//! the function it annotates, from any number of threads.

pub use self::choice::{Choice, ChoiceOption};
pub use self::config::{OptionConfig, TypeConfig, ValidatorConfig};
pub use self::dimension::{DimensionSize, Shape};
pub use self::error::ConfigError;
pub use self::tensor::{array, matrix, scalar, vector, Tensor};

use crate::cast::{CastResult, CastingError};
use crate::type_system::{conforms, TypeDescriptor};
use crate::value::Value;
use rayon::prelude::*;
use std::fmt;

// --- MODULE DECLARATIONS ---
mod choice;
mod config;
mod dimension;
mod error;
mod tensor;

/// The capability set shared by every validator.
pub trait Spec: fmt::Display + Send + Sync {
    /// Whether the value has a type this validator can reason about.
    fn type_conforms(&self, value: &Value) -> bool;

    /// Whether the value satisfies the validator's own constraint.
    fn value_conforms(&self, _value: &Value) -> bool {
        true
    }

    fn validate(&self, value: &Value) -> bool {
        self.type_conforms(value) && self.value_conforms(value)
    }

    /// Normalises the value into this validator's canonical representation.
    fn cast(&self, value: &Value) -> CastResult<Value>;
}

/// A leaf validator: the value must conform to a type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePredicate {
    ty: TypeDescriptor,
}

impl TypePredicate {
    pub fn new(ty: TypeDescriptor) -> Result<Self, ConfigError> {
        ty.check_well_formed()?;
        Ok(Self { ty })
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }
}

impl Spec for TypePredicate {
    fn type_conforms(&self, value: &Value) -> bool {
        conforms(value, &self.ty)
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        if conforms(value, &self.ty) {
            Ok(value.clone())
        } else {
            Err(CastingError::Incompatible {
                type_name: value.type_name().to_string(),
                target: "the annotated type",
            })
        }
    }
}

/// Any validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Type(TypePredicate),
    Choice(Choice),
    DimensionSize(DimensionSize),
    Shape(Shape),
    Tensor(Tensor),
}

impl Validator {
    fn as_spec(&self) -> &dyn Spec {
        match self {
            Validator::Type(v) => v,
            Validator::Choice(v) => v,
            Validator::DimensionSize(v) => v,
            Validator::Shape(v) => v,
            Validator::Tensor(v) => v,
        }
    }

    /// Validates many values against this one validator in parallel.
    pub fn validate_batch(&self, values: &[Value]) -> Vec<bool> {
        values.par_iter().map(|v| self.validate(v)).collect()
    }

    /// Builds a validator from its JSON configuration.
    pub fn from_json(json: &str) -> Result<Validator, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.build()
    }
}

impl Spec for Validator {
    fn type_conforms(&self, value: &Value) -> bool {
        self.as_spec().type_conforms(value)
    }

    fn value_conforms(&self, value: &Value) -> bool {
        self.as_spec().value_conforms(value)
    }

    fn validate(&self, value: &Value) -> bool {
        self.as_spec().validate(value)
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        self.as_spec().cast(value)
    }
}

impl From<TypePredicate> for Validator {
    fn from(v: TypePredicate) -> Self { Validator::Type(v) }
}

impl From<Choice> for Validator {
    fn from(v: Choice) -> Self { Validator::Choice(v) }
}

impl From<DimensionSize> for Validator {
    fn from(v: DimensionSize) -> Self { Validator::DimensionSize(v) }
}

impl From<Shape> for Validator {
    fn from(v: Shape) -> Self { Validator::Shape(v) }
}

impl From<Tensor> for Validator {
    fn from(v: Tensor) -> Self { Validator::Tensor(v) }
}
