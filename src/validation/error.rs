//! Defines the error types for the validation module.
use super::Annotation;
use crate::spec::ConfigError;
use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// A call-time argument failed its parameter's annotation.
///
/// Carries the full context of the first failing parameter. The `Display`
/// form is a fixed, key-aligned block:
///
/// ```text
/// Argument did not match parameter annotation.
/// Function       my_function
/// Parameter      array_size
/// Annotation     int
/// Argument       "99"
/// Argument type  str
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentError {
    function: String,
    parameter: String,
    annotation: Annotation,
    value: Value,
}

impl ArgumentError {
    pub fn new(
        function: impl Into<String>,
        parameter: impl Into<String>,
        annotation: Annotation,
        value: Value,
    ) -> Self {
        Self { function: function.into(), parameter: parameter.into(), annotation, value }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Argument did not match parameter annotation.")?;
        writeln!(f, "{:<15}{}", "Function", self.function)?;
        writeln!(f, "{:<15}{}", "Parameter", self.parameter)?;
        writeln!(f, "{:<15}{}", "Annotation", self.annotation)?;
        writeln!(f, "{:<15}{}", "Argument", self.value)?;
        write!(f, "{:<15}{}", "Argument type", self.value.type_name())
    }
}

impl std::error::Error for ArgumentError {}

/// A function was declared with an inconsistent signature.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    #[error("Default value violates its own annotation.\n{0}")]
    InvalidDefault(ArgumentError),
    #[error("Parameter `{name}` of {function} is declared more than once")]
    DuplicateParameter { function: String, name: String },
    #[error("Parameter `{name}` of {function} has no default but follows one that does")]
    RequiredAfterDefault { function: String, name: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Call arguments could not be paired with the declared parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("{function} takes {expected} positional arguments but {given} were given")]
    TooManyPositional { function: String, expected: usize, given: usize },
    #[error("{function} got an unexpected keyword argument `{name}`")]
    UnknownKeyword { function: String, name: String },
    #[error("{function} got multiple values for argument `{name}`")]
    MultipleValues { function: String, name: String },
    #[error("{function} is missing a required argument: `{name}`")]
    MissingArgument { function: String, name: String },
}

/// A validated call was rejected before reaching the wrapped function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl CallError {
    /// The argument error, if validation rather than binding failed.
    pub fn argument(&self) -> Option<&ArgumentError> {
        match self {
            CallError::Argument(e) => Some(e),
            CallError::Bind(_) => None,
        }
    }
}
