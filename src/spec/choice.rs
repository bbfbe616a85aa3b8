//! Choice: logical OR over literals, types, and nested validators.
use super::{ConfigError, Spec, Validator};
use crate::cast::{CastResult, CastingError};
use crate::type_system::{conforms, TypeDescriptor};
use crate::value::Value;
use tracing::trace;

/// One alternative of a `Choice`, classified when the choice is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceOption {
    /// Matches values equal to it.
    Literal(Value),
    /// Matches values conforming to the type.
    Type(TypeDescriptor),
    /// Matches values the nested validator accepts.
    Spec(Validator),
}

impl ChoiceOption {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ChoiceOption::Literal(literal) => value == literal,
            ChoiceOption::Type(ty) => conforms(value, ty),
            ChoiceOption::Spec(validator) => validator.validate(value),
        }
    }
}

impl From<Value> for ChoiceOption {
    /// A type supplied as a value is an option on that type, not a literal.
    fn from(v: Value) -> Self {
        match v {
            Value::Type(ty) => ChoiceOption::Type(ty),
            literal => ChoiceOption::Literal(literal),
        }
    }
}

impl From<TypeDescriptor> for ChoiceOption {
    fn from(v: TypeDescriptor) -> Self { ChoiceOption::Type(v) }
}

impl From<Validator> for ChoiceOption {
    fn from(v: Validator) -> Self { ChoiceOption::Spec(v) }
}

macro_rules! literal_options {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ChoiceOption {
                fn from(v: $ty) -> Self { ChoiceOption::Literal(Value::from(v)) }
            }
        )*
    };
}

literal_options!(bool, i32, i64, f64, &str, String);

macro_rules! spec_options {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ChoiceOption {
                fn from(v: $ty) -> Self { ChoiceOption::Spec(Validator::from(v)) }
            }
        )*
    };
}

spec_options!(Choice, super::DimensionSize, super::Shape, super::Tensor);

/// Valid iff the value matches at least one option.
///
/// Option order only affects how the choice is rendered in error messages;
/// evaluation stops at the first matching option.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    options: Vec<ChoiceOption>,
}

impl Choice {
    pub fn new<I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<ChoiceOption>,
    {
        let options: Vec<ChoiceOption> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(ConfigError::EmptyChoice);
        }
        for option in &options {
            if let ChoiceOption::Type(ty) = option {
                ty.check_well_formed()?;
            }
        }
        trace!(options = options.len(), "choice constructed");
        Ok(Self { options })
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// The first option the value matches.
    pub fn matching_option(&self, value: &Value) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.matches(value))
    }
}

impl Spec for Choice {
    // Options carry their own type checks; the choice as a whole admits any type.
    fn type_conforms(&self, _value: &Value) -> bool {
        true
    }

    fn value_conforms(&self, value: &Value) -> bool {
        self.matching_option(value).is_some()
    }

    fn cast(&self, value: &Value) -> CastResult<Value> {
        match self.matching_option(value) {
            Some(ChoiceOption::Spec(validator)) => validator.cast(value),
            Some(_) => Ok(value.clone()),
            None => Err(CastingError::Incompatible {
                type_name: value.type_name().to_string(),
                target: "any of the choice options",
            }),
        }
    }
}

/// Builds a `Choice` from heterogeneous options, converting each with
/// `ChoiceOption::from`. Evaluates to `Result<Choice, ConfigError>`.
#[macro_export]
macro_rules! choice {
    ($($option:expr),+ $(,)?) => {
        $crate::spec::Choice::new(vec![$($crate::spec::ChoiceOption::from($option)),+])
    };
}
