//! Declarative validator configuration.
//!
//! Validators can be described in JSON and built once at startup:
//!
//! ```json
//! {"kind": "choice", "options": [{"literal": "xx"}, {"type": "bool"}]}
//! {"kind": "vector", "dtype": "int", "length": 2}
//! ```
use super::{Choice, ChoiceOption, ConfigError, DimensionSize, Shape, Tensor, TypePredicate, Validator};
use crate::type_system::TypeDescriptor;
use crate::value::{DType, Value};
use serde::{Deserialize, Serialize};

/// A serialisable type descriptor. Nominal classes have no configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeConfig {
    Any,
    None,
    Bool,
    Int,
    Float,
    Complex,
    Str,
    Array,
    List(Box<TypeConfig>),
    Tuple(Vec<TypeConfig>),
    TupleOf(Box<TypeConfig>),
    Sequence(Box<TypeConfig>),
    Dict(Box<TypeConfig>, Box<TypeConfig>),
    Union(Vec<TypeConfig>),
    Type(Box<TypeConfig>),
}

impl From<TypeConfig> for TypeDescriptor {
    fn from(config: TypeConfig) -> Self {
        match config {
            TypeConfig::Any => TypeDescriptor::Any,
            TypeConfig::None => TypeDescriptor::NoneType,
            TypeConfig::Bool => TypeDescriptor::Bool,
            TypeConfig::Int => TypeDescriptor::Int,
            TypeConfig::Float => TypeDescriptor::Float,
            TypeConfig::Complex => TypeDescriptor::Complex,
            TypeConfig::Str => TypeDescriptor::Str,
            TypeConfig::Array => TypeDescriptor::Array,
            TypeConfig::List(item) => TypeDescriptor::list((*item).into()),
            TypeConfig::Tuple(items) => TypeDescriptor::Tuple(items.into_iter().map(Into::into).collect()),
            TypeConfig::TupleOf(item) => TypeDescriptor::tuple_of((*item).into()),
            TypeConfig::Sequence(item) => TypeDescriptor::sequence((*item).into()),
            TypeConfig::Dict(key, value) => TypeDescriptor::dict((*key).into(), (*value).into()),
            TypeConfig::Union(members) => TypeDescriptor::Union(members.into_iter().map(Into::into).collect()),
            TypeConfig::Type(inner) => TypeDescriptor::type_of((*inner).into()),
        }
    }
}

/// One option of a configured choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionConfig {
    Literal(serde_json::Value),
    Type(TypeConfig),
    Spec(Box<ValidatorConfig>),
}

impl OptionConfig {
    fn build(self) -> Result<ChoiceOption, ConfigError> {
        Ok(match self {
            OptionConfig::Literal(json) => ChoiceOption::Literal(Value::from(json)),
            OptionConfig::Type(ty) => ChoiceOption::Type(ty.into()),
            OptionConfig::Spec(spec) => ChoiceOption::Spec((*spec).build()?),
        })
    }
}

/// A serialisable validator, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidatorConfig {
    Type {
        #[serde(rename = "type")]
        ty: TypeConfig,
    },
    Choice {
        options: Vec<OptionConfig>,
    },
    DimensionSize {
        #[serde(default)]
        size: Option<usize>,
    },
    Shape {
        #[serde(default)]
        dims: Option<Vec<Option<usize>>>,
    },
    Tensor {
        #[serde(default)]
        dtype: DType,
        #[serde(default)]
        shape: Option<Vec<Option<usize>>>,
    },
    Scalar {
        #[serde(default)]
        dtype: DType,
    },
    Vector {
        #[serde(default)]
        dtype: DType,
        #[serde(default)]
        length: Option<usize>,
    },
    Matrix {
        #[serde(default)]
        dtype: DType,
        #[serde(default)]
        rows: Option<usize>,
        #[serde(default)]
        cols: Option<usize>,
    },
    Array {
        #[serde(default)]
        dtype: DType,
        #[serde(default)]
        ndim: Option<usize>,
    },
}

impl ValidatorConfig {
    /// Builds the validator, running the same construction checks as the
    /// programmatic constructors.
    pub fn build(self) -> Result<Validator, ConfigError> {
        Ok(match self {
            ValidatorConfig::Type { ty } => TypePredicate::new(ty.into())?.into(),
            ValidatorConfig::Choice { options } => {
                let options = options.into_iter().map(OptionConfig::build).collect::<Result<Vec<_>, _>>()?;
                Choice::new(options)?.into()
            }
            ValidatorConfig::DimensionSize { size } => DimensionSize::new(size).into(),
            ValidatorConfig::Shape { dims } => Shape::new(dims).into(),
            ValidatorConfig::Tensor { dtype, shape } => Tensor::new(dtype, Shape::new(shape)).into(),
            ValidatorConfig::Scalar { dtype } => Tensor::scalar(dtype).into(),
            ValidatorConfig::Vector { dtype, length } => Tensor::vector(dtype, length).into(),
            ValidatorConfig::Matrix { dtype, rows, cols } => Tensor::matrix(dtype, (rows, cols)).into(),
            ValidatorConfig::Array { dtype, ndim } => Tensor::array(dtype, ndim).into(),
        })
    }
}
