//! Runtime argument validation.
//!
//! Functions declare an explicit [`Signature`] whose parameters carry type or
//! shape/value annotations. Defaults are checked when the signature is built;
//! arguments are checked on every call through [`Validated::call`], which
//! reports the first failing parameter as an [`ArgumentError`].
//!
//! ```
//! use argspec_core::{choice, tuple, CallArgs, DType, Signature, Tensor, TypeDescriptor};
//!
//! let f = Signature::builder("f")
//!     .param("a", choice!("xx", TypeDescriptor::Bool).unwrap())
//!     .param_with_default("c", Tensor::vector(DType::Float, Some(2)), tuple![4.0, 4])
//!     .build()
//!     .unwrap()
//!     .decorate(|args: &argspec_core::Arguments| args.get("a").cloned());
//!
//! assert!(f.call(CallArgs::new().arg("xx")).is_ok());
//! assert!(f.call(CallArgs::new().arg(233)).is_err());
//! ```

pub mod cast;
mod display;
pub mod error;
pub mod spec;
pub mod type_system;
pub mod validation;
pub mod value;

pub use cast::{CastResult, CastingError};
pub use error::{Error, Result};
pub use spec::{
    array, matrix, scalar, vector, Choice, ChoiceOption, ConfigError, DimensionSize, Shape, Spec, Tensor,
    TypePredicate, Validator, ValidatorConfig,
};
pub use type_system::{conforms, TypeDescriptor};
pub use validation::{
    decorate, validate, Annotation, ArgumentError, Arguments, BindError, CallArgs, CallError, Signature,
    SignatureError, Validated,
};
pub use value::{Class, DType, NdArray, Object, Value};
