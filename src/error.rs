//! Crate-level error aggregating every module's failures.
use crate::cast::CastingError;
use crate::spec::ConfigError;
use crate::validation::{ArgumentError, BindError, CallError, SignatureError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Casting(#[from] CastingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl From<CallError> for Error {
    fn from(e: CallError) -> Self {
        match e {
            CallError::Argument(e) => Error::Argument(e),
            CallError::Bind(e) => Error::Bind(e),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
