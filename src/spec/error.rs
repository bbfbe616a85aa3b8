//! Defines the error types for validator construction.
use thiserror::Error;

/// A validator was built from a malformed configuration.
///
/// This is a programmer error in the annotation itself, reported when the
/// validator is constructed and never deferred to call time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Union type with no members cannot match any value")]
    EmptyUnion,
    #[error("Choice requires at least one option")]
    EmptyChoice,
    #[error("Invalid validator configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
