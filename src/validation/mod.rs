//! The parameter interceptor.
//!
//! A `Signature` is declared once: an ordered list of parameters with their
//! annotations and defaults. Building it checks every default against its own
//! annotation. Wrapping a function with `decorate` then checks each call's
//! arguments before the function runs.

pub use self::error::{ArgumentError, BindError, CallError, SignatureError};
pub use self::interceptor::{decorate, validate, Arguments, CallArgs, Validated};
pub use self::signature::{Annotation, Param, Signature, SignatureBuilder, Slot};

// --- MODULE DECLARATIONS ---
mod error;
mod interceptor;
mod signature;
