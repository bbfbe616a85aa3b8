//! Human-readable renderings of values, types and validators.
//!
//! Every `Display` here is total: anything that can be annotated or passed as
//! an argument renders without failing, so an error report can always be
//! produced.

// --- MODULE DECLARATIONS ---
mod render;
