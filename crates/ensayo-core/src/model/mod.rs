//! Modelos neutrales (Context, inputs resueltos, ubicación de fuente).

pub mod context;
pub mod inputs;
pub mod source;

pub use context::Context;
pub use inputs::{ResolvedInput, StepInputs};
pub use source::SourceLocation;
