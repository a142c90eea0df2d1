//! Modelo de Step: plantilla inmutable, instancia ligada (bind/override) y
//! el contexto de ejecución entregado al procedimiento.

pub mod ctx;
pub mod definition;
pub mod instance;
pub mod outcome;

pub use ctx::StepCtx;
pub use definition::{Binding, Step, StepFn};
pub use instance::StepInstance;
pub use outcome::Outcome;
