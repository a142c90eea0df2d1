//! Definiciones de eventos de ejecución y trait Reporter.

mod reporter;
mod types;

pub use reporter::{NullReporter, RecordingReporter, Reporter};
pub use types::{RunEvent, RunEventKind};
