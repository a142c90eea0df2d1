//! ensayo-core: motor de ejecución de tests de integración.
//!
//! Ejecuta secuencias ordenadas de steps contra un System de dependencias
//! externas con ciclo de vida gestionado, enhebrando un Context creciente
//! entre steps, y produce un reporte estructurado pass/fail/error.
pub mod case;
pub mod check;
pub mod cleanup;
pub mod discovery;
pub mod errors;
pub mod event;
pub mod model;
pub mod output;
pub mod report;
pub mod resolve;
pub mod runner;
pub mod step;
pub mod system;

pub use case::TestCase;
pub use check::{CheckEvent, CheckRecorder, CheckStatus};
pub use cleanup::{CleanupEntry, CleanupHandler, CleanupRegistry, CleanupStack};
pub use discovery::{find_tests, Matcher};
pub use errors::EngineError;
pub use event::{NullReporter, RecordingReporter, Reporter, RunEvent, RunEventKind};
pub use model::{Context, ResolvedInput, SourceLocation, StepInputs};
pub use output::{register_output, OutputFn, OutputSpec};
pub use report::{CleanupReport, StepReport, SuiteReport, TestReport};
pub use resolve::{merge_input_spec, resolve_inputs, ContextLookupFn, InputSource, InputSpec};
pub use runner::Runner;
pub use step::{Binding, Outcome, Step, StepCtx, StepFn, StepInstance};
pub use system::{Component, System, SystemConstructor, SystemLifecycle};
