//! Runner: secuencia steps dentro de un test y tests dentro de una suite,
//! clasifica outcomes y aísla fallos entre tests.
//!
//! Invariantes que este módulo garantiza:
//! - Orden de ejecución de steps == orden declarado; la secuencia corta en
//!   el primer outcome fail/error (short-circuit).
//! - El drain de cleanups y la parada del System corren exactamente una
//!   vez por test, en todos los outcomes, incluso con cero steps.
//! - El fallo de un test nunca impide la ejecución de los siguientes.
//! - Todo fallo se captura en la frontera del step (incluidos pánicos) y
//!   se convierte en datos de reporte; el Runner no propaga errores por
//!   test individual.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::case::TestCase;
use crate::check::CheckRecorder;
use crate::cleanup::{CleanupHandler, CleanupRegistry, CleanupStack};
use crate::errors::EngineError;
use crate::event::{NullReporter, Reporter, RunEvent, RunEventKind};
use crate::model::Context;
use crate::output::register_output;
use crate::report::{StepReport, SuiteReport, TestReport};
use crate::resolve::resolve_inputs;
use crate::step::{Outcome, StepCtx, StepInstance};
use crate::system::{System, SystemConstructor, SystemLifecycle};

/// Motor de ejecución de suites. Genérico sobre el Reporter para que los
/// tests puedan inspeccionar el stream de eventos emitido.
pub struct Runner<R: Reporter = NullReporter> {
    registry: CleanupRegistry,
    reporter: R,
    run_id: Uuid,
    seq: u64,
}

impl Runner<NullReporter> {
    pub fn new() -> Self {
        Self::with_reporter(NullReporter)
    }
}

impl Default for Runner<NullReporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reporter> Runner<R> {
    pub fn with_reporter(reporter: R) -> Self {
        Self { registry: CleanupRegistry::new(),
               reporter,
               run_id: Uuid::new_v4(),
               seq: 0 }
    }

    /// Registra un handler de cleanup para un kind de recurso. Debe
    /// poblarse antes de ejecutar la suite.
    pub fn register_cleanup(&mut self, kind: impl Into<String>, handler: impl CleanupHandler + 'static) {
        self.registry.register(kind, handler);
    }

    pub fn registry_mut(&mut self) -> &mut CleanupRegistry {
        &mut self.registry
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    fn emit(&mut self, kind: RunEventKind) {
        let event = RunEvent { seq: self.seq, run_id: self.run_id, kind, ts: Utc::now() };
        self.seq += 1;
        self.reporter.emit(&event);
    }

    /// Ejecuta la suite completa: por cada test construye y arranca un
    /// System fresco, corre el test, detiene el System y agrega el outcome
    /// al reporte de suite.
    pub fn run_suite(&mut self, constructor: &SystemConstructor, tests: &[TestCase], config: &Value) -> SuiteReport {
        self.run_id = Uuid::new_v4();
        self.seq = 0;
        let started_at = Utc::now();
        self.emit(RunEventKind::SuiteStarted { test_count: tests.len() });

        let mut reports = Vec::with_capacity(tests.len());
        for (index, test) in tests.iter().enumerate() {
            reports.push(self.run_managed(constructor, test, config, index));
        }

        let finished_at = Utc::now();
        let suite = SuiteReport::from_tests(reports, started_at, finished_at);
        info!(passed = suite.passed, failed = suite.failed, errored = suite.errored, "suite finished");
        self.emit(RunEventKind::SuiteFinished { passed: suite.passed,
                                                failed: suite.failed,
                                                errored: suite.errored });
        suite
    }

    /// Variante booleana del contrato de suite: `true` si y sólo si todos
    /// los tests pasaron.
    pub fn run_tests(&mut self, constructor: &SystemConstructor, tests: &[TestCase], config: &Value) -> bool {
        self.run_suite(constructor, tests, config).all_passed()
    }

    /// Ejecuta un test con ciclo de vida completo del System.
    fn run_managed(&mut self, constructor: &SystemConstructor, test: &TestCase, config: &Value, index: usize) -> TestReport {
        let started_at = Utc::now();
        self.emit(RunEventKind::TestStarted { test_index: index, title: test.title.clone() });
        info!(test = %test.title, "test started");

        let lifecycle = SystemLifecycle::new(constructor);
        let report = match lifecycle.build_and_start(config) {
            Err(e) => {
                // El System nunca llegó a Started: cero steps, nada que
                // drenar y ninguna parada que intentar.
                warn!(test = %test.title, error = %e, "system failed to start");
                let finished_at = Utc::now();
                TestReport { title: test.title.clone(),
                             outcome: Outcome::Error,
                             steps: Vec::new(),
                             cleanup: Vec::new(),
                             context: Context::new().to_value(),
                             lifecycle_error: Some(e),
                             stop_errors: Vec::new(),
                             started_at,
                             finished_at,
                             elapsed_ms: elapsed_ms(started_at, finished_at) }
            }
            Ok(system) => {
                let mut report = self.execute(&system, test, Context::new(), index, started_at);
                // Started -> Stopped: incondicional, con fallos registrados
                // por componente.
                report.stop_errors = system.stop();
                report.finished_at = Utc::now();
                report.elapsed_ms = elapsed_ms(report.started_at, report.finished_at);
                report
            }
        };

        info!(test = %test.title, outcome = %report.outcome, "test finished");
        self.emit(RunEventKind::TestFinished { test_index: index,
                                               title: test.title.clone(),
                                               outcome: report.outcome });
        report
    }

    /// Ejecución de bajo nivel contra un System ya disponible, sin gestión
    /// de ciclo de vida (invocación ad-hoc). El Context puede venir
    /// sembrado por el caller.
    pub fn run_test(&mut self, system: &System, test: &TestCase, seed: Context) -> TestReport {
        let started_at = Utc::now();
        self.emit(RunEventKind::TestStarted { test_index: 0, title: test.title.clone() });
        let report = self.execute(system, test, seed, 0, started_at);
        self.emit(RunEventKind::TestFinished { test_index: 0,
                                               title: test.title.clone(),
                                               outcome: report.outcome });
        report
    }

    /// Bucle de steps + drain de cleanups. No detiene el System: eso es
    /// responsabilidad del caller (run_managed, o nadie en el modo ad-hoc).
    fn execute(&mut self, system: &System, test: &TestCase, seed: Context, index: usize, started_at: DateTime<Utc>) -> TestReport {
        let mut context = seed;
        let mut stack = CleanupStack::default();
        let mut steps: Vec<StepReport> = Vec::with_capacity(test.steps.len());
        let mut terminal = Outcome::Pass;

        for (step_index, step) in test.steps.iter().enumerate() {
            self.emit(RunEventKind::StepStarted { test_index: index,
                                                  step_index,
                                                  name: step.name.clone() });
            debug!(step = %step.name, "step started");

            let (report, next_context) = run_step(step, &context, system, &mut stack);
            if let Some(next) = next_context {
                context = next;
            }

            self.emit(RunEventKind::StepFinished { test_index: index,
                                                   step_index,
                                                   name: step.name.clone(),
                                                   outcome: report.outcome,
                                                   error: report.error.clone() });
            terminal = report.outcome;
            steps.push(report);
            if terminal != Outcome::Pass {
                // Short-circuit: los steps restantes no se ejecutan, pero
                // el teardown de abajo corre igual.
                break;
            }
        }

        let cleanup = self.registry.drain(&mut stack, system);
        for report in &cleanup {
            self.emit(RunEventKind::CleanupReleased { test_index: index,
                                                      kind: report.entry.kind.clone(),
                                                      key: report.entry.key.clone(),
                                                      error: report.error.clone() });
        }

        let finished_at = Utc::now();
        TestReport { title: test.title.clone(),
                     outcome: terminal,
                     steps,
                     cleanup,
                     context: context.to_value(),
                     lifecycle_error: None,
                     stop_errors: Vec::new(),
                     started_at,
                     finished_at,
                     elapsed_ms: elapsed_ms(started_at, finished_at) }
    }
}

/// Ejecuta un step: resuelve inputs, invoca el procedimiento interceptando
/// pánicos, clasifica el outcome y registra el output en el Context.
/// Devuelve el reporte y, para steps pass, el Context siguiente.
fn run_step(step: &StepInstance,
            context: &Context,
            system: &System,
            stack: &mut CleanupStack)
            -> (StepReport, Option<Context>) {
    let started_at = Utc::now();

    // Resolución, invocación y registro de output corren todos bajo el
    // mismo catch_unwind: las fuentes ContextFn y los registradores Apply
    // son closures del usuario y pueden entrar en pánico igual que el
    // procedimiento del step.
    let mut recorder = CheckRecorder::default();
    let mut snapshot = Value::Null;
    let invoked = catch_unwind(AssertUnwindSafe(|| {
                      let inputs = resolve_inputs(&step.inputs, context, system)?;
                      snapshot = inputs.snapshot();
                      let mut ctx = StepCtx::new(&inputs, &mut recorder, stack);
                      let result = (step.test)(&mut ctx)?;
                      if recorder.any_failed() {
                          return Ok(None);
                      }
                      // Outputs se registran sólo en pass; un bind parcial
                      // o con aridad errada es un error.
                      register_output(&step.output, context, &result).map(Some)
                  }));

    let (outcome, error, next_context) = match invoked {
        Err(panic) => {
            let message = panic_message(&*panic);
            warn!(step = %step.name, panic = %message, "step panicked");
            (Outcome::Error, Some(EngineError::StepPanicked(message)), None)
        }
        Ok(Err(e)) => (Outcome::Error, Some(e), None),
        Ok(Ok(None)) => (Outcome::Fail, None, None),
        Ok(Ok(Some(next))) => (Outcome::Pass, None, Some(next)),
    };
    let checks = recorder.into_events();
    let resolved_inputs = snapshot;

    let finished_at = Utc::now();
    let report = StepReport { name: step.name.clone(),
                              title: step.title.clone(),
                              outcome,
                              checks,
                              resolved_inputs,
                              error,
                              started_at,
                              finished_at,
                              elapsed_ms: elapsed_ms(started_at, finished_at) };
    (report, next_context)
}

/// Mensaje legible del payload de un pánico interceptado.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}
