//! Reportes inmutables de ejecución, agregados de abajo hacia arriba:
//! chequeos -> StepReport -> TestReport -> SuiteReport.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::check::CheckEvent;
use crate::cleanup::CleanupEntry;
use crate::errors::EngineError;
use crate::step::Outcome;

/// Resultado por step: outcome, chequeos recolectados, snapshot de los
/// inputs resueltos y tiempos.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub title: String,
    pub outcome: Outcome,
    pub checks: Vec<CheckEvent>,
    /// Inputs resueltos, serializados para el reporte (los componentes se
    /// representan por su clave).
    pub resolved_inputs: Value,
    pub error: Option<EngineError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Resultado de liberar una entrada de cleanup.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub entry: CleanupEntry,
    pub error: Option<EngineError>,
}

impl CleanupReport {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Resultado por test: outcome agregado, reportes por step, resultados de
/// cleanup, snapshot final del Context y fallos de ciclo de vida.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub title: String,
    pub outcome: Outcome,
    pub steps: Vec<StepReport>,
    pub cleanup: Vec<CleanupReport>,
    /// Snapshot del Context al cierre del test.
    pub context: Value,
    /// Fallo de `Unbuilt -> Started` (el test no ejecutó ningún step).
    pub lifecycle_error: Option<EngineError>,
    /// Fallos de parada por componente (registrados, nunca cambian el
    /// outcome).
    pub stop_errors: Vec<(String, EngineError)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_pass()
    }

    /// Teardown sucio: al menos una entrada de cleanup falló al liberarse.
    /// Condición secundaria reportable; no altera el outcome.
    pub fn dirty(&self) -> bool {
        self.cleanup.iter().any(|c| !c.ok())
    }
}

/// Resumen de la suite completa.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub tests: Vec<TestReport>,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    /// Tests con teardown sucio (independiente del outcome).
    pub dirty: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SuiteReport {
    pub(crate) fn from_tests(tests: Vec<TestReport>,
                             started_at: DateTime<Utc>,
                             finished_at: DateTime<Utc>)
                             -> Self {
        let passed = tests.iter().filter(|t| t.outcome == Outcome::Pass).count();
        let failed = tests.iter().filter(|t| t.outcome == Outcome::Fail).count();
        let errored = tests.iter().filter(|t| t.outcome == Outcome::Error).count();
        let dirty = tests.iter().filter(|t| t.dirty()).count();
        Self { tests, passed, failed, errored, dirty, started_at, finished_at }
    }

    /// `true` si y sólo si todos los tests tienen outcome `pass`.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
