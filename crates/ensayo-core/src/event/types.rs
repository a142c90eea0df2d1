//! Eventos observables de una ejecución de suite.
//!
//! Rol en el flujo:
//! - El Runner emite un stream de eventos en el orden exacto de ocurrencia:
//!   suite-start, test-start, step-start, step-result, cleanup-result,
//!   test-result, suite-summary.
//! - Los consumidores (Reporter) son puramente observacionales: nunca
//!   alteran el comportamiento del motor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::step::Outcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Arranque de la suite: cantidad de tests a ejecutar.
    SuiteStarted { test_count: usize },
    /// Un test comenzó. No implica que su System haya arrancado.
    TestStarted { test_index: usize, title: String },
    /// Un step comenzó su ejecución.
    StepStarted { test_index: usize, step_index: usize, name: String },
    /// Un step terminó, con su outcome clasificado.
    StepFinished {
        test_index: usize,
        step_index: usize,
        name: String,
        outcome: Outcome,
        error: Option<EngineError>,
    },
    /// Una entrada de cleanup fue liberada (o falló al liberarse).
    CleanupReleased {
        test_index: usize,
        kind: String,
        key: Value,
        error: Option<EngineError>,
    },
    /// Un test terminó, con su outcome agregado.
    TestFinished { test_index: usize, title: String, outcome: Outcome },
    /// Resumen de cierre de la suite.
    SuiteFinished { passed: usize, failed: usize, errored: usize },
}

/// Evento con secuencia densa por ejecución (orden append), id de la
/// corrida y timestamp como metadato.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}
