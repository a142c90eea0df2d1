//! Interfaz con el colaborador de aserciones.
//!
//! El motor no interpreta expresiones: cada invocación del primitivo de
//! chequeo produce un `CheckEvent` que se acumula en un recorder por step.
//! La clasificación (`fail` si hubo al menos un evento fallido sin pánico)
//! la hace el Runner al cerrar el step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// Evento emitido por una aserción dentro del procedimiento de un step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEvent {
    pub status: CheckStatus,
    pub expected: Value,
    pub actual: Value,
    pub message: String,
}

/// Acumulador de eventos de chequeo, uno por step en vuelo.
#[derive(Debug, Default)]
pub struct CheckRecorder {
    events: Vec<CheckEvent>,
}

impl CheckRecorder {
    pub fn record(&mut self, event: CheckEvent) {
        self.events.push(event);
    }

    pub fn any_failed(&self) -> bool {
        self.events.iter().any(|e| e.status == CheckStatus::Failed)
    }

    pub fn events(&self) -> &[CheckEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CheckEvent> {
        self.events
    }
}
