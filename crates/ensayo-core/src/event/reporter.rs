//! Consumidores del stream de eventos.

use super::RunEvent;

/// Colaborador externo que recibe los eventos en orden de ocurrencia.
/// Debe ser puramente observacional.
pub trait Reporter {
    fn emit(&mut self, event: &RunEvent);
}

/// Reporter que descarta todo. Default del Runner.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn emit(&mut self, _event: &RunEvent) {}
}

/// Reporter en memoria para tests: acumula los eventos recibidos.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<RunEvent>,
}

impl Reporter for RecordingReporter {
    fn emit(&mut self, event: &RunEvent) {
        self.events.push(event.clone());
    }
}
