//! Pila de cleanups por test y registry de handlers por kind de recurso.
//!
//! Los steps registran obligaciones de teardown `(kind, key)` durante la
//! ejecución; al cerrar el test la pila se drena en orden inverso (LIFO)
//! exactamente una vez, sea cual sea el outcome. El despacho por kind es
//! un conjunto abierto: la aplicación host puebla el registry antes de
//! ejecutar el Runner, y kinds nuevos no requieren tocar el motor.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::report::CleanupReport;
use crate::system::System;

/// Obligación de teardown registrada por un step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupEntry {
    pub kind: String,
    pub key: Value,
}

/// Pila append-only por ejecución de test. Se consume una sola vez.
#[derive(Debug, Default)]
pub struct CleanupStack {
    entries: Vec<CleanupEntry>,
}

impl CleanupStack {
    pub fn register(&mut self, kind: impl Into<String>, key: Value) {
        self.entries.push(CleanupEntry { kind: kind.into(), key });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume la pila en orden inverso al registro.
    fn drain_lifo(&mut self) -> Vec<CleanupEntry> {
        let mut entries = std::mem::take(&mut self.entries);
        entries.reverse();
        entries
    }
}

/// Handler de liberación para un kind de recurso. Recibe el System porque
/// liberar un recurso suele requerir el componente que lo creó.
pub trait CleanupHandler: Send + Sync {
    fn release(&self, system: &System, key: &Value) -> Result<(), EngineError>;
}

impl<F> CleanupHandler for F where F: Fn(&System, &Value) -> Result<(), EngineError> + Send + Sync
{
    fn release(&self, system: &System, key: &Value) -> Result<(), EngineError> {
        self(system, key)
    }
}

/// Registry kind -> handler, poblado por la aplicación host. El motor sólo
/// depende del contrato de lookup.
#[derive(Default)]
pub struct CleanupRegistry {
    handlers: HashMap<String, Box<dyn CleanupHandler>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, handler: impl CleanupHandler + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    pub fn handler(&self, kind: &str) -> Option<&dyn CleanupHandler> {
        self.handlers.get(kind).map(Box::as_ref)
    }

    /// Drena la pila: despacha cada entrada en orden LIFO y captura el
    /// resultado por entrada. Un handler que falla (o entra en pánico, o no
    /// existe) se reporta pero no impide drenar el resto: el teardown es
    /// best-effort y exhaustivo.
    pub fn drain(&self, stack: &mut CleanupStack, system: &System) -> Vec<CleanupReport> {
        let entries = stack.drain_lifo();
        let mut reports = Vec::with_capacity(entries.len());
        for entry in entries {
            debug!(kind = %entry.kind, key = %entry.key, "releasing cleanup entry");
            let error = match self.handler(&entry.kind) {
                None => Some(EngineError::MissingCleanupHandler(entry.kind.clone())),
                Some(handler) => {
                    match catch_unwind(AssertUnwindSafe(|| handler.release(system, &entry.key))) {
                        Ok(Ok(())) => None,
                        Ok(Err(e)) => Some(EngineError::CleanupFailed { kind: entry.kind.clone(),
                                                                        message: e.to_string() }),
                        Err(panic) => {
                            Some(EngineError::CleanupFailed { kind: entry.kind.clone(),
                                                              message: crate::runner::panic_message(&*panic) })
                        }
                    }
                }
            };
            if let Some(ref e) = error {
                warn!(kind = %entry.kind, error = %e, "cleanup entry failed");
            }
            reports.push(CleanupReport { entry, error });
        }
        reports
    }
}
