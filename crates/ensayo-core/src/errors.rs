//! Errores del motor. Serializables para poder incrustarse en reportes
//! y eventos sin perder información.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Taxonomía única de errores del engine.
///
/// Política de propagación: todo fallo se captura en la frontera del step y
/// se convierte en datos de reporte; el `Runner` nunca propaga el fallo de
/// un test individual, sólo errores de configuración a nivel de suite.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    /// Un input declaró un componente que el System no expone.
    #[error("missing component: {0}")]
    MissingComponent(String),
    /// Un `OutputSpec::Keys` exige que el resultado sea una secuencia.
    #[error("output spec requires a sequence result, got a scalar")]
    OutputNotSequence,
    /// Longitud del resultado distinta de la cantidad de claves declaradas.
    #[error("output arity mismatch: {expected} keys, result has {got} elements")]
    OutputArity { expected: usize, got: usize },
    /// No hay handler registrado para el kind de un cleanup.
    #[error("no cleanup handler registered for kind: {0}")]
    MissingCleanupHandler(String),
    /// Un handler de cleanup falló al liberar un recurso.
    #[error("cleanup failed for kind {kind}: {message}")]
    CleanupFailed { kind: String, message: String },
    /// El System no pudo construirse o arrancar (Unbuilt -> Started).
    #[error("system start failed: {0}")]
    StartFailed(String),
    /// Un componente falló al detenerse (registrado, nunca fatal).
    #[error("system stop failed: {0}")]
    StopFailed(String),
    /// Una función de lookup sobre el Context lanzó un error.
    #[error("context fn failed: {0}")]
    ContextFn(String),
    /// El procedimiento de un step entró en pánico.
    #[error("step panicked: {0}")]
    StepPanicked(String),
    /// Fallo explícito devuelto por el procedimiento de un step.
    #[error("step failed: {0}")]
    Step(String),
    /// Patrón de matcher mal formado (error de configuración de suite).
    #[error("invalid matcher pattern: {0}")]
    InvalidPattern(String),
    #[error("internal: {0}")]
    Internal(String),
}
