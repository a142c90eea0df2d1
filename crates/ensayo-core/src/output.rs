//! Registro de outputs: pliega el resultado de un step en el siguiente
//! Context según la especificación declarada.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::EngineError;
use crate::model::Context;

/// Función de registro total: recibe el Context previo y el resultado, y
/// devuelve el Context siguiente completo (override total, no merge: la
/// función es responsable de preservar las claves que quiera conservar).
pub type OutputFn = Arc<dyn Fn(&Context, &Value) -> Result<Context, EngineError> + Send + Sync>;

/// Especificaciones de output reconocidas (conjunto cerrado).
#[derive(Clone, Default)]
pub enum OutputSpec {
    /// Sin registro: el Context no cambia.
    #[default]
    Ignore,
    /// `Context' = Context U {key: resultado}`.
    Key(String),
    /// El resultado debe ser una secuencia de longitud exactamente igual a
    /// la cantidad de claves; cada clave se liga posicionalmente. Una
    /// longitud distinta es un error reportable, nunca un bind parcial.
    Keys(Vec<String>),
    /// Registro funcional (override total del Context).
    Apply(OutputFn),
}

impl std::fmt::Debug for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSpec::Ignore => f.write_str("Ignore"),
            OutputSpec::Key(k) => f.debug_tuple("Key").field(k).finish(),
            OutputSpec::Keys(ks) => f.debug_tuple("Keys").field(ks).finish(),
            OutputSpec::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// Produce el siguiente Context a partir del previo y el resultado del
/// procedimiento del step.
pub fn register_output(spec: &OutputSpec, context: &Context, result: &Value) -> Result<Context, EngineError> {
    match spec {
        OutputSpec::Ignore => Ok(context.clone()),
        OutputSpec::Key(key) => {
            let mut next = context.clone();
            next.insert(key.clone(), result.clone());
            Ok(next)
        }
        OutputSpec::Keys(keys) => {
            let items = result.as_array().ok_or(EngineError::OutputNotSequence)?;
            if items.len() != keys.len() {
                return Err(EngineError::OutputArity { expected: keys.len(), got: items.len() });
            }
            let mut next = context.clone();
            for (key, item) in keys.iter().zip(items) {
                next.insert(key.clone(), item.clone());
            }
            Ok(next)
        }
        OutputSpec::Apply(f) => f(context, result),
    }
}
