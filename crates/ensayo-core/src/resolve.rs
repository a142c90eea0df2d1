//! Resolución de inputs: de la especificación declarada de un step a los
//! valores concretos entregados a su procedimiento.
//!
//! El merge de overrides en bind-time es shallow y determinista: clave por
//! clave, el override gana (misma semántica que el merge de params del
//! resto del proyecto).

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::EngineError;
use crate::model::{Context, ResolvedInput, StepInputs};
use crate::system::System;

/// Lookup funcional sobre el Context completo. Un error aquí se propaga
/// como error del step.
pub type ContextLookupFn = Arc<dyn Fn(&Context) -> Result<Value, EngineError> + Send + Sync>;

/// Fuentes de input reconocidas (conjunto cerrado).
#[derive(Clone)]
pub enum InputSource {
    /// Valor literal, devuelto tal cual.
    Literal(Value),
    /// Componente del System, por clave. Ausente => `MissingComponent`.
    Component(String),
    /// Lookup de Context por clave simple. Ausente => `Null`, no error.
    ContextKey(String),
    /// Lookup de Context por key-path sobre objetos anidados. Camino
    /// ausente => `Null`, no error.
    ContextPath(Vec<String>),
    /// Función sobre el Context completo; su retorno se usa tal cual.
    ContextFn(ContextLookupFn),
}

impl std::fmt::Debug for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            InputSource::Component(k) => f.debug_tuple("Component").field(k).finish(),
            InputSource::ContextKey(k) => f.debug_tuple("ContextKey").field(k).finish(),
            InputSource::ContextPath(p) => f.debug_tuple("ContextPath").field(p).finish(),
            InputSource::ContextFn(_) => f.write_str("ContextFn(..)"),
        }
    }
}

/// Especificación de inputs: parámetro -> fuente, en orden de declaración.
pub type InputSpec = IndexMap<String, InputSource>;

/// Merge shallow de especificaciones: las claves de `overrides` reemplazan
/// a las de `base` una a una; no hay merge profundo de fuentes.
pub fn merge_input_spec(base: &InputSpec, overrides: &InputSpec) -> InputSpec {
    let mut out = base.clone();
    for (key, source) in overrides {
        out.insert(key.clone(), source.clone());
    }
    out
}

/// Resuelve la especificación contra el Context actual y el System,
/// produciendo el mapa concreto parámetro -> input.
pub fn resolve_inputs(spec: &InputSpec, context: &Context, system: &System) -> Result<StepInputs, EngineError> {
    let mut inputs = StepInputs::default();
    for (key, source) in spec {
        let resolved = match source {
            InputSource::Literal(v) => ResolvedInput::Value(v.clone()),
            InputSource::Component(name) => {
                let component = system.component(name)
                                      .ok_or_else(|| EngineError::MissingComponent(name.clone()))?;
                ResolvedInput::Component(name.clone(), component)
            }
            InputSource::ContextKey(k) => {
                ResolvedInput::Value(context.get(k).cloned().unwrap_or(Value::Null))
            }
            InputSource::ContextPath(path) => {
                ResolvedInput::Value(context.get_path(path).cloned().unwrap_or(Value::Null))
            }
            InputSource::ContextFn(f) => ResolvedInput::Value(f(context)?),
        };
        inputs.insert(key.clone(), resolved);
    }
    Ok(inputs)
}
