//! Inputs resueltos de un step: valores JSON planos o handles a
//! componentes vivos del System.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::errors::EngineError;
use crate::system::Component;

/// Un input concreto entregado al procedimiento del step.
#[derive(Clone)]
pub enum ResolvedInput {
    /// Valor JSON plano (literal o lookup de Context).
    Value(Value),
    /// Handle a un componente del System, referido por su clave.
    Component(String, Arc<dyn Component>),
}

impl ResolvedInput {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResolvedInput::Value(v) => Some(v),
            ResolvedInput::Component(..) => None,
        }
    }

    /// Downcast al tipo concreto de un componente.
    pub fn as_component<T: Component>(&self) -> Option<&T> {
        match self {
            ResolvedInput::Component(_, c) => c.as_any().downcast_ref::<T>(),
            ResolvedInput::Value(_) => None,
        }
    }

    /// Representación JSON para el snapshot de inputs del reporte. Los
    /// componentes no son serializables; se representan por su clave.
    pub fn describe(&self) -> Value {
        match self {
            ResolvedInput::Value(v) => v.clone(),
            ResolvedInput::Component(key, _) => json!({ "component": key }),
        }
    }
}

impl std::fmt::Debug for ResolvedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedInput::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ResolvedInput::Component(key, _) => f.debug_tuple("Component").field(key).finish(),
        }
    }
}

/// Mapa parámetro -> input resuelto, en orden de declaración.
#[derive(Debug, Clone, Default)]
pub struct StepInputs {
    inner: IndexMap<String, ResolvedInput>,
}

impl StepInputs {
    pub fn insert(&mut self, key: impl Into<String>, input: ResolvedInput) {
        self.inner.insert(key.into(), input);
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedInput> {
        self.inner.get(key)
    }

    /// Valor JSON de un parámetro. Ausente (o componente) => `Null`, en
    /// línea con la semántica de lookups de Context.
    pub fn value(&self, key: &str) -> Value {
        self.inner.get(key).and_then(|i| i.as_value()).cloned().unwrap_or(Value::Null)
    }

    /// Componente tipado. `MissingComponent` si el parámetro no existe, no
    /// es un componente o el tipo concreto no coincide.
    pub fn component<T: Component>(&self, key: &str) -> Result<&T, EngineError> {
        self.inner
            .get(key)
            .and_then(|i| i.as_component::<T>())
            .ok_or_else(|| EngineError::MissingComponent(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot JSON del mapa completo para el StepReport.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.inner.iter().map(|(k, v)| (k.clone(), v.describe())).collect())
    }
}
