//! Context: el estado clave/valor que los steps de un test comparten.
//!
//! Invariante: el Context sólo crece o sobreescribe, nunca se achica. Cada
//! ejecución de test recibe una instancia fresca (o una semilla explícita
//! en `run_test`) que se descarta al terminar; los steps posteriores ven lo
//! que escribieron los anteriores, nunca al revés.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapa clave -> `Value` inmutable por convención: el registrar de outputs
/// produce el siguiente Context, el resto del motor sólo lee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    entries: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye un Context a partir de un objeto JSON ya armado (semilla
    /// para `run_test`).
    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Lookup por clave simple. Ausente => `None`, nunca un error.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Lookup por key-path: camina objetos anidados en orden. Cualquier
    /// tramo ausente (o no-objeto intermedio) produce `None`.
    pub fn get_path(&self, path: &[String]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.get(first)?;
        for key in rest {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }

    /// Inserta o sobreescribe una clave. Uso exclusivo del registrar de
    /// outputs; los steps nunca mutan el Context directamente.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Snapshot JSON para reportes.
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}
