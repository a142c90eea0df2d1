//! Componentes de demostración: dependencias en memoria, deterministas y
//! sin IO externo. El estado interno va tras Mutex porque el trait
//! `Component` expone el ciclo de vida por referencia compartida.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use ensayo_core::{Component, EngineError};
use serde_json::Value;

/// Base de datos falsa: filas clave -> documento JSON.
#[derive(Debug, Default)]
pub struct FakeDb {
    rows: Mutex<HashMap<String, Value>>,
    started: AtomicBool,
}

impl FakeDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, row: Value) {
        self.rows.lock().unwrap().insert(key.into(), row);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    pub fn delete(&self, key: &str) -> bool {
        self.rows.lock().unwrap().remove(key).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Component for FakeDb {
    fn start(&self) -> Result<(), EngineError> {
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Cola falsa: mensajes JSON en orden de publicación, identificados por un
/// offset creciente.
#[derive(Debug, Default)]
pub struct FakeQueue {
    messages: Mutex<Vec<(u64, Value)>>,
    next_offset: Mutex<u64>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publica un mensaje y devuelve su offset.
    pub fn publish(&self, message: Value) -> u64 {
        let mut next = self.next_offset.lock().unwrap();
        let offset = *next;
        *next += 1;
        self.messages.lock().unwrap().push((offset, message));
        offset
    }

    pub fn purge(&self, offset: u64) -> bool {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|(o, _)| *o != offset);
        messages.len() != before
    }

    pub fn depth(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Component for FakeQueue {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
