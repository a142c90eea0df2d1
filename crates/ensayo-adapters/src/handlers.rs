//! Handlers de cleanup para los kinds de recurso de los componentes demo.
//!
//! El registry es un conjunto abierto: la aplicación host lo puebla antes
//! de ejecutar el Runner. Aquí damos de alta `db/row` y `queue/message`.

use ensayo_core::{CleanupRegistry, EngineError, System};
use serde_json::Value;

use crate::components::{FakeDb, FakeQueue};

/// Puebla el registry con los handlers de los componentes demo. Asume que
/// el System expone el FakeDb bajo "db" y la FakeQueue bajo "queue".
pub fn register_demo_handlers(registry: &mut CleanupRegistry) {
    registry.register("db/row", |system: &System, key: &Value| -> Result<(), EngineError> {
                let db = system.component_as::<FakeDb>("db")
                               .ok_or_else(|| EngineError::MissingComponent("db".into()))?;
                let row_key = key.as_str()
                                 .ok_or_else(|| EngineError::Internal(format!("db/row key no es string: {key}")))?;
                if !db.delete(row_key) {
                    return Err(EngineError::CleanupFailed { kind: "db/row".into(),
                                                            message: format!("row {row_key} not found") });
                }
                Ok(())
            });

    registry.register("queue/message", |system: &System, key: &Value| -> Result<(), EngineError> {
                let queue = system.component_as::<FakeQueue>("queue")
                                  .ok_or_else(|| EngineError::MissingComponent("queue".into()))?;
                let offset = key.as_u64()
                                .ok_or_else(|| EngineError::Internal(format!("queue/message key no es offset: {key}")))?;
                if !queue.purge(offset) {
                    return Err(EngineError::CleanupFailed { kind: "queue/message".into(),
                                                            message: format!("offset {offset} not found") });
                }
                Ok(())
            });
}
