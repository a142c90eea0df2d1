//! Librería de steps reusables sobre los componentes demo, y la suite de
//! demostración que arma el CLI.
//!
//! Cada step declara sus inputs (componentes y lookups de Context) y sus
//! outputs; la composición en tests concretos se hace con bindings.

use std::sync::Arc;

use ensayo_core::{Binding, EngineError, InputSource, OutputSpec, Step, StepCtx, System, TestCase};
use serde_json::{json, Value};

use crate::components::{FakeDb, FakeQueue};

/// Constructor de System para la suite demo: un FakeDb bajo "db" y una
/// FakeQueue bajo "queue". Se invoca una vez por test.
pub fn demo_system(config: &Value) -> Result<System, EngineError> {
    // la config puede vetar el arranque (útil para demos de lifecycle)
    if config.get("unreachable").and_then(Value::as_bool).unwrap_or(false) {
        return Err(EngineError::StartFailed("demo system marked unreachable".into()));
    }
    Ok(System::new().with_component("db", Arc::new(FakeDb::new()))
                    .with_component("queue", Arc::new(FakeQueue::new())))
}

/// Inserta una fila y registra su cleanup. Output por defecto: la clave de
/// la fila bajo "row/key".
pub fn insert_row_step() -> Step {
    Step::new("insert-row", Arc::new(|ctx: &mut StepCtx<'_>| {
        let key = ctx.input("key");
        let row = ctx.input("row");
        let row_key = key.as_str().ok_or_else(|| EngineError::Step("insert-row requiere key string".into()))?
                         .to_string();
        let db: &FakeDb = ctx.component("db")?;
        db.insert(row_key.clone(), row);
        ctx.register_cleanup("db/row", json!(row_key));
        Ok(json!(row_key))
    })).with_title("insert a row into the db")
       .with_input("db", InputSource::Component("db".into()))
       .with_input("key", InputSource::Literal(json!("row-1")))
       .with_input("row", InputSource::Literal(json!({"ok": true})))
       .with_output(OutputSpec::Key("row/key".into()))
}

/// Verifica que la fila apuntada por el Context exista en el db.
pub fn assert_row_present_step() -> Step {
    Step::new("assert-row-present", Arc::new(|ctx: &mut StepCtx<'_>| {
        let key = ctx.input("key");
        let db: &FakeDb = ctx.component("db")?;
        let found = key.as_str().and_then(|k| db.get(k));
        ctx.check(found.is_some(), json!("present"), json!(found), "row visible in db");
        Ok(json!(null))
    })).with_title("row is present in the db")
       .with_input("db", InputSource::Component("db".into()))
       .with_input("key", InputSource::ContextKey("row/key".into()))
}

/// Publica un mensaje en la cola y registra su cleanup. Output: el offset
/// bajo "queue/offset".
pub fn publish_message_step() -> Step {
    Step::new("publish-message", Arc::new(|ctx: &mut StepCtx<'_>| {
        let queue: &FakeQueue = ctx.component("queue")?;
        let offset = queue.publish(ctx.input("message"));
        ctx.register_cleanup("queue/message", json!(offset));
        Ok(json!(offset))
    })).with_title("publish a message")
       .with_input("queue", InputSource::Component("queue".into()))
       .with_input("message", InputSource::Literal(json!({"event": "demo"})))
       .with_output(OutputSpec::Key("queue/offset".into()))
}

/// Suite de demostración: ejercita enhebrado de Context, reuso de
/// plantillas con bindings y registro de cleanups.
pub fn demo_suite() -> Vec<TestCase> {
    let user_row = insert_row_step().bind(Binding::new().input("key", InputSource::Literal(json!("user-7")))
                                                        .input("row", InputSource::Literal(json!({"name": "ada"})))
                                                        .title("insert the user row"));

    let roundtrip = TestCase::new("db row roundtrip").with_description("insert a row, then observe it through the context")
                                                     .with_tag("db")
                                                     .with_tag("smoke")
                                                     .with_step(user_row)
                                                     .with_step(assert_row_present_step().instance());

    let fanout = TestCase::new("queue fanout").with_description("publish two messages with the same template")
                                              .with_tag("queue")
                                              .with_step(publish_message_step().bind(
                                                  Binding::new().input("message", InputSource::Literal(json!({"n": 1})))
                                                                .output(OutputSpec::Key("first/offset".into()))))
                                              .with_step(publish_message_step().bind(
                                                  Binding::new().input("message", InputSource::Literal(json!({"n": 2})))
                                                                .output(OutputSpec::Key("second/offset".into()))));

    vec![roundtrip, fanout]
}
