//! Pruebas del resolver de inputs: las cinco variantes de fuente y el
//! merge shallow de overrides en bind-time.

use std::any::Any;
use std::sync::Arc;

use ensayo_core::{merge_input_spec, resolve_inputs, Component, Context, EngineError, InputSource, InputSpec, System};
use serde_json::json;

#[derive(Debug)]
struct Dummy {
    label: &'static str,
}

impl Component for Dummy {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn system_with_dummy() -> System {
    System::new().with_component("store", Arc::new(Dummy { label: "store" }))
}

#[test]
fn literal_is_returned_verbatim() {
    let mut spec = InputSpec::default();
    spec.insert("n".into(), InputSource::Literal(json!(7)));

    let inputs = resolve_inputs(&spec, &Context::new(), &System::new()).unwrap();
    assert_eq!(inputs.value("n"), json!(7));
}

#[test]
fn component_is_looked_up_in_system() {
    let mut spec = InputSpec::default();
    spec.insert("db".into(), InputSource::Component("store".into()));

    let inputs = resolve_inputs(&spec, &Context::new(), &system_with_dummy()).unwrap();
    let dummy: &Dummy = inputs.component("db").unwrap();
    assert_eq!(dummy.label, "store");
}

#[test]
fn missing_component_is_an_error() {
    let mut spec = InputSpec::default();
    spec.insert("db".into(), InputSource::Component("absent".into()));

    let err = resolve_inputs(&spec, &Context::new(), &System::new()).unwrap_err();
    assert_eq!(err, EngineError::MissingComponent("absent".into()));
}

#[test]
fn context_key_absent_yields_null_not_error() {
    let mut spec = InputSpec::default();
    spec.insert("x".into(), InputSource::ContextKey("unset".into()));

    let inputs = resolve_inputs(&spec, &Context::new(), &System::new()).unwrap();
    assert_eq!(inputs.value("x"), json!(null));
}

#[test]
fn context_path_walks_nested_maps() {
    let mut ctx = Context::new();
    ctx.insert("user", json!({"address": {"city": "Quito"}}));

    let mut spec = InputSpec::default();
    spec.insert("city".into(),
                InputSource::ContextPath(vec!["user".into(), "address".into(), "city".into()]));
    spec.insert("zip".into(),
                InputSource::ContextPath(vec!["user".into(), "address".into(), "zip".into()]));

    let inputs = resolve_inputs(&spec, &ctx, &System::new()).unwrap();
    assert_eq!(inputs.value("city"), json!("Quito"));
    assert_eq!(inputs.value("zip"), json!(null));
}

#[test]
fn context_fn_receives_whole_context() {
    let mut ctx = Context::new();
    ctx.insert("a", json!(2));
    ctx.insert("b", json!(3));

    let mut spec = InputSpec::default();
    spec.insert("sum".into(),
                InputSource::ContextFn(Arc::new(|c: &Context| {
                    let a = c.get("a").and_then(|v| v.as_i64()).unwrap_or(0);
                    let b = c.get("b").and_then(|v| v.as_i64()).unwrap_or(0);
                    Ok(json!(a + b))
                })));

    let inputs = resolve_inputs(&spec, &ctx, &System::new()).unwrap();
    assert_eq!(inputs.value("sum"), json!(5));
}

#[test]
fn context_fn_error_propagates_as_step_error() {
    let mut spec = InputSpec::default();
    spec.insert("boom".into(),
                InputSource::ContextFn(Arc::new(|_c: &Context| {
                    Err(EngineError::ContextFn("lookup exploded".into()))
                })));

    let err = resolve_inputs(&spec, &Context::new(), &System::new()).unwrap_err();
    assert_eq!(err, EngineError::ContextFn("lookup exploded".into()));
}

#[test]
fn override_merge_is_shallow_and_override_wins() {
    let mut base = InputSpec::default();
    base.insert("keep".into(), InputSource::Literal(json!("base")));
    base.insert("replace".into(), InputSource::Literal(json!("base")));

    let mut overrides = InputSpec::default();
    overrides.insert("replace".into(), InputSource::Literal(json!("bound")));
    overrides.insert("extra".into(), InputSource::Literal(json!("new")));

    let merged = merge_input_spec(&base, &overrides);
    let inputs = resolve_inputs(&merged, &Context::new(), &System::new()).unwrap();
    assert_eq!(inputs.value("keep"), json!("base"));
    assert_eq!(inputs.value("replace"), json!("bound"));
    assert_eq!(inputs.value("extra"), json!("new"));
}
