//! Pruebas del registrar de outputs: las cuatro especificaciones y el
//! chequeo de aridad posicional.

use std::sync::Arc;

use ensayo_core::{register_output, Context, EngineError, OutputSpec};
use serde_json::json;

#[test]
fn ignore_leaves_context_unchanged() {
    let mut ctx = Context::new();
    ctx.insert("prior", json!(1));

    let next = register_output(&OutputSpec::Ignore, &ctx, &json!("result")).unwrap();
    assert_eq!(next, ctx);
}

#[test]
fn single_key_binds_result() {
    let next = register_output(&OutputSpec::Key("foo".into()), &Context::new(), &json!(1)).unwrap();
    assert_eq!(next.get("foo"), Some(&json!(1)));
}

#[test]
fn key_sequence_binds_positionally() {
    let spec = OutputSpec::Keys(vec!["a".into(), "b".into(), "c".into()]);
    let next = register_output(&spec, &Context::new(), &json!([1, 2, 3])).unwrap();
    assert_eq!(next.get("a"), Some(&json!(1)));
    assert_eq!(next.get("b"), Some(&json!(2)));
    assert_eq!(next.get("c"), Some(&json!(3)));
}

#[test]
fn arity_mismatch_is_an_error_never_a_partial_bind() {
    let spec = OutputSpec::Keys(vec!["a".into(), "b".into()]);
    let err = register_output(&spec, &Context::new(), &json!([1, 2, 3])).unwrap_err();
    assert_eq!(err, EngineError::OutputArity { expected: 2, got: 3 });
}

#[test]
fn scalar_result_with_key_sequence_is_an_error() {
    let spec = OutputSpec::Keys(vec!["a".into()]);
    let err = register_output(&spec, &Context::new(), &json!(42)).unwrap_err();
    assert_eq!(err, EngineError::OutputNotSequence);
}

#[test]
fn apply_is_a_total_override_not_a_merge() {
    let mut ctx = Context::new();
    ctx.insert("dropped", json!(true));

    // La función devuelve un Context nuevo sin preservar claves previas.
    let spec = OutputSpec::Apply(Arc::new(|_prior: &Context, result: &serde_json::Value| {
        let mut next = Context::new();
        next.insert("only", result.clone());
        Ok(next)
    }));

    let next = register_output(&spec, &ctx, &json!("v")).unwrap();
    assert_eq!(next.get("only"), Some(&json!("v")));
    assert!(next.get("dropped").is_none());
}
