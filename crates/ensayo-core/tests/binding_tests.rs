//! Pruebas de composición bind/override: merge de inputs clave por clave,
//! reemplazo total del output spec y override de título.

use std::sync::Arc;

use ensayo_core::{Binding, InputSource, Outcome, OutputSpec, Runner, Step, StepCtx, System, TestCase};
use serde_json::json;

fn echo_step() -> Step {
    Step::new("echo", Arc::new(|ctx: &mut StepCtx<'_>| Ok(ctx.input("value"))))
        .with_title("echo the configured value")
        .with_input("value", InputSource::Literal(json!("default")))
        .with_output(OutputSpec::Key("echoed".into()))
}

fn empty_system(_config: &serde_json::Value) -> Result<System, ensayo_core::EngineError> {
    Ok(System::new())
}

#[test]
fn default_binding_uses_template_spec() {
    let instance = echo_step().instance();
    assert_eq!(instance.title, "echo the configured value");
    assert_eq!(instance.inputs.len(), 1);
}

#[test]
fn input_override_wins_key_by_key() {
    let template = echo_step().with_input("extra", InputSource::Literal(json!(1)));
    let instance = template.bind(Binding::new().input("value", InputSource::Literal(json!("bound"))));

    // "extra" sobrevive, "value" queda sobreescrito
    assert_eq!(instance.inputs.len(), 2);
    let test = TestCase::new("bound echo").with_step(instance);
    let mut runner = Runner::new();
    let suite = runner.run_suite(&empty_system, std::slice::from_ref(&test), &json!({}));
    assert_eq!(suite.tests[0].context["echoed"], json!("bound"));
}

#[test]
fn output_override_replaces_wholesale() {
    let instance = echo_step().bind(Binding::new().output(OutputSpec::Key("renamed".into())));
    let test = TestCase::new("renamed output").with_step(instance);

    let mut runner = Runner::new();
    let suite = runner.run_suite(&empty_system, std::slice::from_ref(&test), &json!({}));
    let ctx = &suite.tests[0].context;
    assert_eq!(ctx["renamed"], json!("default"));
    assert!(ctx.get("echoed").is_none());
}

#[test]
fn title_override_replaces_template_title() {
    let instance = echo_step().bind(Binding::new().title("echo for login"));
    assert_eq!(instance.title, "echo for login");
    // el nombre de la plantilla se conserva
    assert_eq!(instance.name, "echo");
}

#[test]
fn same_template_reused_twice_with_different_bindings() {
    let first = echo_step().bind(Binding::new().input("value", InputSource::Literal(json!("uno")))
                                               .output(OutputSpec::Key("first".into())));
    let second = echo_step().bind(Binding::new().input("value", InputSource::Literal(json!("dos")))
                                                .output(OutputSpec::Key("second".into())));

    let test = TestCase::new("reuse").with_step(first).with_step(second);
    let mut runner = Runner::new();
    let suite = runner.run_suite(&empty_system, std::slice::from_ref(&test), &json!({}));

    assert_eq!(suite.tests[0].outcome, Outcome::Pass);
    assert_eq!(suite.tests[0].context["first"], json!("uno"));
    assert_eq!(suite.tests[0].context["second"], json!("dos"));
}
