//! StepCtx: la vista que un procedimiento de step tiene del motor.
//!
//! El registro de cleanups y el recorder de chequeos se entregan como
//! parámetro explícito (nunca estado global mutable) para mantener la
//! ejecución del step referencialmente transparente y testeable aislada.

use serde_json::Value;

use crate::check::{CheckEvent, CheckRecorder, CheckStatus};
use crate::cleanup::CleanupStack;
use crate::errors::EngineError;
use crate::model::{ResolvedInput, StepInputs};
use crate::system::Component;

pub struct StepCtx<'a> {
    inputs: &'a StepInputs,
    checks: &'a mut CheckRecorder,
    cleanup: &'a mut CleanupStack,
}

impl<'a> StepCtx<'a> {
    pub(crate) fn new(inputs: &'a StepInputs,
                      checks: &'a mut CheckRecorder,
                      cleanup: &'a mut CleanupStack)
                      -> Self {
        Self { inputs, checks, cleanup }
    }

    pub fn inputs(&self) -> &StepInputs {
        self.inputs
    }

    /// Valor JSON de un input resuelto. Ausente => `Null`.
    pub fn input(&self, key: &str) -> Value {
        self.inputs.value(key)
    }

    pub fn raw_input(&self, key: &str) -> Option<&ResolvedInput> {
        self.inputs.get(key)
    }

    /// Componente tipado del System, resuelto vía la especificación de
    /// inputs del step.
    pub fn component<T: Component>(&self, key: &str) -> Result<&T, EngineError> {
        self.inputs.component::<T>(key)
    }

    /// Primitivo de aserción: emite un `CheckEvent` hacia el colaborador
    /// externo. No corta la ejecución del step.
    pub fn check(&mut self, passed: bool, expected: Value, actual: Value, message: impl Into<String>) {
        let status = if passed { CheckStatus::Passed } else { CheckStatus::Failed };
        self.checks.record(CheckEvent { status, expected, actual, message: message.into() });
    }

    /// Aserción de igualdad sobre valores JSON.
    pub fn check_eq(&mut self, expected: Value, actual: Value, message: impl Into<String>) {
        let passed = expected == actual;
        self.checks.record(CheckEvent { status: if passed { CheckStatus::Passed } else { CheckStatus::Failed },
                                        expected,
                                        actual,
                                        message: message.into() });
    }

    /// Registra una obligación de teardown `(kind, key)`. Se libera en
    /// orden inverso al cierre del test, sea cual sea el outcome.
    pub fn register_cleanup(&mut self, kind: impl Into<String>, key: Value) {
        self.cleanup.register(kind, key);
    }
}
