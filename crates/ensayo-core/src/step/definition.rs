//! Plantilla de Step y su regla de composición bind/override.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::EngineError;
use crate::model::SourceLocation;
use crate::output::OutputSpec;
use crate::resolve::{merge_input_spec, InputSource, InputSpec};
use crate::step::{instance::StepInstance, StepCtx};

/// Procedimiento de test de un step: recibe el StepCtx (inputs resueltos,
/// primitivo de chequeo, registro de cleanups) y devuelve el valor
/// resultado que el registrar de outputs plegará en el Context.
pub type StepFn = Arc<dyn Fn(&mut StepCtx<'_>) -> Result<Value, EngineError> + Send + Sync>;

/// Unidad de lógica de test reusable, con inputs y outputs declarados.
/// Inmutable una vez definida; se liga en el sitio de uso con `bind`.
#[derive(Clone)]
pub struct Step {
    pub name: String,
    pub title: String,
    pub description: String,
    pub inputs: InputSpec,
    pub output: OutputSpec,
    pub test: StepFn,
    pub source: SourceLocation,
}

impl Step {
    /// Define un step con su procedimiento. Título por defecto = nombre;
    /// la ubicación de fuente se captura del sitio de definición.
    #[track_caller]
    pub fn new(name: impl Into<String>, test: StepFn) -> Self {
        let name = name.into();
        Self { title: name.clone(),
               name,
               description: String::new(),
               inputs: InputSpec::default(),
               output: OutputSpec::Ignore,
               test,
               source: SourceLocation::capture() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declara un input por defecto de la plantilla.
    pub fn with_input(mut self, key: impl Into<String>, source: InputSource) -> Self {
        self.inputs.insert(key.into(), source);
        self
    }

    pub fn with_output(mut self, output: OutputSpec) -> Self {
        self.output = output;
        self
    }

    /// Liga la plantilla con overrides de uso: inputs se mergean clave por
    /// clave sobre los defaults (gana el override), el output reemplaza la
    /// especificación completa, el título reemplaza al de la plantilla.
    pub fn bind(&self, binding: Binding) -> StepInstance {
        StepInstance { name: self.name.clone(),
                       title: binding.title.unwrap_or_else(|| self.title.clone()),
                       description: self.description.clone(),
                       inputs: merge_input_spec(&self.inputs, &binding.inputs),
                       output: binding.output.unwrap_or_else(|| self.output.clone()),
                       test: self.test.clone(),
                       source: self.source.clone() }
    }

    /// Instancia con el binding vacío (defaults de la plantilla).
    pub fn instance(&self) -> StepInstance {
        self.bind(Binding::default())
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
         .field("name", &self.name)
         .field("title", &self.title)
         .field("inputs", &self.inputs)
         .field("output", &self.output)
         .field("source", &self.source)
         .finish_non_exhaustive()
    }
}

/// Overrides opcionales aplicados al ligar una plantilla en un test.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub inputs: InputSpec,
    pub output: Option<OutputSpec>,
    pub title: Option<String>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, key: impl Into<String>, source: InputSource) -> Self {
        self.inputs.insert(key.into(), source);
        self
    }

    pub fn output(mut self, output: OutputSpec) -> Self {
        self.output = Some(output);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
