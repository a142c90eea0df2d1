//! Instancia de step: una plantilla ya ligada, lista para ejecutar dentro
//! de un test. La misma plantilla puede aparecer varias veces en un test
//! (o en varios tests) con bindings distintos; ese es el mecanismo de
//! reuso.

use crate::model::SourceLocation;
use crate::output::OutputSpec;
use crate::resolve::InputSpec;
use crate::step::StepFn;

#[derive(Clone)]
pub struct StepInstance {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Especificación efectiva: defaults de la plantilla con los overrides
    /// del binding ya mergeados.
    pub inputs: InputSpec,
    /// Especificación efectiva de output (el override reemplaza entera).
    pub output: OutputSpec,
    pub test: StepFn,
    pub source: SourceLocation,
}

impl std::fmt::Debug for StepInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepInstance")
         .field("name", &self.name)
         .field("title", &self.title)
         .field("inputs", &self.inputs)
         .field("output", &self.output)
         .finish_non_exhaustive()
    }
}
