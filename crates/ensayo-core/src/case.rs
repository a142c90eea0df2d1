//! TestCase: composición ordenada de instancias de step que comparten un
//! Context y un System durante una ejecución.

use crate::model::SourceLocation;
use crate::step::StepInstance;

/// Definición inmutable de un test. El orden de `steps` es el orden de
/// ejecución; los `tags` son los metadatos que consulta el matcher.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub steps: Vec<StepInstance>,
    pub source: SourceLocation,
}

impl TestCase {
    #[track_caller]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(),
               description: String::new(),
               tags: Vec::new(),
               steps: Vec::new(),
               source: SourceLocation::capture() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_step(mut self, step: StepInstance) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = StepInstance>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
