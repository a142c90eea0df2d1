//! Ubicación de fuente para definiciones de Step y TestCase.

use serde::{Deserialize, Serialize};

/// Archivo y línea donde se definió un Step o un TestCase. Metadato de
/// reporte, no participa en la ejecución.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    /// Captura la ubicación del caller. Los constructores de `Step` y
    /// `TestCase` están anotados con `#[track_caller]`, por lo que la
    /// ubicación registrada es la del sitio de definición.
    #[track_caller]
    pub fn capture() -> Self {
        let loc = std::panic::Location::caller();
        Self { file: loc.file().to_string(), line: loc.line() }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
