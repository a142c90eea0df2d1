//! Descubrimiento: selección de tests por tag de metadatos o por patrón
//! sobre el título.

use regex::Regex;

use crate::case::TestCase;
use crate::errors::EngineError;

/// Predicado de selección (conjunto cerrado de variantes).
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Coincide si el test declara exactamente este tag.
    Tag(String),
    /// Coincide si el patrón encuentra match en el título del test.
    Pattern(Regex),
}

impl Matcher {
    pub fn tag(tag: impl Into<String>) -> Self {
        Matcher::Tag(tag.into())
    }

    /// Un patrón mal formado es un error de configuración de suite: falla
    /// en la construcción, nunca durante la ejecución.
    pub fn pattern(pattern: &str) -> Result<Self, EngineError> {
        Regex::new(pattern).map(Matcher::Pattern)
                           .map_err(|e| EngineError::InvalidPattern(e.to_string()))
    }

    pub fn matches(&self, test: &TestCase) -> bool {
        match self {
            Matcher::Tag(tag) => test.has_tag(tag),
            Matcher::Pattern(re) => re.is_match(&test.title),
        }
    }
}

/// Filtra la colección preservando el orden de declaración. Secuencia
/// perezosa y finita; re-iterable desde la colección de origen.
pub fn find_tests<'a>(all_tests: &'a [TestCase], matcher: &'a Matcher) -> impl Iterator<Item = &'a TestCase> {
    all_tests.iter().filter(move |t| matcher.matches(t))
}
