//! Clasificación pass/fail/error de steps y tests.

use serde::{Deserialize, Serialize};

/// Outcome de un step o de un test.
///
/// - `Fail`: al menos un chequeo reportó fallo y ninguna excepción escapó.
/// - `Error`: una excepción/pánico no capturado escapó del step (incluye
///   fallos de resolución de inputs y de arranque del System).
/// - `Pass`: en cualquier otro caso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pass => f.write_str("pass"),
            Outcome::Fail => f.write_str("fail"),
            Outcome::Error => f.write_str("error"),
        }
    }
}
