//! System: la colección de dependencias externas con ciclo de vida
//! gestionado, y el wrapper `Unbuilt -> Started -> Stopped`.
//!
//! El System es propiedad exclusiva del wrapper durante un test: los steps
//! sólo lo leen (lookup de componentes por clave), nunca lo mutan. Cada
//! test construye y arranca un System fresco a partir del constructor
//! provisto por el caller del Runner.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::EngineError;

/// Dependencia externa con nombre dentro del System.
///
/// `start`/`stop` son no-ops por defecto: muchos componentes (valores de
/// configuración, fakes en memoria) no tienen ciclo de vida propio.
/// `as_any` permite a los steps recuperar el tipo concreto por downcast.
pub trait Component: Any + Send + Sync {
    fn start(&self) -> Result<(), EngineError> {
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

/// Constructor de System provisto por el caller: configuración -> System.
/// Debe soportar ser invocado una vez por test.
pub type SystemConstructor = dyn Fn(&Value) -> Result<System, EngineError> + Send + Sync;

/// Colección ordenada de componentes. El orden de inserción es semántico:
/// arranque en orden declarado, parada en orden inverso.
#[derive(Default)]
pub struct System {
    components: IndexMap<String, Arc<dyn Component>>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un componente bajo la clave dada (estilo builder).
    pub fn with_component(mut self, key: impl Into<String>, component: Arc<dyn Component>) -> Self {
        self.components.insert(key.into(), component);
        self
    }

    /// Lookup por clave. Devuelve un handle compartido al componente.
    pub fn component(&self, key: &str) -> Option<Arc<dyn Component>> {
        self.components.get(key).cloned()
    }

    /// Lookup tipado: downcast al tipo concreto del componente.
    pub fn component_as<T: Component>(&self, key: &str) -> Option<&T> {
        self.components.get(key).and_then(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Arranca los componentes en orden de inserción. Si uno falla, los ya
    /// arrancados se detienen en orden inverso y el arranque completo se
    /// reporta como `StartFailed`.
    pub fn start(&self) -> Result<(), EngineError> {
        let mut started: Vec<&str> = Vec::with_capacity(self.components.len());
        for (key, component) in &self.components {
            debug!(component = %key, "starting component");
            if let Err(e) = guarded(|| component.start()) {
                warn!(component = %key, error = %e, "component failed to start, rolling back");
                for rollback_key in started.iter().rev() {
                    if let Some(c) = self.components.get(*rollback_key) {
                        if let Err(stop_err) = guarded(|| c.stop()) {
                            warn!(component = %rollback_key, error = %stop_err,
                                  "rollback stop failed");
                        }
                    }
                }
                return Err(EngineError::StartFailed(format!("{key}: {e}")));
            }
            started.push(key);
        }
        Ok(())
    }

    /// Detiene todos los componentes en orden inverso. Los fallos se
    /// recolectan por componente; nunca abortan la parada del resto.
    pub fn stop(&self) -> Vec<(String, EngineError)> {
        let mut errors = Vec::new();
        for (key, component) in self.components.iter().rev() {
            debug!(component = %key, "stopping component");
            if let Err(e) = guarded(|| component.stop()) {
                warn!(component = %key, error = %e, "component failed to stop");
                errors.push((key.clone(), EngineError::StopFailed(format!("{key}: {e}"))));
            }
        }
        errors
    }
}

/// Intercepta pánicos de un `start`/`stop` de componente y los normaliza a
/// error; las implementaciones de Component son código del host y pueden
/// entrar en pánico igual que cualquier closure del usuario.
fn guarded(call: impl FnOnce() -> Result<(), EngineError>) -> Result<(), EngineError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(panic) => Err(EngineError::Internal(crate::runner::panic_message(&*panic))),
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
         .field("components", &self.components.keys().collect::<Vec<_>>())
         .finish()
    }
}

/// Wrapper del ciclo de vida: encapsula la transición `Unbuilt -> Started`.
///
/// La transición `Started -> Stopped` la ejecuta el Runner de forma
/// incondicional tras el drain de cleanups, en todos los caminos de salida
/// (los pánicos dentro de un step se interceptan en la frontera del step,
/// por lo que ningún unwind escapa antes de la parada).
pub struct SystemLifecycle<'a> {
    constructor: &'a SystemConstructor,
}

impl<'a> SystemLifecycle<'a> {
    pub fn new(constructor: &'a SystemConstructor) -> Self {
        Self { constructor }
    }

    /// `Unbuilt -> Started`: construye el System con la configuración dada
    /// y lo arranca. Cualquier fallo aquí implica que el System nunca llegó
    /// a Started: no se intenta parada alguna.
    pub fn build_and_start(&self, config: &Value) -> Result<System, EngineError> {
        let system = (self.constructor)(config).map_err(|e| match e {
                                                   EngineError::StartFailed(m) => EngineError::StartFailed(m),
                                                   other => EngineError::StartFailed(other.to_string()),
                                               })?;
        system.start()?;
        Ok(system)
    }
}
