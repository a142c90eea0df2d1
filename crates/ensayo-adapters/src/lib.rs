//! ensayo-adapters: colaboradores host para el motor.
//!
//! Componentes de demostración en memoria (sin IO externo), handlers de
//! cleanup para sus kinds de recurso, una librería de steps reusables y un
//! reporter de consola. Ejercitan cada costura de extensión del core.

pub mod components;
pub mod console;
pub mod handlers;
pub mod steps;

pub use components::{FakeDb, FakeQueue};
pub use console::ConsoleReporter;
pub use handlers::register_demo_handlers;
pub use steps::{demo_suite, demo_system};
