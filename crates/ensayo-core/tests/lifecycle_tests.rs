//! Pruebas del wrapper de ciclo de vida: orden de arranque/parada,
//! rollback ante arranque parcial y registro de fallos de parada.

use std::any::Any;
use std::sync::{Arc, Mutex};

use ensayo_core::{Component, EngineError, Outcome, Runner, Step, StepCtx, System, SystemLifecycle, TestCase};
use serde_json::{json, Value};

type Log = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
struct Tracked {
    log: Log,
    name: &'static str,
    fail_start: bool,
    fail_stop: bool,
}

impl Tracked {
    fn arc(log: &Log, name: &'static str) -> Arc<Self> {
        Arc::new(Self { log: log.clone(), name, fail_start: false, fail_stop: false })
    }
}

impl Component for Tracked {
    fn start(&self) -> Result<(), EngineError> {
        if self.fail_start {
            return Err(EngineError::Internal(format!("{} refused to start", self.name)));
        }
        self.log.lock().unwrap().push(format!("start {}", self.name));
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        if self.fail_stop {
            return Err(EngineError::Internal(format!("{} refused to stop", self.name)));
        }
        self.log.lock().unwrap().push(format!("stop {}", self.name));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Componente cuyo ciclo de vida entra en pánico en vez de devolver Err.
#[derive(Debug)]
struct Volatile {
    panic_start: bool,
}

impl Component for Volatile {
    fn start(&self) -> Result<(), EngineError> {
        if self.panic_start {
            panic!("start blew up");
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        panic!("stop blew up")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn components_start_in_order_and_stop_in_reverse() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let system = System::new().with_component("db", Tracked::arc(&log, "db"))
                              .with_component("queue", Tracked::arc(&log, "queue"))
                              .with_component("mail", Tracked::arc(&log, "mail"));

    system.start().unwrap();
    assert!(system.stop().is_empty());

    assert_eq!(*log.lock().unwrap(),
               vec!["start db", "start queue", "start mail", "stop mail", "stop queue", "stop db"]);
}

#[test]
fn partial_start_rolls_back_started_components_in_reverse() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let bad = Arc::new(Tracked { log: log.clone(), name: "queue", fail_start: true, fail_stop: false });
    let system = System::new().with_component("db", Tracked::arc(&log, "db"))
                              .with_component("queue", bad)
                              .with_component("mail", Tracked::arc(&log, "mail"));

    let err = system.start().unwrap_err();
    assert!(matches!(err, EngineError::StartFailed(_)));
    // db se arrancó y se revirtió; mail nunca llegó a arrancar
    assert_eq!(*log.lock().unwrap(), vec!["start db", "stop db"]);
}

#[test]
fn start_panic_is_folded_into_start_failed_with_rollback() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let system = System::new().with_component("db", Tracked::arc(&log, "db"))
                              .with_component("fuse", Arc::new(Volatile { panic_start: true }))
                              .with_component("mail", Tracked::arc(&log, "mail"));

    let err = system.start().unwrap_err();
    assert!(matches!(err, EngineError::StartFailed(_)));
    assert_eq!(*log.lock().unwrap(), vec!["start db", "stop db"]);
}

#[test]
fn stop_panic_is_recorded_and_does_not_abort_the_remaining_stops() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let system = System::new().with_component("db", Tracked::arc(&log, "db"))
                              .with_component("fuse", Arc::new(Volatile { panic_start: false }))
                              .with_component("mail", Tracked::arc(&log, "mail"));

    system.start().unwrap();
    let errors = system.stop();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "fuse");
    assert!(matches!(errors[0].1, EngineError::StopFailed(_)));
    // db se detiene aunque fuse haya entrado en pánico
    assert_eq!(*log.lock().unwrap(), vec!["start db", "start mail", "stop mail", "stop db"]);
}

#[test]
fn build_and_start_wraps_constructor_errors_as_start_failures() {
    let ctor = |_config: &Value| -> Result<System, EngineError> {
        Err(EngineError::Internal("bad config".into()))
    };
    let lifecycle = SystemLifecycle::new(&ctor);
    let err = lifecycle.build_and_start(&json!({})).unwrap_err();
    assert!(matches!(err, EngineError::StartFailed(_)));
}

#[test]
fn constructor_receives_the_config_value() {
    let seen: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let ctor = move |config: &Value| -> Result<System, EngineError> {
        sink.lock().unwrap().push(config["env"].to_string());
        Ok(System::new())
    };

    let lifecycle = SystemLifecycle::new(&ctor);
    lifecycle.build_and_start(&json!({"env": "staging"})).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["\"staging\""]);
}

#[test]
fn stop_failure_is_recorded_but_does_not_fail_a_passing_test() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let ctor_log = log.clone();
    let ctor = move |_config: &Value| -> Result<System, EngineError> {
        let sticky = Arc::new(Tracked { log: ctor_log.clone(),
                                        name: "sticky",
                                        fail_start: false,
                                        fail_stop: true });
        Ok(System::new().with_component("sticky", sticky))
    };

    let step = Step::new("noop", Arc::new(|_ctx: &mut StepCtx<'_>| Ok(json!(null))));
    let test = TestCase::new("pass with dirty stop").with_step(step.instance());

    let mut runner = Runner::new();
    let suite = runner.run_suite(&ctor, std::slice::from_ref(&test), &json!({}));

    let report = &suite.tests[0];
    assert_eq!(report.outcome, Outcome::Pass, "stop failure never flips the outcome");
    assert_eq!(report.stop_errors.len(), 1);
    assert!(matches!(report.stop_errors[0].1, EngineError::StopFailed(_)));
    assert!(suite.all_passed());
}
