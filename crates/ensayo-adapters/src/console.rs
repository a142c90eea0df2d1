//! Reporter de consola: render mínimo del stream de eventos en stdout.
//! Puramente observacional; el render legible queda fuera del core.

use ensayo_core::{Outcome, Reporter, RunEvent, RunEventKind};

#[derive(Debug, Default)]
pub struct ConsoleReporter;

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pass => "PASS",
        Outcome::Fail => "FAIL",
        Outcome::Error => "ERROR",
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&mut self, event: &RunEvent) {
        match &event.kind {
            RunEventKind::SuiteStarted { test_count } => {
                println!("running {test_count} test(s)");
            }
            RunEventKind::TestStarted { title, .. } => {
                println!("test {title} ...");
            }
            RunEventKind::StepStarted { .. } => {}
            RunEventKind::StepFinished { name, outcome, error, .. } => match error {
                Some(e) => println!("  step {name}: {} ({e})", outcome_label(*outcome)),
                None => println!("  step {name}: {}", outcome_label(*outcome)),
            },
            RunEventKind::CleanupReleased { kind, key, error, .. } => match error {
                Some(e) => println!("  cleanup {kind} {key}: ERROR ({e})"),
                None => println!("  cleanup {kind} {key}: ok"),
            },
            RunEventKind::TestFinished { title, outcome, .. } => {
                println!("test {title}: {}", outcome_label(*outcome));
            }
            RunEventKind::SuiteFinished { passed, failed, errored } => {
                println!("suite: {passed} passed, {failed} failed, {errored} errored");
            }
        }
    }
}
