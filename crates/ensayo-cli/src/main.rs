//! CLI mínima sobre la suite demo:
//! `ensayo [--tag <TAG> | --match <PATTERN>] [--list]`
//!
//! El core nunca falla el proceso por tests fallidos; es este wrapper el
//! que mapea el resumen booleano de la suite a un exit code distinto de
//! cero.

use ensayo_adapters::{demo_suite, demo_system, register_demo_handlers, ConsoleReporter};
use ensayo_core::{find_tests, Matcher, Runner, TestCase};
use once_cell::sync::Lazy;
use serde_json::json;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

fn usage() -> ! {
    eprintln!("uso: ensayo [--tag <TAG> | --match <PATTERN>] [--list]");
    std::process::exit(2);
}

fn main() {
    Lazy::force(&DOTENV_LOADED);
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                             .init();

    let args: Vec<String> = std::env::args().collect();
    let mut matcher: Option<Matcher> = None;
    let mut list_only = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tag" => {
                i += 1;
                if i >= args.len() {
                    usage();
                }
                matcher = Some(Matcher::tag(args[i].clone()));
            }
            "--match" => {
                i += 1;
                if i >= args.len() {
                    usage();
                }
                match Matcher::pattern(&args[i]) {
                    Ok(m) => matcher = Some(m),
                    Err(e) => {
                        // matcher mal formado: error de configuración de
                        // suite, no un outcome de test
                        eprintln!("[ensayo] {e}");
                        std::process::exit(2);
                    }
                }
            }
            "--list" => list_only = true,
            other => {
                eprintln!("[ensayo] argumento desconocido: {other}");
                usage();
            }
        }
        i += 1;
    }

    let all_tests = demo_suite();
    let selected: Vec<TestCase> = match &matcher {
        Some(m) => find_tests(&all_tests, m).cloned().collect(),
        None => all_tests,
    };

    if list_only {
        for test in &selected {
            let tags = test.tags.join(", ");
            println!("{} [{}] ({})", test.title, tags, test.source);
        }
        return;
    }

    let mut runner = Runner::with_reporter(ConsoleReporter);
    register_demo_handlers(runner.registry_mut());

    let suite = runner.run_suite(&demo_system, &selected, &json!({}));
    if !suite.all_passed() {
        std::process::exit(1);
    }
}
