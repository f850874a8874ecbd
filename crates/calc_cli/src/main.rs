use tracing::Level;

mod eval;
mod repl;

fn main() {
    initialize_tracing();

    let mut repl = repl::Repl::new();
    if let Err(err) = repl.run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Initialize the tracing system for logging.
///
/// `RUST_LOG` selects a plain level name (`debug`, `trace`, ...); anything
/// else, or nothing, keeps the default of `warn` so interactive output
/// stays clean.
fn initialize_tracing() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}
