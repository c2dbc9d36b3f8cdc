pub mod assemble;
pub mod build;
pub mod compile;
pub mod run;
pub mod translate;

use std::path::Path;
use std::process;

use jackc::diagnostic::Diagnostic;
use jackc::SourceUnit;

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Report a diagnostic that was not rendered against source and exit.
fn exit_with(diag: Diagnostic) -> ! {
    eprintln!("error: {}", diag.message);
    process::exit(1);
}

pub fn load_units(input: &Path, extension: &str) -> Vec<SourceUnit> {
    jackc::pipeline::load_units(input, extension).unwrap_or_else(|d| exit_with(d))
}

pub fn write_output(path: &Path, contents: &str) {
    if let Err(d) = jackc::pipeline::write_output(path, contents) {
        exit_with(d);
    }
}

/// Diagnostics were already rendered by the API; only summarize.
fn exit_with_errors(count: usize) -> ! {
    eprintln!(
        "error: aborting due to {} previous error{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    process::exit(1);
}
