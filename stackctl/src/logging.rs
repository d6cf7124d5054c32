use std::io::IsTerminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr so orchestrator output on stdout stays clean.
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "stackctl=debug"
    } else {
        "stackctl=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
