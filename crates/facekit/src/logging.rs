//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr so stdout carries nothing but the JSON results.
//! Our own crates log at the configured level; dependencies (reqwest, hyper,
//! rustls) stay at `warn` unless `RUST_LOG` says otherwise.

use facekit_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Filter directives for `level`, scoped to the facekit crates.
///
/// Unknown levels fall back to `info`.
fn directives(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    let level = if LEVELS.contains(&level.as_str()) {
        level.as_str()
    } else {
        "info"
    };
    format!("warn,facekit={level},facekit_core={level}")
}

/// Install the global subscriber.
///
/// `--verbose` forces `debug` unless the config already asks for `trace`;
/// `--json-logs` forces JSON output.
pub fn init(logging: &LoggingConfig, verbose: bool, json_logs: bool) {
    let level = match logging.level.as_str() {
        "trace" => "trace",
        _ if verbose => "debug",
        other => other,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_scope_level_to_facekit() {
        assert_eq!(
            directives("debug"),
            "warn,facekit=debug,facekit_core=debug"
        );
        assert_eq!(directives(" TRACE "), "warn,facekit=trace,facekit_core=trace");
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(directives("loud"), "warn,facekit=info,facekit_core=info");
    }
}
