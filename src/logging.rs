//! Logging setup
//!
//! Structured logging via `tracing`. The verbosity comes from `LOG_LEVEL`
//! (error, warn/warning, info, debug), with `RUST_LOG` taking precedence
//! when set so operators keep full env-filter control.

use tracing_subscriber::EnvFilter;

/// Map a `LOG_LEVEL` name to an env-filter directive.
///
/// Unknown names fall back to `info` rather than failing startup.
#[must_use]
pub fn level_directive(name: &str) -> &'static str {
    match name.to_ascii_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "debug" => "debug",
        _ => "info",
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise the `LOG_LEVEL` mapping is used.
/// Safe to call once per process.
pub fn init(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_named_level_maps_distinctly() {
        assert_eq!(level_directive("error"), "error");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive("warn"), "warn");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("debug"), "debug");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_directive("chatty"), "info");
        assert_eq!(level_directive(""), "info");
    }
}
