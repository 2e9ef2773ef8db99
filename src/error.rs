//! Error types for the bridge
//!
//! The taxonomy mirrors the failure policy: configuration errors are fatal
//! at startup, everything that happens while handling one event is
//! contained inside the consumption loop and only ever drops that event.

use thiserror::Error;

/// Fatal startup errors. The process must not start with a broken surface.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("NTFY_TOPIC must be set")]
    MissingTopic,

    #[error("invalid value for {var}: {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Per-event translation failures. Never fatal for the stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// No capcode could be resolved from title, message prefix, or the
    /// configured default. The directive is never built partially.
    #[error("no capcode: title, message prefix and default all failed to resolve")]
    NoCapcode,
}

/// Failures while handing a directive to the external transmitter.
#[derive(Error, Debug)]
pub enum TransmitError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to {program} stdin: {source}")]
    StdinWrite {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {program} to exit: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
