//! Transmit sink
//!
//! Hands a directive to the external signal generator. One child process
//! per page: spawned argv-style (never through a shell), fed the page
//! line on stdin, then allowed to run to completion. Its stdout/stderr
//! are not inspected; delivery is fire-and-forget.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::TransmitError;
use crate::translate::PagingDirective;

/// Default transmitter binary (rpitx's POCSAG encoder).
pub const DEFAULT_PROGRAM: &str = "pocsag";

/// Consumer of paging directives.
///
/// The bridge is generic over this seam so tests can record directives
/// instead of keying a radio.
#[async_trait]
pub trait TransmitSink {
    async fn transmit(&self, directive: &PagingDirective) -> Result<(), TransmitError>;
}

/// Sink that invokes the `pocsag` process per directive.
#[derive(Debug, Clone)]
pub struct PocsagTransmitter {
    program: String,
}

impl PocsagTransmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a different transmitter binary, e.g. a wrapper script.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Argument vector for one directive: frequency, repeat count,
    /// function code, all decimal.
    fn build_args(directive: &PagingDirective) -> [String; 6] {
        [
            "-f".to_string(),
            directive.frequency_hz.to_string(),
            "-t".to_string(),
            directive.repeat_count.to_string(),
            "-b".to_string(),
            directive.function_code.as_u8().to_string(),
        ]
    }
}

impl Default for PocsagTransmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransmitSink for PocsagTransmitter {
    async fn transmit(&self, directive: &PagingDirective) -> Result<(), TransmitError> {
        let mut child = Command::new(&self.program)
            .args(Self::build_args(directive))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TransmitError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(directive.stdin_line().as_bytes()).await {
                Ok(()) => {}
                // A child that exits before reading its stdin is not a
                // transmit failure; its exit status is not inspected either.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(program = %self.program, "transmitter closed stdin early");
                }
                Err(e) => {
                    return Err(TransmitError::StdinWrite {
                        program: self.program.clone(),
                        source: e,
                    });
                }
            }
            // Dropping closes stdin so the child sees EOF and encodes.
        }

        let status = child.wait().await.map_err(|e| TransmitError::Wait {
            program: self.program.clone(),
            source: e,
        })?;
        debug!(program = %self.program, exit = ?status.code(), "transmitter finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function_code::FunctionCode;

    fn directive() -> PagingDirective {
        PagingDirective {
            capcode: 1234,
            function_code: FunctionCode::AlphaOverride,
            payload: "door open".to_string(),
            frequency_hz: 915_000_000,
            repeat_count: 1,
        }
    }

    #[test]
    fn args_are_decimal_frequency_tries_and_code() {
        let args = PocsagTransmitter::build_args(&directive());
        assert_eq!(args, ["-f", "915000000", "-t", "1", "-b", "2"]);
    }

    #[tokio::test]
    async fn runs_the_child_to_completion() {
        // `true` stands in for the transmitter: ignores args, exits 0.
        // An early exit before reading stdin must not fail the transmit.
        let sink = PocsagTransmitter::with_program("true");
        sink.transmit(&directive()).await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let sink = PocsagTransmitter::with_program("definitely-not-a-real-binary");
        let err = sink.transmit(&directive()).await.unwrap_err();
        assert!(matches!(err, TransmitError::Spawn { .. }));
    }
}
