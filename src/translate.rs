//! Event-to-page translation
//!
//! Composes the three leaves into one [`PagingDirective`]: function-code
//! selection (total), capcode resolution (fallible), payload formatting
//! (total, given the code). Pure: no side effects, no logging.

use crate::capcode;
use crate::config::BridgeConfig;
use crate::error::TranslateError;
use crate::event::Notification;
use crate::function_code::FunctionCode;
use crate::payload::format_payload;

/// One fully-resolved page, ready for the transmitter.
///
/// A directive is only ever built with a resolved capcode; resolution
/// failure aborts construction rather than producing a partial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingDirective {
    /// Recipient pager address.
    pub capcode: u32,
    /// Alert behavior selector.
    pub function_code: FunctionCode,
    /// Text line handed to the transmitter.
    pub payload: String,
    /// Carrier frequency in Hz, from configuration.
    pub frequency_hz: u64,
    /// Transmission repeat count, from configuration.
    pub repeat_count: u32,
}

impl PagingDirective {
    /// The line written to the transmitter's stdin, leading space included.
    #[must_use]
    pub fn stdin_line(&self) -> String {
        format!(" {}:{}", self.capcode, self.payload)
    }
}

/// Translate one event into a paging directive.
///
/// # Errors
///
/// Propagates [`TranslateError::NoCapcode`] from capcode resolution; this
/// is fatal for the current event only.
pub fn translate(
    event: &Notification,
    config: &BridgeConfig,
) -> Result<PagingDirective, TranslateError> {
    let function_code = FunctionCode::select(event, config);
    let capcode = capcode::resolve(event, config)?;
    let payload = format_payload(event, function_code, config, capcode.source);

    Ok(PagingDirective {
        capcode: capcode.value,
        function_code,
        payload,
        frequency_hz: config.frequency_hz,
        repeat_count: config.repeat_count,
    })
}
