//! POCSAG function-code selection
//!
//! A function code is a 2-bit selector combining what the pager displays
//! with whether it may break device silence:
//!
//! ```text
//! bit 0 (low)  - content:  0 = alphanumeric page, 1 = tone only
//! bit 1        - alerting: 0 = respect silence,   1 = override and sound
//! ```
//!
//! Selection is pure and total: every event, however sparse, maps to
//! exactly one of the four codes. There is no error path here.

use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::event::Notification;

/// Message-body sentinels meaning "no textual content, alert only".
const TONE_SENTINELS: &[&str] = &["triggered", "tone"];

/// The four POCSAG function codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FunctionCode {
    /// Alphanumeric page, respects device silence.
    Alpha = 0,
    /// Tone-only page, respects device silence.
    Tone = 1,
    /// Alphanumeric page, overrides silence and sounds an alert.
    AlphaOverride = 2,
    /// Tone-only page, overrides silence and sounds an alert.
    ToneOverride = 3,
}

impl FunctionCode {
    /// Select the function code for an event.
    ///
    /// `tone_only` is set when the message is absent or is one of the
    /// sentinel strings (`"triggered"`, `"tone"`, exact match).
    /// `override` is set when the effective priority reaches the
    /// configured silence-override threshold.
    #[must_use]
    pub fn select(event: &Notification, config: &BridgeConfig) -> Self {
        let tone_only = match event.message.as_deref() {
            None | Some("") => true,
            Some(body) => TONE_SENTINELS.contains(&body),
        };
        let override_silence =
            event.effective_priority() >= config.silence_override_threshold;
        Self::from_bits(tone_only, override_silence)
    }

    /// Build a code from its two bits: `(override << 1) | tone_only`.
    #[must_use]
    pub const fn from_bits(tone_only: bool, override_silence: bool) -> Self {
        match (override_silence, tone_only) {
            (false, false) => Self::Alpha,
            (false, true) => Self::Tone,
            (true, false) => Self::AlphaOverride,
            (true, true) => Self::ToneOverride,
        }
    }

    /// Numeric wire value, 0..=3.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Content bit: tone-only pages carry no text.
    #[must_use]
    pub const fn is_tone_only(self) -> bool {
        self.as_u8() & 1 == 1
    }

    /// Alerting bit: whether the page sounds despite device silence.
    #[must_use]
    pub const fn overrides_silence(self) -> bool {
        self.as_u8() & 2 == 2
    }
}

impl std::fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
