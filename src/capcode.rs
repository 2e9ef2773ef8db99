//! Capcode resolution
//!
//! The recipient capcode is buried in partially-structured event fields.
//! Resolution is an ordered search over independent strategies, first
//! success wins:
//!
//! 1. the title, when `use_title_capcode` is enabled and it is numeric;
//! 2. the text left of the first `:` in the message, supporting the
//!    `"<CODE>:<TEXT>"` framing convention;
//! 3. the configured fallback capcode.
//!
//! The winning strategy is reported alongside the value: the formatter
//! must know which field was consumed as the address so it does not
//! duplicate it into the visible text.
//!
//! When all three fail the event is untranslatable
//! ([`TranslateError::NoCapcode`]); that aborts the current event only,
//! never the stream.

use crate::config::BridgeConfig;
use crate::error::TranslateError;
use crate::event::Notification;

/// Which field yielded the capcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapcodeSource {
    /// Numeric title.
    Title,
    /// `<CODE>:` prefix of the message.
    MessagePrefix,
    /// Configured fallback.
    Default,
}

/// A resolved pager address and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCapcode {
    pub value: u32,
    pub source: CapcodeSource,
}

/// Resolve the recipient capcode for an event.
///
/// # Errors
///
/// Returns [`TranslateError::NoCapcode`] when no strategy yields a
/// parseable integer.
pub fn resolve(
    event: &Notification,
    config: &BridgeConfig,
) -> Result<ResolvedCapcode, TranslateError> {
    let strategies: [fn(&Notification, &BridgeConfig) -> Option<ResolvedCapcode>; 3] =
        [from_title, from_message_prefix, from_default];

    strategies
        .iter()
        .find_map(|strategy| strategy(event, config))
        .ok_or(TranslateError::NoCapcode)
}

/// Numeric title, when the configuration says titles address the pager.
fn from_title(event: &Notification, config: &BridgeConfig) -> Option<ResolvedCapcode> {
    if !config.use_title_capcode {
        return None;
    }
    let value = event.title.as_deref()?.parse().ok()?;
    Some(ResolvedCapcode {
        value,
        source: CapcodeSource::Title,
    })
}

/// Leading `<CODE>:` prefix of the message, e.g. `1234:door open`.
///
/// An absent message is treated as empty, which simply fails to parse;
/// a message without `:` is tried whole, matching the framing convention
/// where the text left of the first `:` is the entire string.
fn from_message_prefix(event: &Notification, _config: &BridgeConfig) -> Option<ResolvedCapcode> {
    let message = event.message_or_empty();
    let prefix = message.split(':').next().unwrap_or("");
    let value = prefix.parse().ok()?;
    Some(ResolvedCapcode {
        value,
        source: CapcodeSource::MessagePrefix,
    })
}

fn from_default(_event: &Notification, config: &BridgeConfig) -> Option<ResolvedCapcode> {
    config.default_capcode.map(|value| ResolvedCapcode {
        value,
        source: CapcodeSource::Default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(title: Option<&str>, message: Option<&str>) -> Notification {
        Notification {
            priority: None,
            message: message.map(String::from),
            title: title.map(String::from),
        }
    }

    fn resolved(value: u32, source: CapcodeSource) -> ResolvedCapcode {
        ResolvedCapcode { value, source }
    }

    #[test]
    fn numeric_title_wins_when_enabled() {
        let cfg = BridgeConfig::new("t");
        let event = notification(Some("1234"), Some("5678:text"));
        assert_eq!(
            resolve(&event, &cfg),
            Ok(resolved(1234, CapcodeSource::Title))
        );
    }

    #[test]
    fn title_ignored_when_disabled() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(Some("1234"), Some("5678:text"));
        assert_eq!(
            resolve(&event, &cfg),
            Ok(resolved(5678, CapcodeSource::MessagePrefix))
        );
    }

    #[test]
    fn non_numeric_title_falls_through_to_message_prefix() {
        let cfg = BridgeConfig::new("t");
        let event = notification(Some("alerts"), Some("9999:Low battery"));
        assert_eq!(
            resolve(&event, &cfg),
            Ok(resolved(9999, CapcodeSource::MessagePrefix))
        );
    }

    #[test]
    fn bare_numeric_message_counts_as_prefix() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(None, Some("4242"));
        assert_eq!(
            resolve(&event, &cfg),
            Ok(resolved(4242, CapcodeSource::MessagePrefix))
        );
    }

    #[test]
    fn absent_message_does_not_panic() {
        let mut cfg = BridgeConfig::new("t");
        cfg.default_capcode = Some(7);
        let event = notification(None, None);
        assert_eq!(resolve(&event, &cfg), Ok(resolved(7, CapcodeSource::Default)));
    }

    #[test]
    fn default_is_last_resort() {
        let mut cfg = BridgeConfig::new("t");
        cfg.default_capcode = Some(42);
        let event = notification(Some("alerts"), Some("hi"));
        assert_eq!(
            resolve(&event, &cfg),
            Ok(resolved(42, CapcodeSource::Default))
        );
    }

    #[test]
    fn no_capcode_when_everything_fails() {
        let cfg = BridgeConfig::new("t");
        let event = notification(None, None);
        assert_eq!(resolve(&event, &cfg), Err(TranslateError::NoCapcode));

        let event = notification(Some("alerts"), Some("no prefix here"));
        assert_eq!(resolve(&event, &cfg), Err(TranslateError::NoCapcode));
    }
}
