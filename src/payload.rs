//! Payload formatting
//!
//! Builds the text line sent to the transmitter. Tone-only codes discard
//! all content. Otherwise the field that served as the pager address is
//! never duplicated into the visible text: a capcode taken from the
//! message's `<CODE>:` prefix leaves only the remainder, and the title is
//! prefixed only when it was not available for consumption as the
//! address.

use crate::capcode::CapcodeSource;
use crate::config::BridgeConfig;
use crate::event::Notification;
use crate::function_code::FunctionCode;

/// Fixed payload for tone-only pages.
pub const TONE_ONLY_PAYLOAD: &str = "[TONE ONLY]";

/// Format the payload for an event given its function code and where the
/// capcode came from.
#[must_use]
pub fn format_payload(
    event: &Notification,
    code: FunctionCode,
    config: &BridgeConfig,
    capcode_source: CapcodeSource,
) -> String {
    if code.is_tone_only() {
        return TONE_ONLY_PAYLOAD.to_string();
    }

    // Strip the address from the text, but only an actual `<CODE>:` prefix;
    // a bare numeric message with no `:` stays visible as the page text.
    let message = match capcode_source {
        CapcodeSource::MessagePrefix => event
            .message_or_empty()
            .split_once(':')
            .map_or(event.message_or_empty(), |(_, rest)| rest),
        _ => event.message_or_empty(),
    };

    match event.title.as_deref() {
        Some(title) if !config.use_title_capcode && !title.is_empty() && !message.is_empty() => {
            format!("{title} - {message}")
        }
        _ => message.to_string(),
    }
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

    #[test]
    fn tone_only_codes_discard_content() {
        let cfg = BridgeConfig::new("t");
        let event = notification(Some("title"), Some("message"));
        for code in [FunctionCode::Tone, FunctionCode::ToneOverride] {
            assert_eq!(
                format_payload(&event, code, &cfg, CapcodeSource::Title),
                TONE_ONLY_PAYLOAD
            );
        }
    }

    #[test]
    fn message_prefix_capcode_is_consumed() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(None, Some("9999:Low battery"));
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::MessagePrefix),
            "Low battery"
        );
    }

    #[test]
    fn bare_numeric_message_stays_visible() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(None, Some("4242"));
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::MessagePrefix),
            "4242"
        );
    }

    #[test]
    fn title_prefixed_when_not_used_as_capcode() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(Some("alerts"), Some("hi"));
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::Default),
            "alerts - hi"
        );
    }

    #[test]
    fn title_suppressed_when_consumed_as_capcode() {
        let cfg = BridgeConfig::new("t"); // use_title_capcode = true
        let event = notification(Some("1234"), Some("door open"));
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::Title),
            "door open"
        );
    }

    #[test]
    fn message_alone_when_title_absent() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(None, Some("Low battery"));
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::Default),
            "Low battery"
        );
    }

    #[test]
    fn absent_message_formats_as_empty() {
        let mut cfg = BridgeConfig::new("t");
        cfg.use_title_capcode = false;
        let event = notification(Some("alerts"), None);
        assert_eq!(
            format_payload(&event, FunctionCode::Alpha, &cfg, CapcodeSource::Default),
            ""
        );
    }
}
