//! Bridge configuration
//!
//! The whole configuration surface is environment variables, read once at
//! startup and immutable for the process lifetime. `NTFY_TOPIC` is the only
//! required value; everything else has a default.

use std::env;

use crate::error::ConfigError;

/// Default ntfy server.
pub const DEFAULT_NTFY_URL: &str = "https://ntfy.sh";

/// Default transmit frequency in Hz (915 MHz ISM band).
pub const DEFAULT_FREQUENCY_HZ: u64 = 915_000_000;

/// Default number of transmissions per directive.
pub const DEFAULT_REPEAT_COUNT: u32 = 1;

/// Default minimum priority that overrides pager silence (ntfy "high").
pub const DEFAULT_SILENCE_OVERRIDE_THRESHOLD: i64 = 4;

/// Strings accepted as "true" for boolean-like variables.
const TRUTHY: &[&str] = &["true", "t", "yes", "yeet", "duh", "1"];

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// ntfy topic to subscribe to.
    pub topic: String,
    /// Base URL of the ntfy server.
    pub base_url: String,
    /// POCSAG carrier frequency in Hz.
    pub frequency_hz: u64,
    /// How many times the transmitter repeats each page.
    pub repeat_count: u32,
    /// When true, a numeric title is consumed as the recipient capcode.
    pub use_title_capcode: bool,
    /// Minimum priority at which a page may override device silence.
    pub silence_override_threshold: i64,
    /// Fallback capcode when neither title nor message yields one.
    pub default_capcode: Option<u32>,
}

impl BridgeConfig {
    /// Build a configuration for the given topic with all defaults.
    ///
    /// Matches the library-level defaults of the bridge: title-as-capcode
    /// enabled, no fallback capcode.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            base_url: DEFAULT_NTFY_URL.to_string(),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            repeat_count: DEFAULT_REPEAT_COUNT,
            use_title_capcode: true,
            silence_override_threshold: DEFAULT_SILENCE_OVERRIDE_THRESHOLD,
            default_capcode: None,
        }
    }

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTopic`] when `NTFY_TOPIC` is unset or
    /// empty, and [`ConfigError::InvalidValue`] when a numeric variable
    /// does not parse. Both are fatal: the process must not start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let topic = env::var("NTFY_TOPIC")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingTopic)?;

        let base_url = env::var("NTFY_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_NTFY_URL.to_string());

        Ok(Self {
            topic,
            base_url,
            frequency_hz: parse_var("POCSAG_FREQ", DEFAULT_FREQUENCY_HZ)?,
            repeat_count: parse_var("POCSAG_TRIES", DEFAULT_REPEAT_COUNT)?,
            // The env surface defaults this off; publishers opt in.
            use_title_capcode: env::var("USE_TITLE_CAPCODE")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            silence_override_threshold: parse_var(
                "SILENCE_OVERRIDE_THRESHOLD",
                DEFAULT_SILENCE_OVERRIDE_THRESHOLD,
            )?,
            default_capcode: parse_optional_var("DEFAULT_CAPCODE")?,
        })
    }

    /// URL of the SSE endpoint for the configured topic.
    #[must_use]
    pub fn sse_url(&self) -> String {
        format!("{}/{}/sse", self.base_url.trim_end_matches('/'), self.topic)
    }
}

/// Case-insensitive truthy-string check for boolean-like variables.
fn is_truthy(value: &str) -> bool {
    TRUTHY.contains(&value.to_ascii_lowercase().as_str())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) if !value.is_empty() => {
            value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

fn parse_optional_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}
