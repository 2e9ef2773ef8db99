//! pocsag-bridge - relay ntfy push notifications to a POCSAG pager
//!
//! This crate subscribes to an [ntfy](https://ntfy.sh) topic over SSE and
//! translates each notification into a paging directive: a recipient
//! capcode, a 2-bit POCSAG function code, and a payload line, which is
//! handed to an external `pocsag` transmitter process over stdin.
//!
//! # Quick start
//!
//! ```bash
//! NTFY_TOPIC=my-pager-topic pocsag-bridge
//! ```
//!
//! The whole configuration surface is environment variables; see
//! [`config::BridgeConfig::from_env`].
//!
//! # Translation pipeline
//!
//! ```text
//! SSE stream -> Bridge -> translate -> { capcode, function_code, payload }
//!                                   -> PocsagTransmitter (external process)
//! ```
//!
//! Translation is pure and covered by [`translate::translate`]; the driver
//! in [`bridge`] contains all per-event failures so a single bad event
//! never ends the subscription.

pub mod bridge;
pub mod capcode;
pub mod config;
pub mod error;
pub mod event;
pub mod function_code;
pub mod logging;
pub mod payload;
pub mod sse;
pub mod translate;
pub mod transmit;

pub use bridge::{evaluate, Bridge, EventOutcome};
pub use capcode::{CapcodeSource, ResolvedCapcode};
pub use config::BridgeConfig;
pub use error::{ConfigError, TranslateError, TransmitError};
pub use event::{Notification, SseEvent};
pub use function_code::FunctionCode;
pub use sse::{EventSource, NtfySource, SseParser};
pub use translate::{translate, PagingDirective};
pub use transmit::{PocsagTransmitter, TransmitSink};
