//! Stream driver
//!
//! The unbounded consumption loop: pull events from the source, translate,
//! hand directives to the sink. Per-event failures are contained here:
//! one bad event is logged and dropped, never allowed to end the
//! subscription. Each event is fully processed before the next is read;
//! there is no internal concurrency.

use tracing::{debug, error, info, trace, warn};

use crate::config::BridgeConfig;
use crate::error::TranslateError;
use crate::event::{Notification, SseEvent};
use crate::sse::EventSource;
use crate::translate::{translate, PagingDirective};
use crate::transmit::TransmitSink;

/// What became of one received transport item.
///
/// Enumerating outcomes keeps the "never abort the loop" policy testable:
/// every arm is a normal return, and only [`EventOutcome::Relayed`]
/// reaches the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Translated successfully; the directive goes to the transmitter.
    Relayed(PagingDirective),
    /// Non-"message" tag, transport chatter. Not an error.
    Ignored,
    /// The data line was not valid JSON for a notification.
    Malformed(String),
    /// Parsed fine but untranslatable; the event is dropped.
    Dropped(TranslateError),
}

/// Decide the outcome for one transport item. Pure of side effects.
#[must_use]
pub fn evaluate(config: &BridgeConfig, event: &SseEvent) -> EventOutcome {
    if !event.is_message() {
        return EventOutcome::Ignored;
    }

    let notification: Notification = match serde_json::from_str(&event.data) {
        Ok(n) => n,
        Err(e) => return EventOutcome::Malformed(e.to_string()),
    };

    match translate(&notification, config) {
        Ok(directive) => EventOutcome::Relayed(directive),
        Err(e) => EventOutcome::Dropped(e),
    }
}

/// The bridge: one event source, one transmit sink, one immutable config.
pub struct Bridge<S, T> {
    config: BridgeConfig,
    source: S,
    sink: T,
}

impl<S: EventSource, T: TransmitSink> Bridge<S, T> {
    #[must_use]
    pub fn new(config: BridgeConfig, source: S, sink: T) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    /// Consume the source until it is exhausted.
    ///
    /// Runs forever for a live subscription; ends only when the source
    /// returns `None` (canned sources in tests) or the process is killed.
    pub async fn run(&mut self) {
        info!(topic = %self.config.topic, "listening for notifications");

        while let Some(event) = self.source.next_event().await {
            trace!(tag = %event.event, data = %event.data, "received event");

            match evaluate(&self.config, &event) {
                EventOutcome::Relayed(directive) => self.relay(&directive).await,
                EventOutcome::Ignored => {}
                EventOutcome::Malformed(reason) => {
                    error!(%reason, "received non-JSON event, skipping");
                }
                EventOutcome::Dropped(e) => {
                    error!(error = %e, "dropping untranslatable event");
                }
            }
        }

        info!("event stream ended");
    }

    /// Submit one directive and audit it. Each submission keys a radio,
    /// so the summary is logged at WARN regardless of verbosity.
    async fn relay(&self, directive: &PagingDirective) {
        warn!(
            capcode = directive.capcode,
            function_code = %directive.function_code,
            payload = %directive.payload,
            "relaying page"
        );

        if let Err(e) = self.sink.transmit(directive).await {
            error!(error = %e, "transmit failed, event dropped");
        } else {
            debug!(capcode = directive.capcode, "page handed to transmitter");
        }
    }
}
