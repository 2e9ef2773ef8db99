//! SSE transport
//!
//! Consumption side of a `text/event-stream` subscription. Two pieces:
//! [`SseParser`], an incremental wire parser fed raw byte chunks, and
//! [`NtfySource`], an auto-reconnecting HTTP subscription to
//! `{base}/{topic}/sse` built on a streaming `reqwest` body.
//!
//! The parser follows the event-stream grammar: `event:`/`data:`/`id:`/
//! `retry:` fields, `:` comment lines, blank-line dispatch, CR/LF
//! tolerance, multi-line data joined with newlines. Unknown fields are
//! ignored.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::event::SseEvent;

/// Reconnect delay until the server tunes it with a `retry:` field.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Connect timeout for the subscription request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// A producer of transport events.
///
/// The bridge is generic over this seam so tests can drive the loop from
/// a canned sequence instead of a live connection. Returning `None` ends
/// the stream permanently.
#[async_trait]
pub trait EventSource {
    async fn next_event(&mut self) -> Option<SseEvent>;
}

/// Incremental `text/event-stream` parser.
///
/// Feed it chunks as they arrive; it yields complete events at each
/// blank-line boundary. Chunk boundaries may fall anywhere, including
/// inside a UTF-8 sequence, so buffering happens at the byte level.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event_type: Option<String>,
    data: Vec<String>,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return any events completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            self.process_line(line, &mut events);
        }
        events
    }

    /// Server-requested reconnect delay, when one has been seen.
    #[must_use]
    pub fn retry_hint(&self) -> Option<Duration> {
        self.retry
    }

    /// Most recent event id, for `Last-Event-ID` resumption.
    #[must_use]
    pub fn last_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<SseEvent>) {
        if line.is_empty() {
            self.dispatch(events);
            return;
        }
        if line.starts_with(':') {
            // Comment line, commonly used as a keepalive.
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event_type = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            "id" => {
                // Ids containing NUL are ignored per the grammar.
                if !value.contains('\0') {
                    self.last_id = Some(value.to_string());
                }
            }
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, events: &mut Vec<SseEvent>) {
        let event_type = self.event_type.take();
        let data = std::mem::take(&mut self.data);

        // A blank line with no accumulated data resets without emitting.
        if data.is_empty() {
            return;
        }

        events.push(SseEvent {
            event: event_type.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
            id: self.last_id.clone(),
        });
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<bytes::Bytes>> + Send>>;

/// Auto-reconnecting SSE subscription to an ntfy topic.
///
/// Connection loss or a non-success response is logged and retried after
/// the current reconnect delay; [`EventSource::next_event`] therefore
/// never returns `None` for this source.
pub struct NtfySource {
    client: Client,
    url: String,
    parser: SseParser,
    stream: Option<ByteStream>,
    pending: VecDeque<SseEvent>,
    retry_delay: Duration,
}

impl NtfySource {
    /// Build a source for the configured topic.
    ///
    /// # Errors
    ///
    /// Fails only when the HTTP client cannot be constructed.
    pub fn new(config: &BridgeConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: config.sse_url(),
            parser: SseParser::new(),
            stream: None,
            pending: VecDeque::new(),
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// URL this source subscribes to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn connect(&mut self) -> Option<ByteStream> {
        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", "text/event-stream");
        if let Some(id) = self.parser.last_id() {
            request = request.header("Last-Event-ID", id.to_string());
        }

        match request.send().await {
            Ok(response) => match response.error_for_status() {
                Ok(response) => {
                    debug!(url = %self.url, "subscription established");
                    Some(Box::pin(response.bytes_stream()))
                }
                Err(e) => {
                    warn!(url = %self.url, error = %e, "subscription rejected");
                    None
                }
            },
            Err(e) => {
                warn!(url = %self.url, error = %e, "subscription failed");
                None
            }
        }
    }
}

#[async_trait]
impl EventSource for NtfySource {
    async fn next_event(&mut self) -> Option<SseEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            if self.stream.is_none() {
                self.stream = self.connect().await;
                if self.stream.is_none() {
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
            }
            let Some(stream) = self.stream.as_mut() else {
                continue;
            };

            match stream.next().await {
                Some(Ok(chunk)) => {
                    self.pending.extend(self.parser.push(&chunk));
                    if let Some(hint) = self.parser.retry_hint() {
                        self.retry_delay = hint;
                    }
                }
                Some(Err(e)) => {
                    warn!(url = %self.url, error = %e, "subscription read failed, reconnecting");
                    self.stream = None;
                    tokio::time::sleep(self.retry_delay).await;
                }
                None => {
                    warn!(url = %self.url, "subscription closed by server, reconnecting");
                    self.stream = None;
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
