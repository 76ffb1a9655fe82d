//! What the gateway expects on the wire and what it sends back

use crate::topic::TopicList;

pub const PUBLISH_PATH: &str = "/v1/publish";
pub const STREAM_PATH: &str = "/v1/stream";
pub const HEALTH_PATH: &str = "/healthz";

/// Comma separated topics, on both publish and subscribe
pub const TOPIC_HEADER: &str = "x-sse-topic";
/// Event id on publish, subscriber id on subscribe
pub const ID_HEADER: &str = "x-sse-id";

pub const EVENT_STREAM_MIME: &str = "text/event-stream";

/// One event to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub topics: TopicList,
    /// Sent as `x-sse-id`, becomes the `id: ` line subscribers see. The gateway rejects a blank one.
    pub event_id: String,
    /// Bearer token for the publish endpoint
    pub api_key: String,
    /// Request body, becomes the `data: ` lines subscribers see
    pub payload: String,
}

/// A request to open an event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub topics: TopicList,
    /// Sent as `x-sse-id` when set, otherwise the gateway picks a connection id
    pub subscriber_id: Option<String>,
}

impl Subscription {
    pub fn new(topics: TopicList) -> Self {
        Self {
            topics,
            subscriber_id: None,
        }
    }

    pub fn with_subscriber_id(mut self, subscriber_id: impl Into<String>) -> Self {
        self.subscriber_id = Some(subscriber_id.into());
        self
    }
}

/// Outcome the gateway reports for a publish
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    /// At least one topic had subscribers
    Accepted,
    /// No topic had subscribers, nothing was delivered
    Dropped,
}

/// Body of a `202` publish response
#[cfg(feature = "json")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub status: PublishStatus,
    pub id: String,
    /// Number of connections the event was queued on, absent when dropped
    #[serde(default)]
    pub delivered: Option<u64>,
    /// Topics without subscribers
    #[serde(default)]
    pub dropped_topics: Vec<String>,
}

#[cfg(feature = "json")]
impl PublishReceipt {
    /// Parses a receipt, reporting where in the document a mismatch was found
    pub fn parse(body: &str) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
        let deserializer = &mut serde_json::Deserializer::from_str(body);
        serde_path_to_error::deserialize(deserializer)
    }
}

/// Body of `GET /healthz`
#[cfg(feature = "json")]
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(feature = "json")]
impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
