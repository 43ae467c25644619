//! Redis Pub/Sub publisher.

use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use safari_core::SectionKind;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REVALIDATE")
    pub event_type: String,
    pub data: serde_json::Value,
}

impl PubSubEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Pages made stale by a content change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidationEvent {
    pub kind: SectionKind,
    pub paths: Vec<String>,
    /// What changed: "publish", "delete", "reorder"
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}

impl RevalidationEvent {
    pub const EVENT_TYPE: &'static str = "REVALIDATE";

    #[must_use]
    pub fn new(kind: SectionKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            paths: kind.page_paths().iter().map(|p| (*p).to_string()).collect(),
            reason: reason.into(),
            requested_at: Utc::now(),
        }
    }

    pub fn to_event(&self) -> Result<PubSubEvent, serde_json::Error> {
        Ok(PubSubEvent::new(Self::EVENT_TYPE, serde_json::to_value(self)?))
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel; returns the number of receivers
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    pub async fn publish_revalidation(&self, event: &RevalidationEvent) -> RedisResult<u32> {
        self.publish(&PubSubChannel::Revalidate, &event.to_event()?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revalidation_paths_follow_kind() {
        let event = RevalidationEvent::new(SectionKind::Faq, "publish");
        assert_eq!(event.paths, vec!["/faq".to_string(), "/contact".to_string()]);
    }

    #[test]
    fn test_revalidation_event_payload() {
        let event = RevalidationEvent::new(SectionKind::TeamMember, "reorder");
        let wrapped = event.to_event().unwrap();

        assert_eq!(wrapped.event_type, "REVALIDATE");
        assert_eq!(wrapped.data["kind"], "team-member");
        assert_eq!(wrapped.data["reason"], "reorder");
        assert!(wrapped.data["requestedAt"].is_string());
    }
}
