//! Page revalidation messages
//!
//! Tells the site renderer which pages a content change made stale. Sent on a
//! spawned task; without Redis the request is dropped with a debug log.

use safari_cache::RevalidationEvent;
use safari_core::SectionKind;
use tracing::{debug, warn};

use super::context::ServiceContext;

pub struct Revalidator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Revalidator<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns whether a message was queued
    pub fn request(&self, kind: SectionKind, reason: &str) -> bool {
        let Some(publisher) = self.ctx.publisher().cloned() else {
            debug!(kind = %kind, reason, "Revalidation skipped: Redis not configured");
            return false;
        };

        let event = RevalidationEvent::new(kind, reason);
        tokio::spawn(async move {
            if let Err(e) = publisher.publish_revalidation(&event).await {
                warn!(error = %e, kind = %event.kind, "Failed to publish revalidation");
            }
        });
        true
    }
}
