//! Static-site rebuild trigger
//!
//! A single POST to the deploy hook of the hosting platform. The call is made
//! at most once per trigger: no retries, and every failure is folded into a
//! [`RebuildOutcome`] instead of an error so that callers cannot fail a
//! content write because the hook is down.

use safari_common::DeployConfig;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use super::error::{ServiceError, ServiceResult};

pub const NOT_CONFIGURED_REASON: &str = "No deploy hook configured";

/// Error type for a single hook call
#[derive(Debug, thiserror::Error)]
pub enum RebuildError {
    /// Network, DNS or timeout failure
    #[error("Deploy hook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deploy hook returned HTTP {0}")]
    HttpStatus(u16),
}

/// What happened when the hook was (or was not) called
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildOutcome {
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// HTTP status returned by the hook, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl RebuildOutcome {
    pub fn not_configured() -> Self {
        Self {
            triggered: false,
            reason: Some(NOT_CONFIGURED_REASON.to_string()),
            status: None,
        }
    }

    fn fired(status: u16) -> Self {
        Self {
            triggered: true,
            reason: None,
            status: Some(status),
        }
    }

    fn failed(err: &RebuildError) -> Self {
        Self {
            triggered: false,
            reason: Some(err.to_string()),
            status: match err {
                RebuildError::HttpStatus(code) => Some(*code),
                RebuildError::Request(e) => e.status().map(|s| s.as_u16()),
            },
        }
    }
}

/// Handle to a rebuild running on the runtime after the request returned.
///
/// The spawned task logs its own outcome. Dropping the handle (or calling
/// [`detach`](Self::detach)) leaves the task running.
#[derive(Debug)]
#[must_use = "call .detach() to let the rebuild run unobserved"]
pub struct DetachedRebuild(JoinHandle<RebuildOutcome>);

impl DetachedRebuild {
    /// Give up the handle; the rebuild keeps running
    pub fn detach(self) {
        drop(self.0);
    }

    /// Wait for the outcome; `None` if the task panicked or was aborted
    pub async fn join(self) -> Option<RebuildOutcome> {
        self.0.await.ok()
    }
}

/// Calls the configured deploy hook
#[derive(Clone)]
pub struct RebuildTrigger {
    hook_url: Option<String>,
    client: reqwest::Client,
}

impl RebuildTrigger {
    /// Build the trigger from deploy settings
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &DeployConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ServiceError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            hook_url: config.rebuild_hook_url.clone(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.hook_url.is_some()
    }

    /// Call the hook and wait for the outcome
    #[instrument(skip(self))]
    pub async fn trigger(&self) -> RebuildOutcome {
        let Some(url) = self.hook_url.as_deref() else {
            info!("Rebuild skipped: no deploy hook configured");
            return RebuildOutcome::not_configured();
        };

        match self.try_send(url).await {
            Ok(status) => {
                info!(status, "Rebuild triggered");
                RebuildOutcome::fired(status)
            }
            Err(e) => {
                warn!(error = %e, "Rebuild trigger failed");
                RebuildOutcome::failed(&e)
            }
        }
    }

    /// Spawn [`trigger`](Self::trigger) onto the runtime
    pub fn trigger_detached(&self) -> DetachedRebuild {
        let trigger = self.clone();
        DetachedRebuild(tokio::spawn(async move { trigger.trigger().await }))
    }

    async fn try_send(&self, url: &str) -> Result<u16, RebuildError> {
        let response = self.client.post(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RebuildError::HttpStatus(status.as_u16()));
        }
        Ok(status.as_u16())
    }
}

impl std::fmt::Debug for RebuildTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebuildTrigger")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn deploy(url: Option<String>) -> DeployConfig {
        DeployConfig {
            rebuild_hook_url: url,
            timeout_secs: 2,
        }
    }

    /// Answers one request with the given status line
    async fn one_shot_hook(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/hook")
    }

    #[tokio::test]
    async fn test_not_configured() {
        let trigger = RebuildTrigger::new(&deploy(None)).unwrap();
        let outcome = trigger.trigger().await;

        assert!(!outcome.triggered);
        assert_eq!(outcome.reason.as_deref(), Some("No deploy hook configured"));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "triggered": false, "reason": "No deploy hook configured" })
        );
    }

    #[tokio::test]
    async fn test_successful_hook() {
        let url = one_shot_hook("201 Created").await;
        let trigger = RebuildTrigger::new(&deploy(Some(url))).unwrap();

        let outcome = trigger.trigger().await;
        assert!(outcome.triggered);
        assert_eq!(outcome.status, Some(201));
    }

    #[tokio::test]
    async fn test_hook_error_status_is_reported_not_raised() {
        let url = one_shot_hook("502 Bad Gateway").await;
        let trigger = RebuildTrigger::new(&deploy(Some(url))).unwrap();

        let outcome = trigger.trigger().await;
        assert!(!outcome.triggered);
        assert_eq!(outcome.status, Some(502));
    }

    #[tokio::test]
    async fn test_unreachable_hook() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let trigger = RebuildTrigger::new(&deploy(Some(format!("http://{addr}/hook")))).unwrap();
        let outcome = trigger.trigger_detached().join().await.unwrap();

        assert!(!outcome.triggered);
        assert!(outcome.reason.is_some());
    }

    #[tokio::test]
    async fn test_detached_outlives_handle() {
        let trigger = RebuildTrigger::new(&deploy(None)).unwrap();
        trigger.trigger_detached().detach();
        assert!(!trigger.is_configured());
    }
}
