//! Completion polling for submitted prompts.
//!
//! ComfyUI exposes no blocking wait; a prompt is done when its ID shows
//! up in `/history`. [`wait_for_completion`] checks immediately, then
//! re-checks at a fixed interval until the entry appears or the
//! deadline passes.

use std::time::Duration;

use crate::api::{ComfyUIApi, ComfyUIApiError};
use crate::history::HistoryEntry;

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Sleep between history checks.
    pub interval: Duration,
    /// Give up once this much time has elapsed since the first check.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Errors from the polling loop.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The prompt never appeared in history before the deadline.
    #[error("prompt {prompt_id} did not complete within {timeout:?}")]
    Timeout {
        prompt_id: String,
        timeout: Duration,
    },

    /// A history request failed.
    #[error(transparent)]
    Api(#[from] ComfyUIApiError),

    /// The history entry for the prompt did not match the expected shape.
    #[error("malformed history entry for prompt {prompt_id}: {source}")]
    Decode {
        prompt_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Poll history until `prompt_id` appears or `config.timeout` elapses.
///
/// The first check happens before any sleep, so an already-finished
/// prompt returns without waiting. On expiry the error reports the
/// prompt ID and the configured timeout.
pub async fn wait_for_completion(
    api: &ComfyUIApi,
    prompt_id: &str,
    config: &PollConfig,
) -> Result<HistoryEntry, PollError> {
    let deadline = tokio::time::Instant::now() + config.timeout;

    loop {
        let history = api.get_history(prompt_id).await?;

        if let Some(raw) = history.get(prompt_id) {
            let entry: HistoryEntry =
                serde_json::from_value(raw.clone()).map_err(|source| PollError::Decode {
                    prompt_id: prompt_id.to_string(),
                    source,
                })?;
            return Ok(entry);
        }

        if tokio::time::Instant::now() >= deadline {
            return Err(PollError::Timeout {
                prompt_id: prompt_id.to_string(),
                timeout: config.timeout,
            });
        }

        tracing::debug!(
            prompt_id,
            interval_ms = config.interval.as_millis() as u64,
            "Prompt not in history yet, waiting",
        );
        tokio::time::sleep(config.interval).await;
    }
}
