//! Metadata enrichment with bounded retry
//!
//! Fetches authoritative conversation metadata from the video-agent platform.
//! The platform often needs a few seconds after the webhook fires before the
//! recording URL and canonical transcript are available, so the fetch retries
//! on a small fixed delay table. Exhausting the table is non-fatal: the
//! pipeline proceeds with whatever the webhook payload carried.

use crate::ports::video::{ConversationMetadata, VideoAgentPort};
use std::time::Duration;

/// Fixed delay table for the enrichment fetch.
///
/// One attempt per table entry, sleeping the entry's delay after each failed
/// attempt except the last. Deliberately not exponential or jittered; three
/// bounded attempts keep the worst case well inside the platform's 60s
/// execution ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(6),
            ],
        }
    }
}

impl RetryPolicy {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    pub fn attempts(&self) -> usize {
        self.delays.len().max(1)
    }
}

/// Fetch conversation metadata under the given retry policy.
///
/// A 2xx response ends the loop regardless of which fields it carried;
/// presence of recording data is optional, not grounds for retry. Transport
/// failures and upstream rejections alike consume an attempt.
pub async fn fetch_with_retry(
    video: &dyn VideoAgentPort,
    conversation_id: &str,
    policy: &RetryPolicy,
) -> Option<ConversationMetadata> {
    let attempts = policy.attempts();

    for attempt in 0..attempts {
        match video.fetch_conversation(conversation_id).await {
            Ok(metadata) => {
                log::info!(
                    "Fetched conversation metadata for {} on attempt {}/{}",
                    conversation_id,
                    attempt + 1,
                    attempts
                );
                return Some(metadata);
            }
            Err(e) => {
                log::warn!(
                    "Metadata fetch attempt {}/{} failed for {}: {}",
                    attempt + 1,
                    attempts,
                    conversation_id,
                    e
                );
            }
        }

        if attempt + 1 < attempts {
            tokio::time::sleep(policy.delays[attempt]).await;
        }
    }

    None
}
