//! HTTP client for the metadata source
//!
//! `GET <base_url>?group=<group>&song=<song>` answering
//! `{"releaseDate": "...", "text": "...", "link": "..."}`.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use songbook_common::config::EnrichmentSettings;

use super::{EnrichmentError, RetryPolicy};
use crate::models::SongDetail;

const USER_AGENT: &str = concat!("songbook/", env!("CARGO_PKG_VERSION"));

/// Metadata source client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct EnrichmentClient {
    http_client: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

impl EnrichmentClient {
    pub fn new(
        base_url: impl Into<String>,
        settings: &EnrichmentSettings,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| EnrichmentError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            policy: RetryPolicy::from_settings(settings),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Look up metadata for a song
    ///
    /// Transport failures, 400 and any status other than 200 or 500 abort
    /// immediately. A 500 is retried after a backoff delay until the attempt
    /// cap.
    pub async fn enrich(&self, group: &str, song: &str) -> Result<SongDetail, EnrichmentError> {
        let mut delays = self.policy.backoff();

        for attempt in 1..=self.policy.max_attempts {
            debug!(
                group = %group,
                song = %song,
                attempt,
                url = %self.base_url,
                "Querying metadata source"
            );

            let response = self
                .http_client
                .get(&self.base_url)
                .query(&[("group", group), ("song", song)])
                .send()
                .await
                .map_err(|e| EnrichmentError::Transport(e.to_string()))?;

            let status = response.status();

            if status == StatusCode::OK {
                let detail: SongDetail = response.json().await.map_err(|e| {
                    EnrichmentError::UnexpectedResponse {
                        status: status.as_u16(),
                        detail: format!("malformed body: {}", e),
                    }
                })?;

                info!(group = %group, song = %song, attempt, "Retrieved song metadata");
                return Ok(detail);
            }

            if status == StatusCode::BAD_REQUEST {
                let message = body_text(response).await;
                return Err(EnrichmentError::InvalidInput(message));
            }

            if status != StatusCode::INTERNAL_SERVER_ERROR {
                let detail = body_text(response).await;
                return Err(EnrichmentError::UnexpectedResponse {
                    status: status.as_u16(),
                    detail,
                });
            }

            // No point sleeping after the final attempt
            if attempt < self.policy.max_attempts {
                let delay = delays.next().unwrap_or(self.policy.max_backoff);
                warn!(
                    group = %group,
                    song = %song,
                    attempt,
                    status = status.as_u16(),
                    backoff_ms = delay.as_millis() as u64,
                    "Metadata source server error, will retry after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            group = %group,
            song = %song,
            attempts = self.policy.max_attempts,
            "Metadata source still failing, giving up"
        );
        Err(EnrichmentError::UpstreamUnavailable {
            attempts: self.policy.max_attempts,
        })
    }
}

/// Read an error response body, empty when it cannot be read
async fn body_text(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!(
                status = status.as_u16(),
                error = %e,
                "Failed to read metadata source response body"
            );
            String::new()
        }
    }
}
