//! Acquisition pipeline driver.
//!
//! [`ThreadFetcher`] walks its strategy list in order, issuing one
//! bounded-timeout GET per strategy and classifying the outcome. The first
//! response that decodes into a well-formed thread document wins and is
//! normalized immediately; a 429 pauses for a fixed backoff before the next
//! strategy; every other failure advances right away. Exhausting the list is
//! terminal and reports how many mechanisms were tried plus the most recent
//! concrete error.
//!
//! Timeouts are per HTTP call, not per pipeline: a run that exhausts all
//! strategies can take up to the sum of per-strategy timeouts plus backoff
//! pauses.

use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::normalize::normalize;
use super::strategies::{Strategy, default_strategies};
use crate::error::{DigestError, FetchAttempt, FetchOutcome};
use crate::models::{FetchOptions, ThreadRecord};
use crate::utils::truncate_for_log;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

/// Sequential fetch driver over an ordered strategy list.
#[derive(Debug)]
pub struct ThreadFetcher {
    client: reqwest::Client,
    strategies: Vec<Strategy>,
    request_timeout: Duration,
    rate_limit_backoff: Duration,
}

impl ThreadFetcher {
    /// Fetcher over the default strategy list.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// Fetcher over a custom strategy list. Used by tests to point the
    /// pipeline at a local mock server.
    pub fn with_strategies(strategies: Vec<Strategy>) -> Self {
        Self {
            client: reqwest::Client::new(),
            strategies,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            rate_limit_backoff: DEFAULT_RATE_LIMIT_BACKOFF,
        }
    }

    /// Override the per-call timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the pause taken after a 429 before the next strategy.
    pub fn rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff = backoff;
        self
    }

    /// Acquire and normalize a thread, trying each strategy in order.
    ///
    /// # Errors
    ///
    /// [`DigestError::FetchExhausted`] once every strategy has failed. Single
    /// strategy failures are not surfaced; they only steer the loop.
    #[instrument(level = "info", skip(self, options))]
    pub async fn fetch(
        &self,
        post_id: &str,
        options: &FetchOptions,
    ) -> Result<ThreadRecord, DigestError> {
        let mut attempts: Vec<FetchAttempt> = Vec::new();

        for (index, strategy) in self.strategies.iter().enumerate() {
            let endpoint = strategy.request_url(post_id);
            debug!(
                strategy = %strategy.name,
                %endpoint,
                attempt = index + 1,
                total = self.strategies.len(),
                "Trying fetch strategy"
            );

            match self.try_strategy(strategy, &endpoint, post_id, options).await {
                Ok(record) => {
                    info!(
                        strategy = %strategy.name,
                        attempts = attempts.len() + 1,
                        title = %record.title,
                        "Fetch succeeded"
                    );
                    return Ok(record);
                }
                Err(outcome) => {
                    warn!(strategy = %strategy.name, %endpoint, %outcome, "Strategy failed; advancing");
                    let rate_limited = outcome == FetchOutcome::RateLimited;
                    attempts.push(FetchAttempt {
                        strategy: strategy.name.clone(),
                        endpoint,
                        outcome,
                    });
                    let more_to_try = index + 1 < self.strategies.len();
                    if rate_limited && more_to_try {
                        // Fixed pause only; re-trying the same profile right
                        // away would just trip the limiter again. With nothing
                        // left to try, a pause would just delay the failure.
                        tokio::time::sleep(self.rate_limit_backoff).await;
                    }
                }
            }
        }

        let last_error = attempts
            .last()
            .map(|attempt| {
                format!(
                    "{} ({}: {})",
                    attempt.outcome, attempt.strategy, attempt.endpoint
                )
            })
            .unwrap_or_else(|| "no strategies configured".to_string());

        Err(DigestError::FetchExhausted {
            attempts: attempts.len(),
            last_error,
        })
    }

    /// One GET against one strategy, classified into a [`FetchOutcome`] on
    /// any failure.
    async fn try_strategy(
        &self,
        strategy: &Strategy,
        url: &str,
        post_id: &str,
        options: &FetchOptions,
    ) -> Result<ThreadRecord, FetchOutcome> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", strategy.profile.user_agent)
            .header("Accept", strategy.profile.accept)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(FetchOutcome::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchOutcome::HttpError(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_transport)?;
        let document = strategy.decode(&body).map_err(|detail| {
            FetchOutcome::MalformedPayload(format!(
                "{detail}; body starts: {}",
                truncate_for_log(&body, 120)
            ))
        })?;

        normalize(post_id, &document, options)
            .map_err(|e| FetchOutcome::MalformedPayload(e.to_string()))
    }
}

impl Default for ThreadFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a reqwest transport error onto the outcome taxonomy.
fn classify_transport(error: reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::Timeout
    } else {
        FetchOutcome::ConnectionError
    }
}
