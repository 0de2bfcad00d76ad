//! Retry policy with a fixed per-attempt timeout and exponential backoff
//!
//! Every attempt runs under the same `timeout_ms` window. After a retryable
//! failure the client waits `retry_delay_ms * backoff_multiplier^n` (capped at
//! `max_delay_ms`, optionally jittered) and tries again, at most
//! `max_retries` times.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_ezroute::{RetryPolicy, with_retry};
//!
//! let policy = RetryPolicy::default();
//! let outcome = with_retry(&policy, || async { client.fetch().await }).await;
//! ```

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Retry behavior for route requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Timeout window for a single attempt in milliseconds (default: 2500ms)
    #[serde(default = "default_timeout_ms", alias = "timeoutMs")]
    pub timeout_ms: u64,

    /// Retries after the first attempt (default: 1)
    #[serde(default = "default_max_retries", alias = "maxRetries")]
    pub max_retries: u32,

    /// Growth factor for the delay between attempts (default: 1.0)
    #[serde(default = "default_backoff_multiplier", alias = "backoffMultiplier")]
    pub backoff_multiplier: f64,

    /// Delay before the first retry in milliseconds (default: 250ms)
    #[serde(default = "default_retry_delay_ms", alias = "retryDelayMs")]
    pub retry_delay_ms: u64,

    /// Upper bound on the delay between attempts in milliseconds (default: 5000ms)
    #[serde(default = "default_max_delay_ms", alias = "maxDelayMs")]
    pub max_delay_ms: u64,

    /// Whether to randomize delays by up to `jitter_factor` (default: true)
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,

    /// Maximum jitter factor (0.0 to 1.0, default: 0.1 = 10%)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_timeout_ms() -> u64 {
    2500
}

const fn default_max_retries() -> u32 {
    1
}

const fn default_backoff_multiplier() -> f64 {
    1.0
}

const fn default_retry_delay_ms() -> u64 {
    250
}

const fn default_max_delay_ms() -> u64 {
    5000
}

const fn default_true() -> bool {
    true
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_multiplier: default_backoff_multiplier(),
            retry_delay_ms: default_retry_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            jitter_enabled: default_true(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryPolicy {
    /// Upper bound on `max_retries`
    pub const MAX_RETRIES_LIMIT: u32 = 10;

    /// Create a policy from the three core options
    #[must_use]
    pub fn new(timeout_ms: u64, max_retries: u32, backoff_multiplier: f64) -> Self {
        Self {
            timeout_ms,
            max_retries,
            backoff_multiplier,
            ..Self::default()
        }
    }

    /// Disable jitter
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Set the base delay between attempts
    #[must_use]
    pub const fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Per-attempt timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Total attempts including the first one
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Validate the policy
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid option.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }
        if self.max_retries > Self::MAX_RETRIES_LIMIT {
            return Err(format!(
                "max_retries must be {} or less",
                Self::MAX_RETRIES_LIMIT
            ));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err("backoff_multiplier must be at least 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err("jitter_factor must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }

    /// Delay before retry number `attempt` (0-indexed)
    ///
    /// delay = retry_delay_ms * backoff_multiplier^attempt, capped at
    /// max_delay_ms, then jittered if enabled.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let base_delay = (self.retry_delay_ms as f64) * self.backoff_multiplier.powi(exponent);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled && capped_delay > 0.0 {
            let jitter_range = capped_delay * self.jitter_factor;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Errors that can tell whether another attempt may succeed
pub trait Retryable {
    /// Returns true if this error is retryable
    fn is_retryable(&self) -> bool;
}

/// Outcome of a retried operation
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the last attempt
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries)
    pub attempts: u32,
    /// Total time spent including delays
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    /// Check if the operation succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the operation failed
    #[must_use]
    pub const fn is_err(&self) -> bool {
        self.result.is_err()
    }

    /// Convert to standard Result, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Execute an async operation under a retry policy
///
/// Non-retryable errors are returned immediately. Retryable errors are
/// retried until the operation succeeds or `max_retries` is exhausted, in
/// which case the last error is returned.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Request succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                let retry_attempt = attempts - 1;

                if !err.is_retryable() {
                    debug!(attempts, error = %err, "Request failed with non-retryable error");
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                if retry_attempt >= policy.max_retries {
                    warn!(
                        attempts,
                        max_retries = policy.max_retries,
                        error = %err,
                        "Request failed after max retries"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                let delay = policy.delay_for_attempt(retry_attempt);
                warn!(
                    attempt = attempts,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Request failed, retrying"
                );

                tokio::time::sleep(delay).await;
            },
        }
    }
}
