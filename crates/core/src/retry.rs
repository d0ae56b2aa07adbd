// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-retry execution with exponential backoff and jitter
//!
//! Wraps one remote-call closure: retryable failures (rate limit, truncated
//! transport) back off and retry up to the policy's attempt budget; fatal
//! failures return immediately. Classification comes from the error type via
//! [`Classify`], a closed set of kinds rather than string matching.

use crate::metrics::MetricsSink;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// How an error should be treated by the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient; eligible for backoff-and-retry
    Retryable,
    /// Permanent; surfaced immediately
    Fatal,
}

/// Error classification, implemented by remote-call error types
pub trait Classify {
    fn class(&self) -> ErrorClass;
}

/// Retry budget and backoff shape for one call site
///
/// Not persisted; constructed from configuration and passed in per call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first attempt. 1 means no retries.
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles each retry
    pub initial_backoff: Duration,
    /// Absolute cap on the exponential term
    pub max_backoff: Duration,
    /// Upper bound (exclusive) of the random jitter added to each backoff
    pub jitter: Duration,
    /// Optional delay after every success, to pace a rate-limited upstream
    pub pace: Option<Duration>,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);
    pub const DEFAULT_JITTER: Duration = Duration::from_millis(500);

    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
            jitter: Self::DEFAULT_JITTER,
            pace: None,
        }
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = Some(pace);
        self
    }

    /// Exponential backoff before the retry following failure number
    /// `attempt` (1-based), without jitter
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1);
        let factor = 1u32.checked_shl(exp).unwrap_or(u32::MAX);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Error returned when a wrapped call does not succeed
#[derive(Debug, Error)]
pub enum RetryError<E: std::error::Error + 'static> {
    /// The call failed with a non-retryable error
    #[error("fatal error on attempt {attempts}: {source}")]
    Fatal {
        attempts: u32,
        #[source]
        source: E,
    },
    /// Every attempt in the budget failed with a retryable error
    #[error("retries exhausted after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E: std::error::Error> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Fatal { attempts, .. } | RetryError::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Sleep seam so tests can observe backoff without waiting
pub trait Sleeper: Clone + Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Blocking sleep on the current thread
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSleeper;

impl Sleeper for SystemSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested sleeps instead of sleeping
#[derive(Clone, Debug, Default)]
pub struct FakeSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl FakeSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sleep durations requested so far, in order
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn total(&self) -> Duration {
        self.slept().iter().sum()
    }
}

impl Sleeper for FakeSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
    }
}

/// Executes remote-call closures under a [`RetryPolicy`]
#[derive(Clone)]
pub struct Retryer<S: Sleeper, M: MetricsSink> {
    policy: RetryPolicy,
    sleeper: S,
    metrics: M,
    namespace: String,
}

impl<S: Sleeper, M: MetricsSink> Retryer<S, M> {
    pub fn new(policy: RetryPolicy, sleeper: S, metrics: M, namespace: impl Into<String>) -> Self {
        Self {
            policy,
            sleeper,
            metrics,
            namespace: namespace.into(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `op` until it succeeds, fails fatally, or the attempt budget is
    /// exhausted
    pub fn call<T, E>(&self, mut op: impl FnMut() -> Result<T, E>) -> Result<T, RetryError<E>>
    where
        E: Classify + std::error::Error + 'static,
    {
        let budget = self.policy.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            self.metrics.incr(&self.namespace, "attempt");
            match op() {
                Ok(value) => {
                    self.metrics.incr(&self.namespace, "success");
                    if let Some(pace) = self.policy.pace {
                        self.sleeper.sleep(pace);
                    }
                    return Ok(value);
                }
                Err(err) => {
                    self.metrics.incr(&self.namespace, "failure");
                    if err.class() == ErrorClass::Fatal {
                        return Err(RetryError::Fatal {
                            attempts: attempt,
                            source: err,
                        });
                    }
                    if attempt >= budget {
                        self.metrics.incr(&self.namespace, "exhausted");
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }
                    let wait = self.policy.backoff_for(attempt) + self.jitter();
                    tracing::warn!(
                        attempt,
                        budget,
                        wait_ms = wait.as_millis() as u64,
                        error = %err,
                        "retryable failure, backing off"
                    );
                    self.sleeper.sleep(wait);
                }
            }
        }
    }

    fn jitter(&self) -> Duration {
        let bound = self.policy.jitter.as_millis() as u64;
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..bound))
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
