//! Retry policy applied around individual store calls.
//!
//! Only the store round trip is repeated, never a whole request handler, so a
//! failure halfway through a multi-step operation does not replay the steps
//! that already succeeded. Idempotent calls retry on any transient failure;
//! appends retry only when the failure proves nothing was written.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rand::random;
use tokio::time::sleep;
use tracing::warn;

use super::{SheetStore, SheetWrite, StoreError};
use crate::domain::{CellRange, Grid};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Fraction of the delay added or removed at random (0.0 disables jitter).
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(2000),
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based): doubles each time, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(31);
        let base = self
            .initial_delay
            .saturating_mul(2_u32.saturating_pow(exp))
            .min(self.max_delay);
        if self.jitter <= 0.0 {
            return base;
        }
        let spread = base.as_secs_f64() * self.jitter;
        let offset = (random::<f64>() * 2.0 - 1.0) * spread;
        Duration::from_secs_f64((base.as_secs_f64() + offset).max(0.0))
    }

    /// Run `op` until it succeeds, fails with an error `should_retry` rejects,
    /// or attempts run out.
    pub async fn run<T, F, Fut>(
        &self,
        op_name: &str,
        should_retry: fn(&StoreError) -> bool,
        mut op: F,
    ) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= max_attempts || !should_retry(&err) {
                        return Err(err);
                    }
                    let delay = self.delay_for(attempt);
                    warn!(
                        op = op_name,
                        error = %err,
                        attempt,
                        max_attempts,
                        retry_delay_ms = delay.as_millis() as u64,
                        "store call failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// [`SheetStore`] decorator that applies a [`RetryPolicy`] to every call.
pub struct RetryingStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: SheetStore> RetryingStore<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: SheetStore> SheetStore for RetryingStore<S> {
    async fn worksheets(&self) -> Result<Vec<String>, StoreError> {
        self.policy
            .run("worksheets", StoreError::is_transient, || self.inner.worksheets())
            .await
    }

    async fn get(&self, sheet: &str, range: CellRange) -> Result<Grid, StoreError> {
        self.policy
            .run("get", StoreError::is_transient, || self.inner.get(sheet, range))
            .await
    }

    async fn update(&self, sheet: &str, range: CellRange, values: &Grid) -> Result<(), StoreError> {
        self.policy
            .run("update", StoreError::is_transient, || {
                self.inner.update(sheet, range, values)
            })
            .await
    }

    async fn batch_update(&self, writes: &[SheetWrite]) -> Result<(), StoreError> {
        self.policy
            .run("batch_update", StoreError::is_transient, || {
                self.inner.batch_update(writes)
            })
            .await
    }

    async fn clear(&self, sheet: &str) -> Result<(), StoreError> {
        self.policy
            .run("clear", StoreError::is_transient, || self.inner.clear(sheet))
            .await
    }

    async fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.policy
            .run("append_rows", StoreError::is_safe_to_repeat_write, || {
                self.inner.append_rows(sheet, rows)
            })
            .await
    }

    async fn get_all_values(&self, sheet: &str) -> Result<Grid, StoreError> {
        self.policy
            .run("get_all_values", StoreError::is_transient, || {
                self.inner.get_all_values(sheet)
            })
            .await
    }
}
