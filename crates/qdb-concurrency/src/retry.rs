/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Exponential backoff retry, independent of any particular transport
//! or error type. The fetch coordinator parameterizes this with
//! upstream-adapter errors; anything that can say whether it is worth
//! retrying can reuse it.

use std::future::Future;
use std::time::Duration;

/// Base delay, growth factor, cap, and attempt budget for a retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub base_delay: Duration,
  pub backoff_factor: u32,
  pub max_delay: Duration,
  pub max_attempts: u32,
}

impl RetryPolicy {
  pub fn new(base_delay: Duration, backoff_factor: u32, max_delay: Duration, max_attempts: u32) -> Self {
    RetryPolicy { base_delay, backoff_factor, max_delay, max_attempts }
  }

  /// Delay before the given attempt (1-indexed: the delay waited
  /// *before* retrying after attempt `attempt` failed).
  pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
    let factor = self.backoff_factor.saturating_pow(attempt.saturating_sub(1));
    let scaled = self.base_delay.saturating_mul(factor);
    std::cmp::min(scaled, self.max_delay)
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    RetryPolicy {
      base_delay: Duration::from_millis(500),
      backoff_factor: 2,
      max_delay: Duration::from_secs(8),
      max_attempts: 3,
    }
  }
}

/// Outcome of a single attempt, as judged by the caller's classifier.
pub enum AttemptOutcome<T, E> {
  /// Succeeded; stop retrying.
  Done(T),
  /// Failed but worth retrying, if attempts remain.
  Retryable(E),
  /// Failed in a way retrying cannot fix; stop immediately.
  Fatal(E),
}

/// Run `attempt` up to `policy.max_attempts` times, sleeping with
/// exponential backoff between tries. `attempt` classifies its own
/// failures via `AttemptOutcome` so this helper stays error-agnostic.
///
/// Returns the last error seen (retryable or fatal) if every attempt
/// failed or a fatal error was hit early.
pub async fn retry_with_backoff<F, Fut, T, E>(policy: &RetryPolicy, mut attempt: F) -> Result<T, E>
where
  F: FnMut(u32) -> Fut,
  Fut: Future<Output = AttemptOutcome<T, E>>,
{
  let mut last_error = None;
  for n in 1..=policy.max_attempts {
    match attempt(n).await {
      AttemptOutcome::Done(value) => return Ok(value),
      AttemptOutcome::Fatal(err) => return Err(err),
      AttemptOutcome::Retryable(err) => {
        last_error = Some(err);
        if n < policy.max_attempts {
          tokio::time::sleep(policy.delay_for_attempt(n)).await;
        }
      }
    }
  }
  Err(last_error.expect("at least one attempt runs when max_attempts >= 1"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicU32, Ordering};

  #[test]
  fn test_delay_grows_exponentially() {
    let policy = RetryPolicy::new(Duration::from_millis(500), 2, Duration::from_secs(8), 5);
    assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
    assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(1000));
    assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(2000));
    assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(4000));
  }

  #[test]
  fn test_delay_caps_at_max_delay() {
    let policy = RetryPolicy::new(Duration::from_millis(500), 2, Duration::from_secs(8), 10);
    assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(8));
  }

  #[test]
  fn test_default_policy_matches_documented_values() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.base_delay, Duration::from_millis(500));
    assert_eq!(policy.backoff_factor, 2);
    assert_eq!(policy.max_delay, Duration::from_secs(8));
    assert_eq!(policy.max_attempts, 3);
  }

  #[tokio::test]
  async fn test_succeeds_on_first_attempt_without_sleeping() {
    let policy = RetryPolicy::new(Duration::from_millis(1), 2, Duration::from_millis(8), 3);
    let calls = AtomicU32::new(0);
    let result: Result<&str, &str> = retry_with_backoff(&policy, |_n| {
      calls.fetch_add(1, Ordering::SeqCst);
      async { AttemptOutcome::Done("ok") }
    })
    .await;
    assert_eq!(result, Ok("ok"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_retries_until_success() {
    let policy = RetryPolicy::new(Duration::from_millis(1), 2, Duration::from_millis(8), 5);
    let calls = AtomicU32::new(0);
    let result: Result<&str, &str> = retry_with_backoff(&policy, |_n| {
      let count = calls.fetch_add(1, Ordering::SeqCst) + 1;
      async move {
        if count < 3 {
          AttemptOutcome::Retryable("transient")
        } else {
          AttemptOutcome::Done("ok")
        }
      }
    })
    .await;
    assert_eq!(result, Ok("ok"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn test_exhausts_attempts_and_returns_last_error() {
    let policy = RetryPolicy::new(Duration::from_millis(1), 2, Duration::from_millis(8), 3);
    let calls = AtomicU32::new(0);
    let result: Result<&str, &str> = retry_with_backoff(&policy, |n| {
      calls.fetch_add(1, Ordering::SeqCst);
      async move { AttemptOutcome::Retryable(if n == 3 { "final" } else { "transient" }) }
    })
    .await;
    assert_eq!(result, Err("final"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn test_fatal_error_stops_immediately() {
    let policy = RetryPolicy::new(Duration::from_millis(1), 2, Duration::from_millis(8), 5);
    let calls = AtomicU32::new(0);
    let result: Result<&str, &str> = retry_with_backoff(&policy, |_n| {
      calls.fetch_add(1, Ordering::SeqCst);
      async { AttemptOutcome::Fatal("invalid symbol") }
    })
    .await;
    assert_eq!(result, Err("invalid symbol"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }
}
