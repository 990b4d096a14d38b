/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
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

//! Fire-and-forget request logging. A slow or unavailable log table
//! must never fail the caller's actual request, so `record` swallows
//! its own errors and counts them instead.

use qdb_models::RequestLogEntry;
use qdb_store::RequestLogRepository;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct MonitoringEmitter {
  repo: Arc<dyn RequestLogRepository>,
  dropped: AtomicU64,
}

impl MonitoringEmitter {
  pub fn new(repo: Arc<dyn RequestLogRepository>) -> Self {
    MonitoringEmitter { repo, dropped: AtomicU64::new(0) }
  }

  pub async fn record(&self, entry: RequestLogEntry) {
    if let Err(err) = self.repo.append(&entry).await {
      self.dropped.fetch_add(1, Ordering::Relaxed);
      tracing::warn!(operation = %entry.operation, error = %err, "dropped request log entry");
    }
  }

  pub fn dropped_count(&self) -> u64 {
    self.dropped.load(Ordering::Relaxed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use chrono::Utc;
  use qdb_models::Outcome;
  use qdb_store::{RepositoryError, RepositoryResult};
  use std::sync::Mutex;

  struct FailingLog;

  #[async_trait]
  impl RequestLogRepository for FailingLog {
    async fn append(&self, _entry: &RequestLogEntry) -> RepositoryResult<()> {
      Err(RepositoryError::PoolError("log table unavailable".to_string()))
    }
  }

  struct RecordingLog {
    entries: Mutex<Vec<RequestLogEntry>>,
  }

  #[async_trait]
  impl RequestLogRepository for RecordingLog {
    async fn append(&self, entry: &RequestLogEntry) -> RepositoryResult<()> {
      self.entries.lock().unwrap().push(entry.clone());
      Ok(())
    }
  }

  fn sample_entry() -> RequestLogEntry {
    RequestLogEntry {
      ts: Utc::now().naive_utc(),
      operation: "get_daily_bars".to_string(),
      symbol: Some("600000".to_string()),
      requested_start: None,
      requested_end: None,
      resolved_start: None,
      resolved_end: None,
      cache_hit_ratio: Some(1.0),
      upstream_calls: 0,
      latency_ms: 5,
      outcome: Outcome::Ok,
      error_message: None,
    }
  }

  #[tokio::test]
  async fn test_record_increments_dropped_on_repository_error() {
    let emitter = MonitoringEmitter::new(Arc::new(FailingLog));
    emitter.record(sample_entry()).await;
    assert_eq!(emitter.dropped_count(), 1);
  }

  #[tokio::test]
  async fn test_record_does_not_panic_or_propagate_on_error() {
    let emitter = MonitoringEmitter::new(Arc::new(FailingLog));
    emitter.record(sample_entry()).await;
    emitter.record(sample_entry()).await;
    assert_eq!(emitter.dropped_count(), 2);
  }

  #[tokio::test]
  async fn test_record_forwards_successful_entries() {
    let log = Arc::new(RecordingLog { entries: Mutex::new(Vec::new()) });
    let emitter = MonitoringEmitter::new(Arc::clone(&log) as Arc<dyn RequestLogRepository>);
    emitter.record(sample_entry()).await;
    assert_eq!(emitter.dropped_count(), 0);
    assert_eq!(log.entries.lock().unwrap().len(), 1);
  }
}
