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

//! Serializes and rate-limits every upstream-originated write. One
//! `FetchCoordinator` is shared by the whole cache service; it is the
//! sole writer of rows that originate upstream, so no two callers can
//! race to upsert the same segment.
//!
//! Three mechanisms compose here: an in-flight registry collapses
//! concurrent requests for the same fetch signature into one upstream
//! call, a semaphore bounds how many fetches run at once, and a retry
//! policy absorbs transient upstream failures.

use chrono::{NaiveDate, Utc};
use qdb_concurrency::inflight::Outcome as InFlightOutcome;
use qdb_concurrency::retry::{retry_with_backoff, AttemptOutcome};
use qdb_concurrency::{InFlightRegistry, RetryPolicy};
use qdb_core::market::Market;
use qdb_models::{Adjust, Asset, Bar, DataKind, FinancialSummary, IndexPeriod, RealtimeSnapshot};
use qdb_store::{AssetRepository, CoverageTouch, DailyBarRepository, FinancialSummaryRepository, IndexBarRepository, RealtimeRepository};
use qdb_upstream::{AdapterError, UpstreamAdapter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::error::{EngineError, EngineResult};
use crate::gap::Segment;

/// Uniquely identifies one in-flight upstream fetch. Two calls that
/// produce the same signature attach to the same attempt rather than
/// issuing a second upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum FetchSignature {
  Daily { symbol: String, start: NaiveDate, end: NaiveDate, adjust: Adjust },
  Index { symbol: String, start: NaiveDate, end: NaiveDate, period: IndexPeriod },
  Realtime { symbol: String },
  Asset { symbol: String },
  FinancialSummary { symbol: String, period: String },
}

pub struct FetchCoordinator {
  adapter: Arc<dyn UpstreamAdapter>,
  inflight: InFlightRegistry<FetchSignature>,
  retry_policy: RetryPolicy,
  semaphore: Arc<Semaphore>,
  queue_depth: AtomicUsize,
  queue_cap: usize,
}

impl FetchCoordinator {
  pub fn new(adapter: Arc<dyn UpstreamAdapter>, retry_policy: RetryPolicy, worker_capacity: usize, queue_cap: usize) -> Self {
    FetchCoordinator {
      adapter,
      inflight: InFlightRegistry::new(),
      retry_policy,
      semaphore: Arc::new(Semaphore::new(worker_capacity.max(1))),
      queue_depth: AtomicUsize::new(0),
      queue_cap,
    }
  }

  /// Fetch and commit one missing daily-bar segment. Returns the number
  /// of rows written by the *owner* of this signature; an attaching
  /// caller gets `0` back and is expected to re-read the store itself.
  pub async fn fetch_daily_segment(
    &self,
    store: Arc<dyn DailyBarRepository>,
    symbol: &str,
    market: Market,
    segment: Segment,
    adjust: Adjust,
    cancel: &CancellationToken,
  ) -> EngineResult<usize> {
    let signature =
      FetchSignature::Daily { symbol: symbol.to_string(), start: segment.start, end: segment.end, adjust };
    let outcome = self
      .inflight
      .run(signature, || self.fetch_and_commit_daily(store, symbol, market, segment, adjust, cancel))
      .await;
    match outcome {
      InFlightOutcome::Owner(result) => result,
      InFlightOutcome::Attached => Ok(0),
    }
  }

  async fn fetch_and_commit_daily(
    &self,
    store: Arc<dyn DailyBarRepository>,
    symbol: &str,
    market: Market,
    segment: Segment,
    adjust: Adjust,
    cancel: &CancellationToken,
  ) -> EngineResult<usize> {
    let bars = self
      .call_with_backpressure_and_retry(cancel, || self.adapter.fetch_daily(symbol, market, segment.start, segment.end, adjust))
      .await?;
    if bars.is_empty() {
      return Ok(0);
    }

    let (earliest, latest) = bar_date_bounds(&bars)?;
    let touch = CoverageTouch {
      symbol: symbol.to_string(),
      kind: DataKind::Daily,
      earliest_date: earliest,
      latest_date: latest,
      row_count_delta: bars.len() as i64,
      now: Utc::now().naive_utc(),
    };

    let committed = store.upsert_batch_and_touch_coverage(&bars, &touch).await?;
    verify_write(&bars.len(), &store.range(symbol, earliest, latest, adjust).await?.len(), symbol)?;
    Ok(committed)
  }

  pub async fn fetch_index_segment(
    &self,
    store: Arc<dyn IndexBarRepository>,
    symbol: &str,
    market: Market,
    segment: Segment,
    period: IndexPeriod,
    cancel: &CancellationToken,
  ) -> EngineResult<usize> {
    let signature =
      FetchSignature::Index { symbol: symbol.to_string(), start: segment.start, end: segment.end, period };
    let outcome = self
      .inflight
      .run(signature, || self.fetch_and_commit_index(store, symbol, market, segment, period, cancel))
      .await;
    match outcome {
      InFlightOutcome::Owner(result) => result,
      InFlightOutcome::Attached => Ok(0),
    }
  }

  async fn fetch_and_commit_index(
    &self,
    store: Arc<dyn IndexBarRepository>,
    symbol: &str,
    market: Market,
    segment: Segment,
    period: IndexPeriod,
    cancel: &CancellationToken,
  ) -> EngineResult<usize> {
    let bars = self
      .call_with_backpressure_and_retry(cancel, || {
        self.adapter.fetch_index_daily(symbol, market, segment.start, segment.end, period)
      })
      .await?;
    if bars.is_empty() {
      return Ok(0);
    }

    let (earliest, latest) = bar_date_bounds(&bars)?;
    let touch = CoverageTouch {
      symbol: symbol.to_string(),
      kind: DataKind::Index,
      earliest_date: earliest,
      latest_date: latest,
      row_count_delta: bars.len() as i64,
      now: Utc::now().naive_utc(),
    };

    let committed = store.upsert_batch_and_touch_coverage(&bars, period, &touch).await?;
    verify_write(&bars.len(), &store.range(symbol, earliest, latest, period).await?.len(), symbol)?;
    Ok(committed)
  }

  pub async fn fetch_realtime(
    &self,
    store: Arc<dyn RealtimeRepository>,
    symbol: &str,
    market: Market,
    cancel: &CancellationToken,
  ) -> EngineResult<RealtimeSnapshot> {
    let signature = FetchSignature::Realtime { symbol: symbol.to_string() };
    let outcome = self
      .inflight
      .run(signature, || self.fetch_and_commit_realtime(Arc::clone(&store), symbol, market, cancel))
      .await;
    match outcome {
      InFlightOutcome::Owner(result) => result,
      InFlightOutcome::Attached => {
        store.get(symbol).await?.ok_or_else(|| EngineError::DataUnavailable(symbol.to_string()))
      }
    }
  }

  async fn fetch_and_commit_realtime(
    &self,
    store: Arc<dyn RealtimeRepository>,
    symbol: &str,
    market: Market,
    cancel: &CancellationToken,
  ) -> EngineResult<RealtimeSnapshot> {
    let snapshot =
      self.call_with_backpressure_and_retry(cancel, || self.adapter.fetch_realtime(symbol, market)).await?;
    store.upsert(&snapshot).await?;
    Ok(snapshot)
  }

  pub async fn fetch_asset(
    &self,
    store: Arc<dyn AssetRepository>,
    symbol: &str,
    market: Market,
    cancel: &CancellationToken,
  ) -> EngineResult<Asset> {
    let signature = FetchSignature::Asset { symbol: symbol.to_string() };
    let outcome = self
      .inflight
      .run(signature, || self.fetch_and_commit_asset(Arc::clone(&store), symbol, market, cancel))
      .await;
    match outcome {
      InFlightOutcome::Owner(result) => result,
      InFlightOutcome::Attached => {
        store.get(symbol).await?.ok_or_else(|| EngineError::DataUnavailable(symbol.to_string()))
      }
    }
  }

  async fn fetch_and_commit_asset(
    &self,
    store: Arc<dyn AssetRepository>,
    symbol: &str,
    market: Market,
    cancel: &CancellationToken,
  ) -> EngineResult<Asset> {
    let asset = self.call_with_backpressure_and_retry(cancel, || self.adapter.fetch_asset(symbol, market)).await?;
    store.upsert(&asset).await?;
    Ok(asset)
  }

  pub async fn fetch_financial_summary(
    &self,
    store: Arc<dyn FinancialSummaryRepository>,
    symbol: &str,
    period: &str,
    cancel: &CancellationToken,
  ) -> EngineResult<FinancialSummary> {
    let signature = FetchSignature::FinancialSummary { symbol: symbol.to_string(), period: period.to_string() };
    let owned_period = period.to_string();
    let outcome = self
      .inflight
      .run(signature, || self.fetch_and_commit_financial_summary(Arc::clone(&store), symbol, &owned_period, cancel))
      .await;
    match outcome {
      InFlightOutcome::Owner(result) => result,
      InFlightOutcome::Attached => store
        .get(symbol, period)
        .await?
        .ok_or_else(|| EngineError::DataUnavailable(symbol.to_string())),
    }
  }

  async fn fetch_and_commit_financial_summary(
    &self,
    store: Arc<dyn FinancialSummaryRepository>,
    symbol: &str,
    period: &str,
    cancel: &CancellationToken,
  ) -> EngineResult<FinancialSummary> {
    let mut summary =
      self.call_with_backpressure_and_retry(cancel, || self.adapter.fetch_financial_summary(symbol)).await?;
    summary.period = period.to_string();
    store.upsert(&summary).await?;
    Ok(summary)
  }

  /// Acquires a worker-pool slot, then runs `call` through the retry
  /// policy, treating `AdapterError::is_retryable()` as the classifier.
  /// A cancellation observed while waiting on the slot or on the
  /// upstream call itself aborts immediately rather than letting the
  /// retry loop continue spending attempts.
  async fn call_with_backpressure_and_retry<F, Fut, T>(&self, cancel: &CancellationToken, call: F) -> EngineResult<T>
  where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, AdapterError>>,
  {
    let _permit = self.acquire_slot(cancel).await?;

    let outcome = retry_with_backoff(&self.retry_policy, |_attempt| {
      let fut = call();
      let cancelled = cancel.clone();
      async move {
        tokio::select! {
          biased;
          _ = cancelled.cancelled() => AttemptOutcome::Fatal(None),
          res = fut => match res {
            Ok(value) => AttemptOutcome::Done(value),
            Err(err) if err.is_retryable() => AttemptOutcome::Retryable(Some(err)),
            Err(err) => AttemptOutcome::Fatal(Some(err)),
          },
        }
      }
    })
    .await;

    match outcome {
      Ok(value) => Ok(value),
      Err(Some(err)) => Err(EngineError::from(err)),
      Err(None) => Err(EngineError::Cancelled),
    }
  }

  async fn acquire_slot(&self, cancel: &CancellationToken) -> EngineResult<OwnedSemaphorePermit> {
    let waiting = self.queue_depth.fetch_add(1, Ordering::SeqCst) + 1;
    if waiting > self.queue_cap {
      self.queue_depth.fetch_sub(1, Ordering::SeqCst);
      return Err(EngineError::UpstreamOverloaded);
    }

    let permit = tokio::select! {
      biased;
      _ = cancel.cancelled() => {
        self.queue_depth.fetch_sub(1, Ordering::SeqCst);
        return Err(EngineError::Cancelled);
      }
      permit = self.semaphore.clone().acquire_owned() => {
        permit.expect("fetch coordinator semaphore is never closed")
      }
    };
    self.queue_depth.fetch_sub(1, Ordering::SeqCst);
    Ok(permit)
  }
}

fn bar_date_bounds(bars: &[Bar]) -> EngineResult<(NaiveDate, NaiveDate)> {
  let earliest = bars
    .iter()
    .map(|b| b.trade_date)
    .min()
    .ok_or_else(|| EngineError::InternalInconsistency("commit requested for an empty bar batch".to_string()))?;
  let latest = bars
    .iter()
    .map(|b| b.trade_date)
    .max()
    .ok_or_else(|| EngineError::InternalInconsistency("commit requested for an empty bar batch".to_string()))?;
  Ok((earliest, latest))
}

/// Re-reads the just-written range and raises `InternalInconsistency`,
/// logged then downgraded to `UpstreamFail` for the caller, if fewer
/// rows come back than were written.
fn verify_write(written: &usize, found: &usize, symbol: &str) -> EngineResult<()> {
  if found < written {
    let err = EngineError::InternalInconsistency(format!(
      "wrote {written} rows for {symbol} but a verifying re-read found only {found}"
    ));
    tracing::error!(symbol = %symbol, written = %written, found = %found, "post-commit verification failed");
    return Err(EngineError::UpstreamFail(err.to_string()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use qdb_core::market::Market;
  use qdb_store::RepositoryResult;
  use std::sync::atomic::AtomicU32;
  use std::sync::Mutex;
  use std::time::Duration;

  struct FakeAdapter {
    daily_calls: AtomicU32,
    daily_script: Mutex<Vec<Result<Vec<Bar>, AdapterError>>>,
  }

  impl FakeAdapter {
    fn with_daily_script(script: Vec<Result<Vec<Bar>, AdapterError>>) -> Self {
      FakeAdapter { daily_calls: AtomicU32::new(0), daily_script: Mutex::new(script) }
    }
  }

  #[async_trait]
  impl UpstreamAdapter for FakeAdapter {
    async fn fetch_daily(
      &self,
      _symbol: &str,
      _market: Market,
      _start: NaiveDate,
      _end: NaiveDate,
      _adjust: Adjust,
    ) -> Result<Vec<Bar>, AdapterError> {
      self.daily_calls.fetch_add(1, Ordering::SeqCst);
      let mut script = self.daily_script.lock().unwrap();
      if script.is_empty() {
        return Ok(Vec::new());
      }
      script.remove(0)
    }

    async fn fetch_realtime(&self, symbol: &str, _market: Market) -> Result<RealtimeSnapshot, AdapterError> {
      Ok(RealtimeSnapshot {
        symbol: symbol.to_string(),
        last_price: 1.0,
        change: 0.0,
        pct_change: 0.0,
        volume: 0,
        turnover: 0.0,
        pe: None,
        pb: None,
        market_cap: None,
        captured_at: Utc::now().naive_utc(),
      })
    }

    async fn fetch_asset(&self, symbol: &str, market: Market) -> Result<Asset, AdapterError> {
      Ok(Asset {
        symbol: symbol.to_string(),
        display_name: symbol.to_string(),
        market: market.to_string(),
        industry: None,
        listing_date: None,
        pe: None,
        pb: None,
        roe: None,
        total_shares: None,
        float_shares: None,
        market_cap: None,
        metadata_source: "fake".to_string(),
        last_metadata_refresh: Utc::now().naive_utc(),
      })
    }

    async fn fetch_index_daily(
      &self,
      _symbol: &str,
      _market: Market,
      _start: NaiveDate,
      _end: NaiveDate,
      _period: IndexPeriod,
    ) -> Result<Vec<Bar>, AdapterError> {
      Ok(Vec::new())
    }

    async fn fetch_financial_summary(&self, symbol: &str) -> Result<FinancialSummary, AdapterError> {
      Ok(FinancialSummary {
        symbol: symbol.to_string(),
        period: "summary".to_string(),
        metrics: Default::default(),
        refreshed_at: Utc::now().naive_utc(),
      })
    }
  }

  struct FakeDailyBarStore {
    rows: Mutex<Vec<Bar>>,
  }

  impl FakeDailyBarStore {
    fn new() -> Self {
      FakeDailyBarStore { rows: Mutex::new(Vec::new()) }
    }
  }

  #[async_trait]
  impl DailyBarRepository for FakeDailyBarStore {
    async fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate, adjust: Adjust) -> RepositoryResult<Vec<Bar>> {
      let rows = self.rows.lock().unwrap();
      Ok(
        rows
          .iter()
          .filter(|b| b.symbol == symbol && b.adjust == adjust && b.trade_date >= start && b.trade_date <= end)
          .cloned()
          .collect(),
      )
    }

    async fn upsert_batch(&self, bars: &[Bar]) -> RepositoryResult<usize> {
      self.rows.lock().unwrap().extend(bars.iter().cloned());
      Ok(bars.len())
    }

    async fn upsert_batch_and_touch_coverage(
      &self,
      bars: &[Bar],
      _touch: &CoverageTouch,
    ) -> RepositoryResult<usize> {
      self.upsert_batch(bars).await
    }

    async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
      let mut rows = self.rows.lock().unwrap();
      let before = rows.len();
      rows.retain(|b| b.symbol != symbol);
      Ok(before - rows.len())
    }
  }

  fn sample_bar(date: NaiveDate) -> Bar {
    Bar {
      symbol: "600000".to_string(),
      trade_date: date,
      adjust: Adjust::Raw,
      open: 10.0,
      high: 10.5,
      low: 9.8,
      close: 10.2,
      volume: 1_000_000,
      turnover: 10_200_000.0,
      amplitude: 7.0,
      pct_change: 2.0,
      change: 0.2,
      turnover_rate: 1.5,
    }
  }

  fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(1), 2, Duration::from_millis(8), 3)
  }

  #[tokio::test]
  async fn test_fetch_daily_segment_commits_bars() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![Ok(vec![sample_bar(date)])]));
    let coordinator = FetchCoordinator::new(adapter, fast_retry_policy(), 4, 16);
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());
    let cancel = CancellationToken::new();

    let written = coordinator
      .fetch_daily_segment(Arc::clone(&store), "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel)
      .await
      .unwrap();
    assert_eq!(written, 1);
    assert_eq!(store.range("600000", date, date, Adjust::Raw).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_retries_then_succeeds_on_transient_error() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![
      Err(AdapterError::Transient("timeout".to_string())),
      Ok(vec![sample_bar(date)]),
    ]));
    let coordinator = FetchCoordinator::new(Arc::clone(&adapter) as Arc<dyn UpstreamAdapter>, fast_retry_policy(), 4, 16);
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());
    let cancel = CancellationToken::new();

    let written = coordinator
      .fetch_daily_segment(store, "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel)
      .await
      .unwrap();
    assert_eq!(written, 1);
    assert_eq!(adapter.daily_calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_invalid_symbol_does_not_retry() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![Err(AdapterError::InvalidSymbol("ZZZZZZ".to_string()))]));
    let coordinator = FetchCoordinator::new(Arc::clone(&adapter) as Arc<dyn UpstreamAdapter>, fast_retry_policy(), 4, 16);
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());
    let cancel = CancellationToken::new();

    let err = coordinator
      .fetch_daily_segment(store, "ZZZZZZ", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel)
      .await
      .unwrap_err();
    assert!(matches!(err, EngineError::InvalidSymbol(_)));
    assert_eq!(adapter.daily_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_concurrent_fetches_of_the_same_segment_coalesce() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![Ok(vec![sample_bar(date)])]));
    let coordinator = Arc::new(FetchCoordinator::new(Arc::clone(&adapter) as Arc<dyn UpstreamAdapter>, fast_retry_policy(), 1, 16));
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());

    let c1 = Arc::clone(&coordinator);
    let s1 = Arc::clone(&store);
    let first = tokio::spawn(async move {
      let cancel = CancellationToken::new();
      c1.fetch_daily_segment(s1, "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel).await
    });

    tokio::time::sleep(Duration::from_millis(2)).await;

    let c2 = Arc::clone(&coordinator);
    let s2 = Arc::clone(&store);
    let second = tokio::spawn(async move {
      let cancel = CancellationToken::new();
      c2.fetch_daily_segment(s2, "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel).await
    });

    let (r1, r2) = tokio::join!(first, second);
    r1.unwrap().unwrap();
    r2.unwrap().unwrap();
    assert_eq!(adapter.daily_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_backpressure_rejects_when_queue_cap_exceeded() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![]));
    // Zero worker slots available and a zero queue cap means the very
    // first caller already exceeds the cap and fails fast.
    let coordinator = FetchCoordinator::new(adapter, fast_retry_policy(), 1, 0);
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());
    let cancel = CancellationToken::new();

    let err = coordinator
      .fetch_daily_segment(store, "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel)
      .await
      .unwrap_err();
    assert!(matches!(err, EngineError::UpstreamOverloaded));
  }

  #[tokio::test]
  async fn test_cancellation_before_acquire_returns_cancelled() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let adapter = Arc::new(FakeAdapter::with_daily_script(vec![]));
    let coordinator = FetchCoordinator::new(adapter, fast_retry_policy(), 1, 16);
    let store: Arc<dyn DailyBarRepository> = Arc::new(FakeDailyBarStore::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = coordinator
      .fetch_daily_segment(store, "600000", Market::ASh, Segment { start: date, end: date }, Adjust::Raw, &cancel)
      .await
      .unwrap_err();
    assert!(matches!(err, EngineError::Cancelled));
  }
}
