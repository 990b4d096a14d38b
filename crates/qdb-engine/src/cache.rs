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

//! The single composition root collaborators call into: one operation
//! per data kind, each resolving "what do we already have" against
//! "what does this request need" before ever touching the network.
//!
//! Every operation emits exactly one `request_log` entry, success or
//! failure, via the `MonitoringEmitter`. The resolve-call state machine
//! (received, normalized, range resolved, cache-complete or
//! fetch-required, committed, returned) is not a literal state type; it
//! is the sequence of things each method below does as it goes, kept
//! observable through the request log rather than a state enum nothing
//! else needs.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use futures::future::join_all;
use qdb_core::calendar::TradingCalendar;
use qdb_core::config::EngineConfig;
use qdb_core::market::{CalendarRegion, Market};
use qdb_core::symbol;
use qdb_models::{Adjust, Asset, Bar, DataCoverage, DataKind, FinancialSummary, IndexPeriod, Outcome, RealtimeSnapshot, RequestLogEntry};
use qdb_store::{
  AssetRepository, CoverageRepository, CoverageTouch, DailyBarRepository, DatabaseContext, FinancialSummaryRepository,
  IndexBarRepository, RealtimeRepository,
};
use qdb_upstream::UpstreamAdapter;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{EngineError, EngineResult};
use crate::fetch::FetchCoordinator;
use crate::gap::resolve_gap;
use crate::monitoring::MonitoringEmitter;

/// TTL values for every cache kind, per the Cache Service's resolve-call
/// contract.
pub mod ttl {
  use std::time::Duration;

  pub const REALTIME_OPEN: Duration = Duration::from_secs(60);
  pub const REALTIME_CLOSED: Duration = Duration::from_secs(1_800);
  pub const ASSET: Duration = Duration::from_secs(86_400);
  pub const FINANCIAL_SUMMARY: Duration = Duration::from_secs(86_400);
  pub const FINANCIAL_INDICATORS: Duration = Duration::from_secs(604_800);
}

/// `financial_summaries` is keyed `(symbol, period)`; the summary and
/// indicators views share the one upstream fetch but are cached as two
/// distinct period rows so each can carry its own TTL.
const FINANCIAL_PERIOD_SUMMARY: &str = "summary";
const FINANCIAL_PERIOD_INDICATORS: &str = "indicators";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarketPhase {
  Open,
  Closed,
}

/// Whether `market` is in a trading session at `now`. Non-session time
/// (lunch break, pre-open auction, after-hours) counts as `Closed`; the
/// calendar is consulted first so non-trading days are always closed.
fn market_phase(calendar: &TradingCalendar, market: Market, now: DateTime<Utc>) -> EngineResult<MarketPhase> {
  let local = now.with_timezone(&market.timezone());
  let local_date = local.naive_local().date();

  if !calendar.is_trading_day(market.calendar_region(), local_date)? {
    return Ok(MarketPhase::Closed);
  }

  let minutes_since_midnight = local.naive_local().time().num_seconds_from_midnight() / 60;
  let in_session = match market.calendar_region() {
    CalendarRegion::Mainland => {
      (570..=690).contains(&minutes_since_midnight) || (780..=900).contains(&minutes_since_midnight)
    }
    CalendarRegion::HongKong => {
      (570..=720).contains(&minutes_since_midnight) || (780..=960).contains(&minutes_since_midnight)
    }
  };

  Ok(if in_session { MarketPhase::Open } else { MarketPhase::Closed })
}

pub struct CacheService {
  calendar: Arc<TradingCalendar>,
  assets: Arc<dyn AssetRepository>,
  daily_bars: Arc<dyn DailyBarRepository>,
  index_bars: Arc<dyn IndexBarRepository>,
  realtime: Arc<dyn RealtimeRepository>,
  coverage: Arc<dyn CoverageRepository>,
  financial: Arc<dyn FinancialSummaryRepository>,
  fetch: FetchCoordinator,
  monitoring: MonitoringEmitter,
  worker_capacity: usize,
}

impl CacheService {
  pub fn new(adapter: Arc<dyn UpstreamAdapter>, calendar: Arc<TradingCalendar>, db: &DatabaseContext, config: &EngineConfig) -> Self {
    Self::from_parts(
      adapter,
      calendar,
      Arc::new(db.asset_repository()),
      Arc::new(db.daily_bar_repository()),
      Arc::new(db.index_bar_repository()),
      Arc::new(db.realtime_repository()),
      Arc::new(db.coverage_repository()),
      Arc::new(db.financial_summary_repository()),
      Arc::new(db.request_log_repository()),
      config,
    )
  }

  /// Assembles the facade from its collaborators directly, bypassing
  /// `DatabaseContext`. Production code goes through [`Self::new`];
  /// this is how tests wire in-memory repositories and a scripted
  /// adapter.
  #[allow(clippy::too_many_arguments)]
  pub fn from_parts(
    adapter: Arc<dyn UpstreamAdapter>,
    calendar: Arc<TradingCalendar>,
    assets: Arc<dyn AssetRepository>,
    daily_bars: Arc<dyn DailyBarRepository>,
    index_bars: Arc<dyn IndexBarRepository>,
    realtime: Arc<dyn RealtimeRepository>,
    coverage: Arc<dyn CoverageRepository>,
    financial: Arc<dyn FinancialSummaryRepository>,
    request_log: Arc<dyn qdb_store::RequestLogRepository>,
    config: &EngineConfig,
  ) -> Self {
    let retry_policy = qdb_concurrency::RetryPolicy::new(
      std::time::Duration::from_millis(config.retry_policy.base_delay_ms),
      config.retry_policy.backoff_factor,
      std::time::Duration::from_millis(config.retry_policy.max_delay_ms),
      config.retry_policy.max_attempts,
    );

    CacheService {
      calendar,
      assets,
      daily_bars,
      index_bars,
      realtime,
      coverage,
      financial,
      fetch: FetchCoordinator::new(adapter, retry_policy, config.fetch_worker_capacity, config.fetch_queue_cap),
      monitoring: MonitoringEmitter::new(request_log),
      worker_capacity: config.fetch_worker_capacity,
    }
  }

  pub async fn get_daily_bars(&self, raw_symbol: &str, start: NaiveDate, end: NaiveDate, adjust: Adjust) -> EngineResult<Vec<Bar>> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self.resolve_bars(raw_symbol, start, end, adjust, &cancel).await;
    let (bars_result, stats) = split_bars_resolution(result);
    self
      .log_bars_call("get_daily_bars", raw_symbol, start, end, started, &bars_result, stats)
      .await;
    bars_result
  }

  async fn resolve_bars(
    &self,
    raw_symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    adjust: Adjust,
    cancel: &CancellationToken,
  ) -> EngineResult<BarsResolution> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();
    let region = normalized.market.calendar_region();
    let today = Utc::now().date_naive();

    let existing = self.daily_bars.range(symbol, start, end, adjust).await?;
    let present: BTreeSet<NaiveDate> = existing.iter().map(|b| b.trade_date).collect();

    let resolution = resolve_gap(&self.calendar, region, start, end, today, present)?;
    if resolution.expected.is_empty() {
      return Err(EngineError::NoTradingDays);
    }
    let hit_ratio = resolution.present.len() as f64 / resolution.expected.len() as f64;

    for segment in &resolution.segments {
      self
        .fetch
        .fetch_daily_segment(Arc::clone(&self.daily_bars), symbol, normalized.market, *segment, adjust, cancel)
        .await?;
    }

    self.touch_access(symbol, DataKind::Daily, start, end).await?;

    let bars = if resolution.segments.is_empty() {
      existing
    } else {
      self.daily_bars.range(symbol, start, end, adjust).await?
    };
    let calendar_anomaly = has_calendar_anomaly(&resolution.expected, &bars);
    let partial = bars.len() < resolution.expected.len();
    Ok(BarsResolution { bars, hit_ratio, calendar_anomaly, partial, upstream_calls: resolution.segments.len() as i32 })
  }

  pub async fn get_index_bars(&self, raw_symbol: &str, start: NaiveDate, end: NaiveDate, period: IndexPeriod) -> EngineResult<Vec<Bar>> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self.resolve_index_bars(raw_symbol, start, end, period, &cancel).await;
    let (bars_result, stats) = split_bars_resolution(result);
    self
      .log_bars_call("get_index_bars", raw_symbol, start, end, started, &bars_result, stats)
      .await;
    bars_result
  }

  async fn resolve_index_bars(
    &self,
    raw_symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    period: IndexPeriod,
    cancel: &CancellationToken,
  ) -> EngineResult<BarsResolution> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();
    let region = normalized.market.calendar_region();
    let today = Utc::now().date_naive();

    let existing = self.index_bars.range(symbol, start, end, period).await?;
    let present: BTreeSet<NaiveDate> = existing.iter().map(|b| b.trade_date).collect();

    let resolution = resolve_gap(&self.calendar, region, start, end, today, present)?;
    if resolution.expected.is_empty() {
      return Err(EngineError::NoTradingDays);
    }
    let hit_ratio = resolution.present.len() as f64 / resolution.expected.len() as f64;

    for segment in &resolution.segments {
      self
        .fetch
        .fetch_index_segment(Arc::clone(&self.index_bars), symbol, normalized.market, *segment, period, cancel)
        .await?;
    }

    self.touch_access(symbol, DataKind::Index, start, end).await?;

    let bars = if resolution.segments.is_empty() {
      existing
    } else {
      self.index_bars.range(symbol, start, end, period).await?
    };
    let calendar_anomaly = has_calendar_anomaly(&resolution.expected, &bars);
    let partial = bars.len() < resolution.expected.len();
    Ok(BarsResolution { bars, hit_ratio, calendar_anomaly, partial, upstream_calls: resolution.segments.len() as i32 })
  }

  pub async fn get_realtime(&self, raw_symbol: &str) -> EngineResult<RealtimeSnapshot> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self.resolve_realtime(raw_symbol, &cancel).await;
    let (snapshot_result, upstream_calls) = split_simple_resolution(result);
    self.log_simple_call("get_realtime", raw_symbol, started, &snapshot_result, upstream_calls).await;
    snapshot_result
  }

  async fn resolve_realtime(&self, raw_symbol: &str, cancel: &CancellationToken) -> EngineResult<SimpleResolution<RealtimeSnapshot>> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();

    if let Some(cached) = self.realtime.get(symbol).await? {
      let phase = market_phase(&self.calendar, normalized.market, Utc::now())?;
      let ttl = match phase {
        MarketPhase::Open => ttl::REALTIME_OPEN,
        MarketPhase::Closed => ttl::REALTIME_CLOSED,
      };
      let age = Utc::now().naive_utc().signed_duration_since(cached.captured_at);
      if age < chrono::Duration::from_std(ttl).expect("ttl constants fit in i64 millis") {
        return Ok(SimpleResolution { value: cached, upstream_calls: 0 });
      }
    }

    let value = self.fetch.fetch_realtime(Arc::clone(&self.realtime), symbol, normalized.market, cancel).await?;
    Ok(SimpleResolution { value, upstream_calls: 1 })
  }

  /// Resolves a batch of symbols concurrently, bounded by the worker
  /// pool capacity, so one bad symbol never fails the whole batch.
  pub async fn get_realtime_batch(&self, raw_symbols: &[String]) -> HashMap<String, Result<RealtimeSnapshot, EngineError>> {
    let mut results = HashMap::with_capacity(raw_symbols.len());
    for chunk in raw_symbols.chunks(self.worker_capacity.max(1)) {
      let futures = chunk.iter().map(|symbol| async move { (symbol.clone(), self.get_realtime(symbol).await) });
      for (symbol, result) in join_all(futures).await {
        results.insert(symbol, result);
      }
    }
    results
  }

  pub async fn get_asset_info(&self, raw_symbol: &str, force_refresh: bool) -> EngineResult<Asset> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self.resolve_asset(raw_symbol, force_refresh, &cancel).await;
    let (asset_result, upstream_calls) = split_simple_resolution(result);
    self.log_simple_call("get_asset_info", raw_symbol, started, &asset_result, upstream_calls).await;
    asset_result
  }

  async fn resolve_asset(&self, raw_symbol: &str, force_refresh: bool, cancel: &CancellationToken) -> EngineResult<SimpleResolution<Asset>> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();

    if !force_refresh {
      if let Some(cached) = self.assets.get(symbol).await? {
        let age = Utc::now().naive_utc().signed_duration_since(cached.last_metadata_refresh);
        if age < chrono::Duration::from_std(ttl::ASSET).expect("ttl constants fit in i64 millis") {
          return Ok(SimpleResolution { value: cached, upstream_calls: 0 });
        }
      }
    }

    let value = self.fetch.fetch_asset(Arc::clone(&self.assets), symbol, normalized.market, cancel).await?;
    Ok(SimpleResolution { value, upstream_calls: 1 })
  }

  pub async fn get_financial_summary(&self, raw_symbol: &str, force_refresh: bool) -> EngineResult<FinancialSummary> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self
      .resolve_financial(raw_symbol, FINANCIAL_PERIOD_SUMMARY, ttl::FINANCIAL_SUMMARY, force_refresh, &cancel)
      .await;
    let (summary_result, upstream_calls) = split_simple_resolution(result);
    self.log_simple_call("get_financial_summary", raw_symbol, started, &summary_result, upstream_calls).await;
    summary_result
  }

  pub async fn get_financial_indicators(&self, raw_symbol: &str, force_refresh: bool) -> EngineResult<FinancialSummary> {
    let started = Utc::now();
    let cancel = CancellationToken::new();
    let result = self
      .resolve_financial(raw_symbol, FINANCIAL_PERIOD_INDICATORS, ttl::FINANCIAL_INDICATORS, force_refresh, &cancel)
      .await;
    let (summary_result, upstream_calls) = split_simple_resolution(result);
    self.log_simple_call("get_financial_indicators", raw_symbol, started, &summary_result, upstream_calls).await;
    summary_result
  }

  async fn resolve_financial(
    &self,
    raw_symbol: &str,
    period: &str,
    ttl: std::time::Duration,
    force_refresh: bool,
    cancel: &CancellationToken,
  ) -> EngineResult<SimpleResolution<FinancialSummary>> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();

    if !force_refresh {
      if let Some(cached) = self.financial.get(symbol, period).await? {
        let age = Utc::now().naive_utc().signed_duration_since(cached.refreshed_at);
        if age < chrono::Duration::from_std(ttl).expect("ttl constants fit in i64 millis") {
          return Ok(SimpleResolution { value: cached, upstream_calls: 0 });
        }
      }
    }

    let value = self.fetch.fetch_financial_summary(Arc::clone(&self.financial), symbol, period, cancel).await?;
    Ok(SimpleResolution { value, upstream_calls: 1 })
  }

  /// Every coverage row recorded for `raw_symbol`, one per data kind
  /// that has ever been resolved.
  pub async fn cache_stats(&self, raw_symbol: &str) -> EngineResult<Vec<DataCoverage>> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();

    let kinds = [DataKind::Daily, DataKind::Index, DataKind::Realtime, DataKind::Asset, DataKind::Financial];
    let mut stats = Vec::new();
    for kind in kinds {
      if let Some(coverage) = self.coverage.get(symbol, kind).await? {
        stats.push(coverage);
      }
    }
    Ok(stats)
  }

  /// Deletes every cached row for `raw_symbol` across all tables.
  /// Returns the total number of rows removed.
  pub async fn clear_cache(&self, raw_symbol: &str) -> EngineResult<usize> {
    let normalized = symbol::normalize(raw_symbol)?;
    let symbol = normalized.canonical.as_str();

    let removed = self.assets.delete_by_symbol(symbol).await?
      + self.daily_bars.delete_by_symbol(symbol).await?
      + self.index_bars.delete_by_symbol(symbol).await?
      + self.realtime.delete_by_symbol(symbol).await?
      + self.financial.delete_by_symbol(symbol).await?
      + self.coverage.delete_by_symbol(symbol).await?;
    Ok(removed)
  }

  async fn touch_access(&self, symbol: &str, kind: DataKind, start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    let touch = CoverageTouch {
      symbol: symbol.to_string(),
      kind,
      earliest_date: start,
      latest_date: end,
      row_count_delta: 0,
      now: Utc::now().naive_utc(),
    };
    self.coverage.touch(&touch).await.map_err(EngineError::from)
  }

  async fn log_bars_call(
    &self,
    operation: &str,
    raw_symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    started: DateTime<Utc>,
    result: &EngineResult<Vec<Bar>>,
    stats: Option<BarsStats>,
  ) {
    let outcome = match result {
      Ok(bars) if bars.is_empty() || stats.is_some_and(|s| s.partial) => Outcome::Partial,
      Ok(_) if stats.is_some_and(|s| s.calendar_anomaly) => Outcome::OkWithCalendarFlag,
      Ok(_) => Outcome::Ok,
      Err(err) => outcome_for_error(err),
    };
    let latency_ms = (Utc::now() - started).num_milliseconds() as i32;
    let entry = RequestLogEntry {
      ts: started.naive_utc(),
      operation: operation.to_string(),
      symbol: Some(raw_symbol.to_string()),
      requested_start: Some(start),
      requested_end: Some(end),
      resolved_start: result.as_ref().ok().and_then(|bars| bars.first()).map(|b| b.trade_date),
      resolved_end: result.as_ref().ok().and_then(|bars| bars.last()).map(|b| b.trade_date),
      cache_hit_ratio: stats.map(|s| s.hit_ratio),
      upstream_calls: stats.map(|s| s.upstream_calls).unwrap_or(0),
      latency_ms,
      outcome,
      error_message: result.as_ref().err().map(|e| e.to_string()),
    };
    self.monitoring.record(entry).await;
  }

  async fn log_simple_call<T>(&self, operation: &str, raw_symbol: &str, started: DateTime<Utc>, result: &EngineResult<T>, upstream_calls: i32) {
    let outcome = match result {
      Ok(_) => Outcome::Ok,
      Err(err) => outcome_for_error(err),
    };
    let latency_ms = (Utc::now() - started).num_milliseconds() as i32;
    let entry = RequestLogEntry {
      ts: started.naive_utc(),
      operation: operation.to_string(),
      symbol: Some(raw_symbol.to_string()),
      requested_start: None,
      requested_end: None,
      resolved_start: None,
      resolved_end: None,
      cache_hit_ratio: None,
      upstream_calls,
      latency_ms,
      outcome,
      error_message: result.as_ref().err().map(|e| e.to_string()),
    };
    self.monitoring.record(entry).await;
  }
}

/// What `resolve_bars`/`resolve_index_bars` know that the bars
/// themselves don't carry: the pre-fetch cache-hit ratio, how many
/// upstream fetches the call actually issued, whether the store ended
/// up with fewer rows than the calendar expected, and whether any
/// resolved row falls on a date the calendar doesn't consider a trading
/// day for the requested market.
struct BarsResolution {
  bars: Vec<Bar>,
  hit_ratio: f64,
  calendar_anomaly: bool,
  partial: bool,
  upstream_calls: i32,
}

#[derive(Clone, Copy)]
struct BarsStats {
  hit_ratio: f64,
  calendar_anomaly: bool,
  partial: bool,
  upstream_calls: i32,
}

/// Splits a `BarsResolution` back into the `Vec<Bar>` the public methods
/// return and the `BarsStats` the logger needs. Errors carry no stats: a
/// request that never reached a gap resolution (bad symbol, no trading
/// days) has no "present/expected" to report.
fn split_bars_resolution(result: EngineResult<BarsResolution>) -> (EngineResult<Vec<Bar>>, Option<BarsStats>) {
  match result {
    Ok(resolution) => (
      Ok(resolution.bars),
      Some(BarsStats {
        hit_ratio: resolution.hit_ratio,
        calendar_anomaly: resolution.calendar_anomaly,
        partial: resolution.partial,
        upstream_calls: resolution.upstream_calls,
      }),
    ),
    Err(err) => (Err(err), None),
  }
}

/// What `resolve_realtime`/`resolve_asset`/`resolve_financial` know that
/// the resolved value itself doesn't carry: whether the call actually
/// reached upstream or was served straight from the store.
struct SimpleResolution<T> {
  value: T,
  upstream_calls: i32,
}

/// Splits a `SimpleResolution` back into the value the public methods
/// return and the upstream-call count the logger needs. An error path
/// reports zero upstream calls: every fetch attempt that could fail is
/// already wrapped by `FetchCoordinator`, whose own retries don't surface
/// here as separate logged calls.
fn split_simple_resolution<T>(result: EngineResult<SimpleResolution<T>>) -> (EngineResult<T>, i32) {
  match result {
    Ok(resolution) => (Ok(resolution.value), resolution.upstream_calls),
    Err(err) => (Err(err), 0),
  }
}

/// True if any resolved bar's trade date isn't one of the calendar's
/// expected trading days for the requested range — upstream occasionally
/// backfills a row the calendar doesn't recognize (a late correction, a
/// half-day session not in the holiday tables).
fn has_calendar_anomaly(expected: &[NaiveDate], bars: &[Bar]) -> bool {
  let expected: BTreeSet<NaiveDate> = expected.iter().copied().collect();
  bars.iter().any(|b| !expected.contains(&b.trade_date))
}

fn outcome_for_error(err: &EngineError) -> Outcome {
  match err {
    EngineError::InvalidSymbol(_) => Outcome::InvalidSymbol,
    EngineError::NoTradingDays => Outcome::NoTradingDays,
    EngineError::UpstreamFail(_) | EngineError::InternalInconsistency(_) => Outcome::UpstreamFail,
    EngineError::UpstreamOverloaded => Outcome::UpstreamOverloaded,
    EngineError::Cancelled => Outcome::Cancelled,
    EngineError::DataUnavailable(_) => Outcome::DataUnavailable,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_market_phase_mainland_morning_session_is_open() {
    let calendar = TradingCalendar::new();
    let morning_utc = Utc.with_ymd_and_hms(2024, 1, 2, 2, 0, 0).unwrap();
    let phase = market_phase(&calendar, Market::ASh, morning_utc).unwrap();
    assert_eq!(phase, MarketPhase::Open);
  }

  #[test]
  fn test_market_phase_mainland_lunch_break_is_closed() {
    let calendar = TradingCalendar::new();
    let lunch_utc = Utc.with_ymd_and_hms(2024, 1, 2, 4, 15, 0).unwrap();
    let phase = market_phase(&calendar, Market::ASh, lunch_utc).unwrap();
    assert_eq!(phase, MarketPhase::Closed);
  }

  #[test]
  fn test_market_phase_non_trading_day_is_closed() {
    let calendar = TradingCalendar::new();
    let saturday_utc = Utc.with_ymd_and_hms(2024, 1, 6, 2, 0, 0).unwrap();
    let phase = market_phase(&calendar, Market::ASh, saturday_utc).unwrap();
    assert_eq!(phase, MarketPhase::Closed);
  }

  #[test]
  fn test_market_phase_hk_afternoon_session_is_open() {
    let calendar = TradingCalendar::new();
    // 2024-01-02 14:30 HKT is 2024-01-02 06:30 UTC, inside the 13:00-16:00 afternoon session.
    let afternoon_utc = Utc.with_ymd_and_hms(2024, 1, 2, 6, 30, 0).unwrap();
    let phase = market_phase(&calendar, Market::Hk, afternoon_utc).unwrap();
    assert_eq!(phase, MarketPhase::Open);
  }
}
