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

use crate::adapter::UpstreamAdapter;
use crate::error::AdapterError;
use crate::transport::Transport;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use governor::{
  clock::DefaultClock,
  state::{InMemoryState, NotKeyed},
  Quota, RateLimiter,
};
use qdb_core::market::Market;
use qdb_models::{Adjust, Asset, Bar, FinancialSummary, IndexPeriod, RealtimeSnapshot};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::instrument;

/// Concrete adapter over an AKShare-like HTTP gateway. One instance per
/// process; shared behind an `Arc<dyn UpstreamAdapter>` by the fetch
/// coordinator.
pub struct AkshareAdapter {
  transport: Arc<Transport>,
  rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl AkshareAdapter {
  pub fn new(transport: Arc<Transport>, requests_per_minute: u32) -> Self {
    let quota = Quota::per_minute(
      NonZeroU32::new(requests_per_minute).unwrap_or_else(|| NonZeroU32::new(60).unwrap()),
    );
    let rate_limiter = Arc::new(RateLimiter::direct(quota));
    Self { transport, rate_limiter }
  }

  async fn wait_for_rate_limit(&self) {
    self.rate_limiter.until_ready().await;
  }
}

#[async_trait]
impl UpstreamAdapter for AkshareAdapter {
  #[instrument(skip(self), fields(symbol = %canonical_symbol))]
  async fn fetch_daily(
    &self,
    canonical_symbol: &str,
    market: Market,
    start: NaiveDate,
    end: NaiveDate,
    adjust: Adjust,
  ) -> Result<Vec<Bar>, AdapterError> {
    self.wait_for_rate_limit().await;

    let mut params = HashMap::new();
    params.insert("symbol".to_string(), canonical_symbol.to_string());
    params.insert("start_date".to_string(), start.format("%Y%m%d").to_string());
    params.insert("end_date".to_string(), end.format("%Y%m%d").to_string());
    params.insert("adjust".to_string(), adjust_param(adjust).to_string());
    let _ = market;

    let rows: Vec<WireBar> = self.transport.get("/stock_zh_a_hist", &params).await?;
    rows
      .into_iter()
      .map(|row| row.into_bar(canonical_symbol, adjust))
      .collect()
  }

  #[instrument(skip(self), fields(symbol = %canonical_symbol))]
  async fn fetch_realtime(
    &self,
    canonical_symbol: &str,
    market: Market,
  ) -> Result<RealtimeSnapshot, AdapterError> {
    self.wait_for_rate_limit().await;

    let mut params = HashMap::new();
    params.insert("symbol".to_string(), canonical_symbol.to_string());
    let _ = market;

    let row: WireRealtime = self.transport.get("/stock_zh_a_spot", &params).await?;
    row.into_snapshot(canonical_symbol)
  }

  #[instrument(skip(self), fields(symbol = %canonical_symbol))]
  async fn fetch_asset(&self, canonical_symbol: &str, market: Market) -> Result<Asset, AdapterError> {
    self.wait_for_rate_limit().await;

    let mut params = HashMap::new();
    params.insert("symbol".to_string(), canonical_symbol.to_string());

    let row: WireAsset = self.transport.get("/stock_individual_info", &params).await?;
    row.into_asset(canonical_symbol, market)
  }

  #[instrument(skip(self), fields(symbol = %canonical_symbol))]
  async fn fetch_index_daily(
    &self,
    canonical_symbol: &str,
    market: Market,
    start: NaiveDate,
    end: NaiveDate,
    period: IndexPeriod,
  ) -> Result<Vec<Bar>, AdapterError> {
    self.wait_for_rate_limit().await;

    let mut params = HashMap::new();
    params.insert("symbol".to_string(), canonical_symbol.to_string());
    params.insert("start_date".to_string(), start.format("%Y%m%d").to_string());
    params.insert("end_date".to_string(), end.format("%Y%m%d").to_string());
    params.insert("period".to_string(), period_param(period).to_string());
    let _ = market;

    let rows: Vec<WireBar> = self.transport.get("/stock_zh_index_daily", &params).await?;
    rows
      .into_iter()
      .map(|row| row.into_bar(canonical_symbol, Adjust::Raw))
      .collect()
  }

  #[instrument(skip(self), fields(symbol = %canonical_symbol))]
  async fn fetch_financial_summary(&self, canonical_symbol: &str) -> Result<FinancialSummary, AdapterError> {
    self.wait_for_rate_limit().await;

    let mut params = HashMap::new();
    params.insert("symbol".to_string(), canonical_symbol.to_string());

    let row: WireFinancialSummary = self.transport.get("/stock_financial_abstract", &params).await?;
    row.into_summary(canonical_symbol)
  }
}

fn adjust_param(adjust: Adjust) -> &'static str {
  match adjust {
    Adjust::Raw => "",
    Adjust::Forward => "qfq",
    Adjust::Backward => "hfq",
  }
}

fn period_param(period: IndexPeriod) -> &'static str {
  match period {
    IndexPeriod::Daily => "daily",
    IndexPeriod::Weekly => "weekly",
    IndexPeriod::Monthly => "monthly",
  }
}

#[derive(Debug, Deserialize)]
struct WireBar {
  date: String,
  open: f64,
  high: f64,
  low: f64,
  close: f64,
  volume: i64,
  amount: Option<f64>,
  amplitude: Option<f64>,
  pct_chg: Option<f64>,
  change: Option<f64>,
  turnover_rate: Option<f64>,
}

impl WireBar {
  fn into_bar(self, symbol: &str, adjust: Adjust) -> Result<Bar, AdapterError> {
    let trade_date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
      .or_else(|_| NaiveDate::parse_from_str(&self.date, "%Y%m%d"))
      .map_err(|e| AdapterError::Unknown(format!("unparseable bar date {:?}: {e}", self.date)))?;

    Ok(Bar {
      symbol: symbol.to_string(),
      trade_date,
      adjust,
      open: self.open,
      high: self.high,
      low: self.low,
      close: self.close,
      volume: self.volume,
      turnover: self.amount.unwrap_or(0.0),
      amplitude: self.amplitude.unwrap_or(0.0),
      pct_change: self.pct_chg.unwrap_or(0.0),
      change: self.change.unwrap_or(0.0),
      turnover_rate: self.turnover_rate.unwrap_or(0.0),
    })
  }
}

#[derive(Debug, Deserialize)]
struct WireRealtime {
  last_price: f64,
  change: f64,
  pct_chg: f64,
  volume: i64,
  amount: Option<f64>,
  pe: Option<f64>,
  pb: Option<f64>,
  total_mv: Option<f64>,
}

impl WireRealtime {
  fn into_snapshot(self, symbol: &str) -> Result<RealtimeSnapshot, AdapterError> {
    Ok(RealtimeSnapshot {
      symbol: symbol.to_string(),
      last_price: self.last_price,
      change: self.change,
      pct_change: self.pct_chg,
      volume: self.volume,
      turnover: self.amount.unwrap_or(0.0),
      pe: self.pe,
      pb: self.pb,
      market_cap: self.total_mv,
      captured_at: Utc::now().naive_utc(),
    })
  }
}

#[derive(Debug, Deserialize)]
struct WireAsset {
  display_name: String,
  industry: Option<String>,
  listing_date: Option<String>,
  pe: Option<f64>,
  pb: Option<f64>,
  roe: Option<f64>,
  total_shares: Option<i64>,
  float_shares: Option<i64>,
  market_cap: Option<f64>,
}

impl WireAsset {
  fn into_asset(self, symbol: &str, market: Market) -> Result<Asset, AdapterError> {
    let listing_date = self
      .listing_date
      .map(|raw| {
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
          .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y%m%d"))
          .map_err(|e| AdapterError::Unknown(format!("unparseable listing date {raw:?}: {e}")))
      })
      .transpose()?;

    Ok(Asset {
      symbol: symbol.to_string(),
      display_name: self.display_name,
      market: market.code().to_string(),
      industry: self.industry,
      listing_date,
      pe: self.pe,
      pb: self.pb,
      roe: self.roe,
      total_shares: self.total_shares,
      float_shares: self.float_shares,
      market_cap: self.market_cap,
      metadata_source: "akshare".to_string(),
      last_metadata_refresh: Utc::now().naive_utc(),
    })
  }
}

#[derive(Debug, Deserialize)]
struct WireFinancialSummary {
  period: String,
  metrics: BTreeMap<String, f64>,
}

impl WireFinancialSummary {
  fn into_summary(self, symbol: &str) -> Result<FinancialSummary, AdapterError> {
    Ok(FinancialSummary {
      symbol: symbol.to_string(),
      period: self.period,
      metrics: self.metrics,
      refreshed_at: Utc::now().naive_utc(),
    })
  }
}
