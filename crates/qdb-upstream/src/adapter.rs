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

use crate::error::AdapterError;
use async_trait::async_trait;
use chrono::NaiveDate;
use qdb_core::market::Market;
use qdb_models::{Adjust, Asset, Bar, FinancialSummary, IndexPeriod, RealtimeSnapshot};

/// The upstream contract every concrete provider adapter implements.
/// The fetch coordinator depends on this trait, never on a concrete
/// adapter, so tests substitute a fake without touching the network.
#[async_trait]
pub trait UpstreamAdapter: Send + Sync {
  async fn fetch_daily(
    &self,
    canonical_symbol: &str,
    market: Market,
    start: NaiveDate,
    end: NaiveDate,
    adjust: Adjust,
  ) -> Result<Vec<Bar>, AdapterError>;

  async fn fetch_realtime(
    &self,
    canonical_symbol: &str,
    market: Market,
  ) -> Result<RealtimeSnapshot, AdapterError>;

  async fn fetch_asset(&self, canonical_symbol: &str, market: Market) -> Result<Asset, AdapterError>;

  async fn fetch_index_daily(
    &self,
    canonical_symbol: &str,
    market: Market,
    start: NaiveDate,
    end: NaiveDate,
    period: IndexPeriod,
  ) -> Result<Vec<Bar>, AdapterError>;

  async fn fetch_financial_summary(&self, canonical_symbol: &str) -> Result<FinancialSummary, AdapterError>;
}
