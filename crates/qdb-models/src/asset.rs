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

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Metadata record for a symbol. Created on first reference, mutated by
/// the metadata-refresh TTL policy, never deleted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  pub symbol: String,
  pub display_name: String,
  pub market: String,
  pub industry: Option<String>,
  pub listing_date: Option<NaiveDate>,
  pub pe: Option<f64>,
  pub pb: Option<f64>,
  pub roe: Option<f64>,
  pub total_shares: Option<i64>,
  pub float_shares: Option<i64>,
  pub market_cap: Option<f64>,
  pub metadata_source: String,
  pub last_metadata_refresh: NaiveDateTime,
}

/// A single-row snapshot keyed by symbol; stale snapshots are
/// overwritten, never versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
  pub symbol: String,
  pub last_price: f64,
  pub change: f64,
  pub pct_change: f64,
  pub volume: i64,
  pub turnover: f64,
  pub pe: Option<f64>,
  pub pb: Option<f64>,
  pub market_cap: Option<f64>,
  pub captured_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_asset_serde_roundtrip() {
    let asset = Asset {
      symbol: "600000".to_string(),
      display_name: "Shanghai Pudong Development Bank".to_string(),
      market: "A_SH".to_string(),
      industry: Some("Banking".to_string()),
      listing_date: NaiveDate::from_ymd_opt(1999, 11, 10),
      pe: Some(5.2),
      pb: Some(0.6),
      roe: Some(11.3),
      total_shares: Some(29_352_000_000),
      float_shares: Some(29_352_000_000),
      market_cap: Some(200_000_000_000.0),
      metadata_source: "akshare".to_string(),
      last_metadata_refresh: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap(),
    };
    let json = serde_json::to_string(&asset).unwrap();
    let back: Asset = serde_json::from_str(&json).unwrap();
    assert_eq!(asset, back);
  }

  #[test]
  fn test_realtime_snapshot_serde_roundtrip() {
    let snapshot = RealtimeSnapshot {
      symbol: "600000".to_string(),
      last_price: 10.2,
      change: 0.2,
      pct_change: 2.0,
      volume: 1_000_000,
      turnover: 10_200_000.0,
      pe: Some(5.2),
      pb: Some(0.6),
      market_cap: Some(200_000_000_000.0),
      captured_at: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(14, 0, 0).unwrap(),
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: RealtimeSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
  }
}
