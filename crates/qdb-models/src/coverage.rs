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

use crate::enums::{DataKind, Outcome};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The known-cached extent for a `(symbol, kind)` pair. Updated on
/// every successful resolve via `coverage.touch`, which is idempotent
/// and only ever widens the range / bumps counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCoverage {
  pub symbol: String,
  pub kind: DataKind,
  pub earliest_date: NaiveDate,
  pub latest_date: NaiveDate,
  pub row_count: i64,
  pub last_accessed_at: NaiveDateTime,
  pub access_count: i64,
}

/// An append-only record of one cache-service call. Consumed only by
/// the monitoring sink; business logic never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLogEntry {
  pub ts: NaiveDateTime,
  pub operation: String,
  pub symbol: Option<String>,
  pub requested_start: Option<NaiveDate>,
  pub requested_end: Option<NaiveDate>,
  pub resolved_start: Option<NaiveDate>,
  pub resolved_end: Option<NaiveDate>,
  pub cache_hit_ratio: Option<f64>,
  pub upstream_calls: i32,
  pub latency_ms: i32,
  pub outcome: Outcome,
  pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_coverage_serde_roundtrip() {
    let coverage = DataCoverage {
      symbol: "600000".to_string(),
      kind: DataKind::Daily,
      earliest_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
      latest_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
      row_count: 4,
      last_accessed_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 30, 0).unwrap(),
      access_count: 2,
    };
    let json = serde_json::to_string(&coverage).unwrap();
    let back: DataCoverage = serde_json::from_str(&json).unwrap();
    assert_eq!(coverage, back);
  }

  #[test]
  fn test_request_log_entry_serde_roundtrip() {
    let entry = RequestLogEntry {
      ts: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 30, 0).unwrap(),
      operation: "get_daily_bars".to_string(),
      symbol: Some("600000".to_string()),
      requested_start: NaiveDate::from_ymd_opt(2024, 1, 2),
      requested_end: NaiveDate::from_ymd_opt(2024, 1, 5),
      resolved_start: NaiveDate::from_ymd_opt(2024, 1, 2),
      resolved_end: NaiveDate::from_ymd_opt(2024, 1, 5),
      cache_hit_ratio: Some(1.0),
      upstream_calls: 0,
      latency_ms: 5,
      outcome: Outcome::Ok,
      error_message: None,
    };
    let json = serde_json::to_string(&entry).unwrap();
    let back: RequestLogEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(entry, back);
  }
}
