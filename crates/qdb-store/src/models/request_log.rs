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

//! Row model for the append-only `request_log` table. Consumed only by
//! the monitoring sink; never read back by business logic.

use crate::schema::request_log;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use qdb_models::{Outcome, RequestLogEntry};

fn outcome_to_column(outcome: Outcome) -> String {
  outcome.to_string()
}

fn column_to_outcome(value: &str) -> Outcome {
  match value {
    "ok_calendar_flag" => Outcome::OkWithCalendarFlag,
    "partial" => Outcome::Partial,
    "upstream_fail" => Outcome::UpstreamFail,
    "upstream_overloaded" => Outcome::UpstreamOverloaded,
    "invalid_symbol" => Outcome::InvalidSymbol,
    "no_trading_days" => Outcome::NoTradingDays,
    "cancelled" => Outcome::Cancelled,
    "data_unavailable" => Outcome::DataUnavailable,
    _ => Outcome::Ok,
  }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = request_log)]
#[diesel(primary_key(id))]
pub struct RequestLogRow {
  pub id: i64,
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
  pub outcome: String,
  pub error_message: Option<String>,
}

impl From<RequestLogRow> for RequestLogEntry {
  fn from(row: RequestLogRow) -> Self {
    RequestLogEntry {
      ts: row.ts,
      operation: row.operation,
      symbol: row.symbol,
      requested_start: row.requested_start,
      requested_end: row.requested_end,
      resolved_start: row.resolved_start,
      resolved_end: row.resolved_end,
      cache_hit_ratio: row.cache_hit_ratio,
      upstream_calls: row.upstream_calls,
      latency_ms: row.latency_ms,
      outcome: column_to_outcome(&row.outcome),
      error_message: row.error_message,
    }
  }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = request_log)]
pub struct NewRequestLogOwned {
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
  pub outcome: String,
  pub error_message: Option<String>,
}

impl From<&RequestLogEntry> for NewRequestLogOwned {
  fn from(entry: &RequestLogEntry) -> Self {
    NewRequestLogOwned {
      ts: entry.ts,
      operation: entry.operation.clone(),
      symbol: entry.symbol.clone(),
      requested_start: entry.requested_start,
      requested_end: entry.requested_end,
      resolved_start: entry.resolved_start,
      resolved_end: entry.resolved_end,
      cache_hit_ratio: entry.cache_hit_ratio,
      upstream_calls: entry.upstream_calls,
      latency_ms: entry.latency_ms,
      outcome: outcome_to_column(entry.outcome),
      error_message: entry.error_message.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_outcome_column_roundtrip() {
    for outcome in [
      Outcome::Ok,
      Outcome::OkWithCalendarFlag,
      Outcome::Partial,
      Outcome::UpstreamFail,
      Outcome::UpstreamOverloaded,
      Outcome::InvalidSymbol,
      Outcome::NoTradingDays,
      Outcome::Cancelled,
      Outcome::DataUnavailable,
    ] {
      assert_eq!(column_to_outcome(&outcome_to_column(outcome)), outcome);
    }
  }
}
