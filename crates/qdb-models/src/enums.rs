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

//! Small enums that parameterize the domain records: price-adjustment
//! mode, bar kind, index aggregation period, and call outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price-adjustment mode. An independent cache partition: a
/// `Forward`-adjusted read never satisfies a `Raw` read and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjust {
  Raw,
  Forward,
  Backward,
}

impl fmt::Display for Adjust {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Adjust::Raw => "raw",
      Adjust::Forward => "forward",
      Adjust::Backward => "backward",
    };
    write!(f, "{}", s)
  }
}

/// Which table a coverage row or gap-resolution call concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
  Daily,
  Index,
  Realtime,
  Asset,
  Financial,
}

impl fmt::Display for DataKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      DataKind::Daily => "daily",
      DataKind::Index => "index",
      DataKind::Realtime => "realtime",
      DataKind::Asset => "asset",
      DataKind::Financial => "financial",
    };
    write!(f, "{}", s)
  }
}

/// Aggregation period for index bars; the cache is partitioned by
/// period the same way it is partitioned by `Adjust` for stock bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPeriod {
  Daily,
  Weekly,
  Monthly,
}

impl fmt::Display for IndexPeriod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      IndexPeriod::Daily => "daily",
      IndexPeriod::Weekly => "weekly",
      IndexPeriod::Monthly => "monthly",
    };
    write!(f, "{}", s)
  }
}

/// Outcome recorded on every `request_log` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Ok,
  /// Accepted, but contains upstream-returned rows landing outside the
  /// calendar's known trading-day set (open question #2, see DESIGN.md).
  OkWithCalendarFlag,
  Partial,
  UpstreamFail,
  UpstreamOverloaded,
  InvalidSymbol,
  NoTradingDays,
  Cancelled,
  DataUnavailable,
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Outcome::Ok => "ok",
      Outcome::OkWithCalendarFlag => "ok_calendar_flag",
      Outcome::Partial => "partial",
      Outcome::UpstreamFail => "upstream_fail",
      Outcome::UpstreamOverloaded => "upstream_overloaded",
      Outcome::InvalidSymbol => "invalid_symbol",
      Outcome::NoTradingDays => "no_trading_days",
      Outcome::Cancelled => "cancelled",
      Outcome::DataUnavailable => "data_unavailable",
    };
    write!(f, "{}", s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_adjust_display() {
    assert_eq!(Adjust::Raw.to_string(), "raw");
    assert_eq!(Adjust::Forward.to_string(), "forward");
    assert_eq!(Adjust::Backward.to_string(), "backward");
  }

  #[test]
  fn test_data_kind_display() {
    assert_eq!(DataKind::Daily.to_string(), "daily");
    assert_eq!(DataKind::Financial.to_string(), "financial");
  }

  #[test]
  fn test_index_period_display() {
    assert_eq!(IndexPeriod::Weekly.to_string(), "weekly");
  }

  #[test]
  fn test_outcome_display() {
    assert_eq!(Outcome::Ok.to_string(), "ok");
    assert_eq!(Outcome::UpstreamFail.to_string(), "upstream_fail");
  }

  #[test]
  fn test_adjust_serde_roundtrip() {
    let json = serde_json::to_string(&Adjust::Forward).unwrap();
    assert_eq!(json, "\"forward\"");
    let back: Adjust = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Adjust::Forward);
  }
}
