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

//! One OHLCV record for one trading day, for one symbol, at one adjust
//! setting. `DailyBar` and `IndexBar` share this shape but live in
//! separate tables since the index symbol space does not intersect the
//! stock symbol space.

use crate::enums::Adjust;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
  pub symbol: String,
  pub trade_date: NaiveDate,
  pub adjust: Adjust,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  pub volume: i64,
  pub turnover: f64,
  pub amplitude: f64,
  pub pct_change: f64,
  pub change: f64,
  pub turnover_rate: f64,
}

/// A daily bar for a tradable stock.
pub type DailyBar = Bar;

/// A daily (or weekly/monthly, see `IndexPeriod`) bar for a market index.
pub type IndexBar = Bar;

impl Bar {
  /// True if this bar's OHLC relationship is internally consistent.
  /// Used as a sanity check on upstream responses before persisting.
  pub fn is_ohlc_consistent(&self) -> bool {
    self.low <= self.open
      && self.low <= self.close
      && self.low <= self.high
      && self.high >= self.open
      && self.high >= self.close
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_bar() -> Bar {
    Bar {
      symbol: "600000".to_string(),
      trade_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
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

  #[test]
  fn test_ohlc_consistent() {
    assert!(sample_bar().is_ohlc_consistent());
  }

  #[test]
  fn test_ohlc_inconsistent_when_low_above_open() {
    let mut bar = sample_bar();
    bar.low = 11.0;
    assert!(!bar.is_ohlc_consistent());
  }

  #[test]
  fn test_bar_serde_roundtrip() {
    let bar = sample_bar();
    let json = serde_json::to_string(&bar).unwrap();
    let back: Bar = serde_json::from_str(&json).unwrap();
    assert_eq!(bar, back);
  }
}
