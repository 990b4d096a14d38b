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

//! Row model for the `index_bars` table (market-index bars, partitioned
//! by `IndexPeriod` rather than by `Adjust`).

use crate::schema::index_bars;
use chrono::NaiveDate;
use diesel::prelude::*;
use qdb_models::{Adjust, Bar, IndexPeriod};

fn period_to_column(period: IndexPeriod) -> String {
  period.to_string()
}

fn column_to_period(value: &str) -> IndexPeriod {
  match value {
    "weekly" => IndexPeriod::Weekly,
    "monthly" => IndexPeriod::Monthly,
    _ => IndexPeriod::Daily,
  }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = index_bars)]
#[diesel(primary_key(symbol, trade_date, period))]
pub struct IndexBarRow {
  pub symbol: String,
  pub trade_date: NaiveDate,
  pub period: String,
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

impl IndexBarRow {
  pub fn into_bar_and_period(self) -> (Bar, IndexPeriod) {
    let period = column_to_period(&self.period);
    let bar = Bar {
      symbol: self.symbol,
      trade_date: self.trade_date,
      // Index bars are never adjust-partitioned upstream; `Raw` is the
      // only value index rows are ever written with.
      adjust: Adjust::Raw,
      open: self.open,
      high: self.high,
      low: self.low,
      close: self.close,
      volume: self.volume,
      turnover: self.turnover,
      amplitude: self.amplitude,
      pct_change: self.pct_change,
      change: self.change,
      turnover_rate: self.turnover_rate,
    };
    (bar, period)
  }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = index_bars)]
pub struct NewIndexBarOwned {
  pub symbol: String,
  pub trade_date: NaiveDate,
  pub period: String,
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

impl NewIndexBarOwned {
  pub fn from_bar(bar: &Bar, period: IndexPeriod) -> Self {
    NewIndexBarOwned {
      symbol: bar.symbol.clone(),
      trade_date: bar.trade_date,
      period: period_to_column(period),
      open: bar.open,
      high: bar.high,
      low: bar.low,
      close: bar.close,
      volume: bar.volume,
      turnover: bar.turnover,
      amplitude: bar.amplitude,
      pct_change: bar.pct_change,
      change: bar.change,
      turnover_rate: bar.turnover_rate,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_period_column_roundtrip() {
    for period in [IndexPeriod::Daily, IndexPeriod::Weekly, IndexPeriod::Monthly] {
      let column = period_to_column(period);
      assert_eq!(column_to_period(&column), period);
    }
  }

  #[test]
  fn test_row_into_bar_and_period() {
    let row = IndexBarRow {
      symbol: "000300".to_string(),
      trade_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
      period: "weekly".to_string(),
      open: 3500.0,
      high: 3520.0,
      low: 3490.0,
      close: 3510.0,
      volume: 500_000_000,
      turnover: 7.0e11,
      amplitude: 0.9,
      pct_change: 0.3,
      change: 10.5,
      turnover_rate: 0.0,
    };
    let (bar, period) = row.into_bar_and_period();
    assert_eq!(period, IndexPeriod::Weekly);
    assert_eq!(bar.symbol, "000300");
  }
}
