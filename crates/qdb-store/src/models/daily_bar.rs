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

//! Row model for the `daily_bars` table (stock daily bars, partitioned by
//! `Adjust`).

use crate::schema::daily_bars;
use chrono::NaiveDate;
use diesel::prelude::*;
use qdb_models::{Adjust, Bar};

fn adjust_to_column(adjust: Adjust) -> String {
  adjust.to_string()
}

fn column_to_adjust(value: &str) -> Adjust {
  match value {
    "forward" => Adjust::Forward,
    "backward" => Adjust::Backward,
    _ => Adjust::Raw,
  }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = daily_bars)]
#[diesel(primary_key(symbol, trade_date, adjust))]
pub struct DailyBarRow {
  pub symbol: String,
  pub trade_date: NaiveDate,
  pub adjust: String,
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

impl From<DailyBarRow> for Bar {
  fn from(row: DailyBarRow) -> Self {
    Bar {
      symbol: row.symbol,
      trade_date: row.trade_date,
      adjust: column_to_adjust(&row.adjust),
      open: row.open,
      high: row.high,
      low: row.low,
      close: row.close,
      volume: row.volume,
      turnover: row.turnover,
      amplitude: row.amplitude,
      pct_change: row.pct_change,
      change: row.change,
      turnover_rate: row.turnover_rate,
    }
  }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = daily_bars)]
pub struct NewDailyBarOwned {
  pub symbol: String,
  pub trade_date: NaiveDate,
  pub adjust: String,
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

impl From<&Bar> for NewDailyBarOwned {
  fn from(bar: &Bar) -> Self {
    NewDailyBarOwned {
      symbol: bar.symbol.clone(),
      trade_date: bar.trade_date,
      adjust: adjust_to_column(bar.adjust),
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
  fn test_adjust_column_roundtrip() {
    for adjust in [Adjust::Raw, Adjust::Forward, Adjust::Backward] {
      let column = adjust_to_column(adjust);
      assert_eq!(column_to_adjust(&column), adjust);
    }
  }

  #[test]
  fn test_row_into_bar_preserves_adjust() {
    let row = DailyBarRow {
      symbol: "600000".to_string(),
      trade_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
      adjust: "forward".to_string(),
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
    };
    let bar: Bar = row.into();
    assert_eq!(bar.adjust, Adjust::Forward);
  }
}
