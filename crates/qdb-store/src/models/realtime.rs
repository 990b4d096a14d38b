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

//! Row model for the `realtime_snapshots` table: single row per symbol,
//! overwritten on every refresh.

use crate::schema::realtime_snapshots;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use qdb_models::RealtimeSnapshot;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = realtime_snapshots)]
#[diesel(primary_key(symbol))]
pub struct RealtimeSnapshotRow {
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

impl From<RealtimeSnapshotRow> for RealtimeSnapshot {
  fn from(row: RealtimeSnapshotRow) -> Self {
    RealtimeSnapshot {
      symbol: row.symbol,
      last_price: row.last_price,
      change: row.change,
      pct_change: row.pct_change,
      volume: row.volume,
      turnover: row.turnover,
      pe: row.pe,
      pb: row.pb,
      market_cap: row.market_cap,
      captured_at: row.captured_at,
    }
  }
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = realtime_snapshots)]
pub struct NewRealtimeSnapshotOwned {
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

impl From<&RealtimeSnapshot> for NewRealtimeSnapshotOwned {
  fn from(snapshot: &RealtimeSnapshot) -> Self {
    NewRealtimeSnapshotOwned {
      symbol: snapshot.symbol.clone(),
      last_price: snapshot.last_price,
      change: snapshot.change,
      pct_change: snapshot.pct_change,
      volume: snapshot.volume,
      turnover: snapshot.turnover,
      pe: snapshot.pe,
      pb: snapshot.pb,
      market_cap: snapshot.market_cap,
      captured_at: snapshot.captured_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn test_row_into_snapshot() {
    let row = RealtimeSnapshotRow {
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
    let snapshot: RealtimeSnapshot = row.into();
    assert_eq!(snapshot.last_price, 10.2);
  }
}
