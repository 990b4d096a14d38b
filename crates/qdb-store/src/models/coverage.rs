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

//! Row model for the `data_coverage` table: the known-cached extent per
//! `(symbol, kind)`, widened and bumped by `coverage.touch`.

use crate::schema::data_coverage;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use qdb_models::{DataCoverage, DataKind};

fn kind_to_column(kind: DataKind) -> String {
  kind.to_string()
}

fn column_to_kind(value: &str) -> DataKind {
  match value {
    "index" => DataKind::Index,
    "realtime" => DataKind::Realtime,
    "asset" => DataKind::Asset,
    "financial" => DataKind::Financial,
    _ => DataKind::Daily,
  }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = data_coverage)]
#[diesel(primary_key(symbol, kind))]
pub struct DataCoverageRow {
  pub symbol: String,
  pub kind: String,
  pub earliest_date: NaiveDate,
  pub latest_date: NaiveDate,
  pub row_count: i64,
  pub last_accessed_at: NaiveDateTime,
  pub access_count: i64,
}

impl From<DataCoverageRow> for DataCoverage {
  fn from(row: DataCoverageRow) -> Self {
    DataCoverage {
      symbol: row.symbol,
      kind: column_to_kind(&row.kind),
      earliest_date: row.earliest_date,
      latest_date: row.latest_date,
      row_count: row.row_count,
      last_accessed_at: row.last_accessed_at,
      access_count: row.access_count,
    }
  }
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = data_coverage)]
pub struct NewDataCoverageOwned {
  pub symbol: String,
  pub kind: String,
  pub earliest_date: NaiveDate,
  pub latest_date: NaiveDate,
  pub row_count: i64,
  pub last_accessed_at: NaiveDateTime,
  pub access_count: i64,
}

impl From<&DataCoverage> for NewDataCoverageOwned {
  fn from(coverage: &DataCoverage) -> Self {
    NewDataCoverageOwned {
      symbol: coverage.symbol.clone(),
      kind: kind_to_column(coverage.kind),
      earliest_date: coverage.earliest_date,
      latest_date: coverage.latest_date,
      row_count: coverage.row_count,
      last_accessed_at: coverage.last_accessed_at,
      access_count: coverage.access_count,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_column_roundtrip() {
    for kind in [
      DataKind::Daily,
      DataKind::Index,
      DataKind::Realtime,
      DataKind::Asset,
      DataKind::Financial,
    ] {
      assert_eq!(column_to_kind(&kind_to_column(kind)), kind);
    }
  }
}
