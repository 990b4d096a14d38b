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

//! Row model for the `financial_summaries` table. `metrics` is stored as
//! `jsonb` rather than a fixed column set, matching the domain type's
//! flat-map shape.

use crate::schema::financial_summaries;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use qdb_models::FinancialSummary;
use std::collections::BTreeMap;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = financial_summaries)]
#[diesel(primary_key(symbol, period))]
pub struct FinancialSummaryRow {
  pub symbol: String,
  pub period: String,
  pub metrics: serde_json::Value,
  pub refreshed_at: NaiveDateTime,
}

impl TryFrom<FinancialSummaryRow> for FinancialSummary {
  type Error = serde_json::Error;

  fn try_from(row: FinancialSummaryRow) -> Result<Self, Self::Error> {
    let metrics: BTreeMap<String, f64> = serde_json::from_value(row.metrics)?;
    Ok(FinancialSummary { symbol: row.symbol, period: row.period, metrics, refreshed_at: row.refreshed_at })
  }
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = financial_summaries)]
pub struct NewFinancialSummaryOwned {
  pub symbol: String,
  pub period: String,
  pub metrics: serde_json::Value,
  pub refreshed_at: NaiveDateTime,
}

impl TryFrom<&FinancialSummary> for NewFinancialSummaryOwned {
  type Error = serde_json::Error;

  fn try_from(summary: &FinancialSummary) -> Result<Self, Self::Error> {
    Ok(NewFinancialSummaryOwned {
      symbol: summary.symbol.clone(),
      period: summary.period.clone(),
      metrics: serde_json::to_value(&summary.metrics)?,
      refreshed_at: summary.refreshed_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn test_metrics_roundtrip_through_row() {
    let mut metrics = BTreeMap::new();
    metrics.insert("revenue".to_string(), 1.0e9);
    let summary = FinancialSummary {
      symbol: "600000".to_string(),
      period: "2023Q4".to_string(),
      metrics,
      refreshed_at: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap(),
    };
    let row = NewFinancialSummaryOwned::try_from(&summary).unwrap();
    assert_eq!(row.metrics["revenue"], 1.0e9);
  }
}
