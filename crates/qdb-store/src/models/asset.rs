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

//! Row models for the `assets` table.

use crate::schema::assets;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use qdb_models::Asset;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = assets)]
#[diesel(primary_key(symbol))]
pub struct AssetRow {
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

impl From<AssetRow> for Asset {
  fn from(row: AssetRow) -> Self {
    Asset {
      symbol: row.symbol,
      display_name: row.display_name,
      market: row.market,
      industry: row.industry,
      listing_date: row.listing_date,
      pe: row.pe,
      pb: row.pb,
      roe: row.roe,
      total_shares: row.total_shares,
      float_shares: row.float_shares,
      market_cap: row.market_cap,
      metadata_source: row.metadata_source,
      last_metadata_refresh: row.last_metadata_refresh,
    }
  }
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = assets)]
pub struct NewAssetOwned {
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

impl From<&Asset> for NewAssetOwned {
  fn from(asset: &Asset) -> Self {
    NewAssetOwned {
      symbol: asset.symbol.clone(),
      display_name: asset.display_name.clone(),
      market: asset.market.clone(),
      industry: asset.industry.clone(),
      listing_date: asset.listing_date,
      pe: asset.pe,
      pb: asset.pb,
      roe: asset.roe,
      total_shares: asset.total_shares,
      float_shares: asset.float_shares,
      market_cap: asset.market_cap,
      metadata_source: asset.metadata_source.clone(),
      last_metadata_refresh: asset.last_metadata_refresh,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_row() -> AssetRow {
    AssetRow {
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
    }
  }

  #[test]
  fn test_row_into_domain_preserves_fields() {
    let row = sample_row();
    let asset: Asset = row.clone().into();
    assert_eq!(asset.symbol, row.symbol);
    assert_eq!(asset.market_cap, row.market_cap);
  }

  #[test]
  fn test_domain_to_new_row_roundtrips() {
    let row = sample_row();
    let asset: Asset = row.clone().into();
    let new_row = NewAssetOwned::from(&asset);
    assert_eq!(new_row.symbol, row.symbol);
    assert_eq!(new_row.listing_date, row.listing_date);
  }
}
