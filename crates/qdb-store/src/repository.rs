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

//! Connection pooling, transaction plumbing, and one repository trait per
//! table, following the composition-root/`DatabaseContext` pattern: a
//! fail-fast pool constructor, a `run()` helper that drives blocking
//! Diesel work off the async runtime, and a `transaction()` helper for
//! call sites that need several writes to commit atomically.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use qdb_models::{Adjust, Asset, Bar, DataCoverage, DataKind, FinancialSummary, IndexPeriod, RealtimeSnapshot, RequestLogEntry};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
  AssetRow, DailyBarRow, DataCoverageRow, FinancialSummaryRow, IndexBarRow, NewAssetOwned,
  NewDailyBarOwned, NewDataCoverageOwned, NewFinancialSummaryOwned, NewIndexBarOwned,
  NewRealtimeSnapshotOwned, NewRequestLogOwned, RealtimeSnapshotRow,
};
use crate::schema::{assets, daily_bars, data_coverage, financial_summaries, index_bars, realtime_snapshots, request_log};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

const MAX_POOL_SIZE: u32 = 20;
const MIN_POOL_IDLE: u32 = 4;
/// Connection timeout in seconds - pool will fail instead of retrying forever
const CONNECTION_TIMEOUT_SECS: u64 = 30;
/// PostgreSQL has a limit of 65535 bind parameters per query; a bar row
/// has 13 columns, so 2000 rows per chunk stays well under the limit.
const BAR_BATCH_SIZE: usize = 2000;

#[derive(Error, Debug)]
pub enum RepositoryError {
  #[error("connection pool error: {0}")]
  PoolError(String),

  #[error("database query error: {0}")]
  QueryError(String),

  #[error("serialization error: {0}")]
  SerializationError(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("transaction error: {0}")]
  TransactionError(String),
}

impl From<DieselError> for RepositoryError {
  fn from(err: DieselError) -> Self {
    match err {
      DieselError::NotFound => RepositoryError::NotFound("record not found".to_string()),
      DieselError::DatabaseError(kind, info) => match kind {
        diesel::result::DatabaseErrorKind::UniqueViolation
        | diesel::result::DatabaseErrorKind::ForeignKeyViolation => {
          RepositoryError::ConstraintViolation(info.message().to_string())
        }
        _ => RepositoryError::QueryError(info.message().to_string()),
      },
      _ => RepositoryError::QueryError(err.to_string()),
    }
  }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
  fn from(err: diesel::r2d2::PoolError) -> Self {
    RepositoryError::PoolError(err.to_string())
  }
}

impl From<serde_json::Error> for RepositoryError {
  fn from(err: serde_json::Error) -> Self {
    RepositoryError::SerializationError(err.to_string())
  }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Database context that provides access to repositories and the
/// connection pool. Cheap to clone: the pool is an `Arc` internally.
#[derive(Clone)]
pub struct DatabaseContext {
  pool: Arc<DbPool>,
}

impl DatabaseContext {
  /// Create a new database context with connection pooling.
  ///
  /// Fails fast if the database is unavailable by testing the connection
  /// at startup, before the pool spawns any background retry threads.
  pub fn new(database_url: &str) -> RepositoryResult<Self> {
    PgConnection::establish(database_url)
      .map_err(|e| RepositoryError::PoolError(format!("failed to connect to database: {}", e)))?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
      .max_size(MAX_POOL_SIZE)
      .min_idle(Some(MIN_POOL_IDLE))
      .connection_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
      .build(manager)
      .map_err(|e| RepositoryError::PoolError(e.to_string()))?;

    Ok(Self { pool: Arc::new(pool) })
  }

  /// Create with custom pool sizing and connection timeout.
  pub fn with_pool_config_and_timeout(
    database_url: &str,
    max_size: u32,
    min_idle: u32,
    timeout_secs: u64,
  ) -> RepositoryResult<Self> {
    PgConnection::establish(database_url)
      .map_err(|e| RepositoryError::PoolError(format!("failed to connect to database: {}", e)))?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
      .max_size(max_size)
      .min_idle(Some(min_idle))
      .connection_timeout(Duration::from_secs(timeout_secs))
      .build(manager)
      .map_err(|e| RepositoryError::PoolError(e.to_string()))?;

    Ok(Self { pool: Arc::new(pool) })
  }

  pub fn get_connection(&self) -> RepositoryResult<DbConnection> {
    self.pool.get().map_err(|e| RepositoryError::PoolError(e.to_string()))
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  /// Execute a blocking database operation asynchronously.
  pub async fn run<F, R>(&self, f: F) -> RepositoryResult<R>
  where
    F: FnOnce(&mut DbConnection) -> RepositoryResult<R> + Send + 'static,
    R: Send + 'static,
  {
    let pool = Arc::clone(&self.pool);
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get().map_err(|e| RepositoryError::PoolError(e.to_string()))?;
      f(&mut conn)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  pub fn asset_repository(&self) -> impl AssetRepository {
    AssetRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn daily_bar_repository(&self) -> impl DailyBarRepository {
    DailyBarRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn index_bar_repository(&self) -> impl IndexBarRepository {
    IndexBarRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn realtime_repository(&self) -> impl RealtimeRepository {
    RealtimeRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn coverage_repository(&self) -> impl CoverageRepository {
    CoverageRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn request_log_repository(&self) -> impl RequestLogRepository {
    RequestLogRepositoryImpl { pool: Arc::clone(&self.pool) }
  }

  pub fn financial_summary_repository(&self) -> impl FinancialSummaryRepository {
    FinancialSummaryRepositoryImpl { pool: Arc::clone(&self.pool) }
  }
}

/// `(symbol, kind)` coverage row touched alongside a batch upsert, kept
/// in the same transaction per `spec.md` §4.3.
#[derive(Debug, Clone)]
pub struct CoverageTouch {
  pub symbol: String,
  pub kind: DataKind,
  pub earliest_date: NaiveDate,
  pub latest_date: NaiveDate,
  pub row_count_delta: i64,
  pub now: NaiveDateTime,
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
  async fn get(&self, symbol: &str) -> RepositoryResult<Option<Asset>>;
  async fn upsert(&self, asset: &Asset) -> RepositoryResult<()>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct AssetRepositoryImpl {
  pool: Arc<DbPool>,
}

#[async_trait]
impl AssetRepository for AssetRepositoryImpl {
  async fn get(&self, symbol: &str) -> RepositoryResult<Option<Asset>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let row: Option<AssetRow> =
        assets::table.filter(assets::symbol.eq(&symbol)).first(&mut conn).optional()?;
      Ok(row.map(Asset::from))
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert(&self, asset: &Asset) -> RepositoryResult<()> {
    let pool = Arc::clone(&self.pool);
    let new_row = NewAssetOwned::from(asset);
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      diesel::insert_into(assets::table)
        .values(&new_row)
        .on_conflict(assets::symbol)
        .do_update()
        .set(&new_row)
        .execute(&mut conn)?;
      Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(assets::table.filter(assets::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait DailyBarRepository: Send + Sync {
  async fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate, adjust: Adjust) -> RepositoryResult<Vec<Bar>>;
  async fn upsert_batch(&self, bars: &[Bar]) -> RepositoryResult<usize>;
  /// Upserts `bars` and touches the matching coverage row in one
  /// transaction, satisfying "all writes executed by a single resolve
  /// call occur in one transaction."
  async fn upsert_batch_and_touch_coverage(&self, bars: &[Bar], touch: &CoverageTouch) -> RepositoryResult<usize>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct DailyBarRepositoryImpl {
  pool: Arc<DbPool>,
}

fn upsert_daily_bars_sync(conn: &mut PgConnection, bars: &[Bar]) -> Result<usize, DieselError> {
  use diesel::upsert::excluded;

  let mut total = 0usize;
  for chunk in bars.chunks(BAR_BATCH_SIZE) {
    let rows: Vec<NewDailyBarOwned> = chunk.iter().map(NewDailyBarOwned::from).collect();
    total += diesel::insert_into(daily_bars::table)
      .values(&rows)
      .on_conflict((daily_bars::symbol, daily_bars::trade_date, daily_bars::adjust))
      .do_update()
      .set((
        daily_bars::open.eq(excluded(daily_bars::open)),
        daily_bars::high.eq(excluded(daily_bars::high)),
        daily_bars::low.eq(excluded(daily_bars::low)),
        daily_bars::close.eq(excluded(daily_bars::close)),
        daily_bars::volume.eq(excluded(daily_bars::volume)),
        daily_bars::turnover.eq(excluded(daily_bars::turnover)),
        daily_bars::amplitude.eq(excluded(daily_bars::amplitude)),
        daily_bars::pct_change.eq(excluded(daily_bars::pct_change)),
        daily_bars::change.eq(excluded(daily_bars::change)),
        daily_bars::turnover_rate.eq(excluded(daily_bars::turnover_rate)),
      ))
      .execute(conn)?;
  }
  Ok(total)
}

fn touch_coverage_sync(conn: &mut PgConnection, touch: &CoverageTouch) -> Result<(), DieselError> {
  use diesel::upsert::excluded;

  let row = NewDataCoverageOwned {
    symbol: touch.symbol.clone(),
    kind: touch.kind.to_string(),
    earliest_date: touch.earliest_date,
    latest_date: touch.latest_date,
    row_count: touch.row_count_delta,
    last_accessed_at: touch.now,
    access_count: 1,
  };
  diesel::insert_into(data_coverage::table)
    .values(&row)
    .on_conflict((data_coverage::symbol, data_coverage::kind))
    .do_update()
    .set((
      data_coverage::earliest_date.eq(diesel::dsl::sql::<diesel::sql_types::Date>(
        "LEAST(data_coverage.earliest_date, excluded.earliest_date)",
      )),
      data_coverage::latest_date.eq(diesel::dsl::sql::<diesel::sql_types::Date>(
        "GREATEST(data_coverage.latest_date, excluded.latest_date)",
      )),
      data_coverage::row_count.eq(data_coverage::row_count + excluded(data_coverage::row_count)),
      data_coverage::last_accessed_at.eq(excluded(data_coverage::last_accessed_at)),
      data_coverage::access_count.eq(data_coverage::access_count + 1),
    ))
    .execute(conn)?;
  Ok(())
}

#[async_trait]
impl DailyBarRepository for DailyBarRepositoryImpl {
  async fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate, adjust: Adjust) -> RepositoryResult<Vec<Bar>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    let adjust_column = adjust.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let rows: Vec<DailyBarRow> = daily_bars::table
        .filter(daily_bars::symbol.eq(&symbol))
        .filter(daily_bars::adjust.eq(&adjust_column))
        .filter(daily_bars::trade_date.ge(start))
        .filter(daily_bars::trade_date.le(end))
        .order(daily_bars::trade_date.asc())
        .load(&mut conn)?;
      Ok(rows.into_iter().map(Bar::from).collect())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert_batch(&self, bars: &[Bar]) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let bars = bars.to_vec();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(conn.transaction(|conn| upsert_daily_bars_sync(conn, &bars))?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert_batch_and_touch_coverage(&self, bars: &[Bar], touch: &CoverageTouch) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let bars = bars.to_vec();
    let touch = touch.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      conn.transaction(|conn| {
        let count = upsert_daily_bars_sync(conn, &bars)?;
        touch_coverage_sync(conn, &touch)?;
        Ok::<_, DieselError>(count)
      })
      .map_err(RepositoryError::from)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(daily_bars::table.filter(daily_bars::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait IndexBarRepository: Send + Sync {
  async fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate, period: IndexPeriod) -> RepositoryResult<Vec<Bar>>;
  async fn upsert_batch(&self, bars: &[Bar], period: IndexPeriod) -> RepositoryResult<usize>;
  async fn upsert_batch_and_touch_coverage(
    &self,
    bars: &[Bar],
    period: IndexPeriod,
    touch: &CoverageTouch,
  ) -> RepositoryResult<usize>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct IndexBarRepositoryImpl {
  pool: Arc<DbPool>,
}

fn upsert_index_bars_sync(conn: &mut PgConnection, bars: &[Bar], period: IndexPeriod) -> Result<usize, DieselError> {
  use diesel::upsert::excluded;

  let mut total = 0usize;
  for chunk in bars.chunks(BAR_BATCH_SIZE) {
    let rows: Vec<NewIndexBarOwned> =
      chunk.iter().map(|bar| NewIndexBarOwned::from_bar(bar, period)).collect();
    total += diesel::insert_into(index_bars::table)
      .values(&rows)
      .on_conflict((index_bars::symbol, index_bars::trade_date, index_bars::period))
      .do_update()
      .set((
        index_bars::open.eq(excluded(index_bars::open)),
        index_bars::high.eq(excluded(index_bars::high)),
        index_bars::low.eq(excluded(index_bars::low)),
        index_bars::close.eq(excluded(index_bars::close)),
        index_bars::volume.eq(excluded(index_bars::volume)),
        index_bars::turnover.eq(excluded(index_bars::turnover)),
        index_bars::amplitude.eq(excluded(index_bars::amplitude)),
        index_bars::pct_change.eq(excluded(index_bars::pct_change)),
        index_bars::change.eq(excluded(index_bars::change)),
        index_bars::turnover_rate.eq(excluded(index_bars::turnover_rate)),
      ))
      .execute(conn)?;
  }
  Ok(total)
}

#[async_trait]
impl IndexBarRepository for IndexBarRepositoryImpl {
  async fn range(&self, symbol: &str, start: NaiveDate, end: NaiveDate, period: IndexPeriod) -> RepositoryResult<Vec<Bar>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    let period_column = period.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let rows: Vec<IndexBarRow> = index_bars::table
        .filter(index_bars::symbol.eq(&symbol))
        .filter(index_bars::period.eq(&period_column))
        .filter(index_bars::trade_date.ge(start))
        .filter(index_bars::trade_date.le(end))
        .order(index_bars::trade_date.asc())
        .load(&mut conn)?;
      Ok(rows.into_iter().map(|row| row.into_bar_and_period().0).collect())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert_batch(&self, bars: &[Bar], period: IndexPeriod) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let bars = bars.to_vec();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(conn.transaction(|conn| upsert_index_bars_sync(conn, &bars, period))?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert_batch_and_touch_coverage(
    &self,
    bars: &[Bar],
    period: IndexPeriod,
    touch: &CoverageTouch,
  ) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let bars = bars.to_vec();
    let touch = touch.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      conn.transaction(|conn| {
        let count = upsert_index_bars_sync(conn, &bars, period)?;
        touch_coverage_sync(conn, &touch)?;
        Ok::<_, DieselError>(count)
      })
      .map_err(RepositoryError::from)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(index_bars::table.filter(index_bars::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait RealtimeRepository: Send + Sync {
  async fn get(&self, symbol: &str) -> RepositoryResult<Option<RealtimeSnapshot>>;
  async fn upsert(&self, snapshot: &RealtimeSnapshot) -> RepositoryResult<()>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct RealtimeRepositoryImpl {
  pool: Arc<DbPool>,
}

#[async_trait]
impl RealtimeRepository for RealtimeRepositoryImpl {
  async fn get(&self, symbol: &str) -> RepositoryResult<Option<RealtimeSnapshot>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let row: Option<RealtimeSnapshotRow> = realtime_snapshots::table
        .filter(realtime_snapshots::symbol.eq(&symbol))
        .first(&mut conn)
        .optional()?;
      Ok(row.map(RealtimeSnapshot::from))
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert(&self, snapshot: &RealtimeSnapshot) -> RepositoryResult<()> {
    let pool = Arc::clone(&self.pool);
    let new_row = NewRealtimeSnapshotOwned::from(snapshot);
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      diesel::insert_into(realtime_snapshots::table)
        .values(&new_row)
        .on_conflict(realtime_snapshots::symbol)
        .do_update()
        .set(&new_row)
        .execute(&mut conn)?;
      Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(realtime_snapshots::table.filter(realtime_snapshots::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait CoverageRepository: Send + Sync {
  async fn get(&self, symbol: &str, kind: DataKind) -> RepositoryResult<Option<DataCoverage>>;
  async fn touch(&self, touch: &CoverageTouch) -> RepositoryResult<()>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct CoverageRepositoryImpl {
  pool: Arc<DbPool>,
}

#[async_trait]
impl CoverageRepository for CoverageRepositoryImpl {
  async fn get(&self, symbol: &str, kind: DataKind) -> RepositoryResult<Option<DataCoverage>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    let kind_column = kind.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let row: Option<DataCoverageRow> = data_coverage::table
        .filter(data_coverage::symbol.eq(&symbol))
        .filter(data_coverage::kind.eq(&kind_column))
        .first(&mut conn)
        .optional()?;
      Ok(row.map(DataCoverage::from))
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn touch(&self, touch: &CoverageTouch) -> RepositoryResult<()> {
    let pool = Arc::clone(&self.pool);
    let touch = touch.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(touch_coverage_sync(&mut conn, &touch)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(data_coverage::table.filter(data_coverage::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait RequestLogRepository: Send + Sync {
  async fn append(&self, entry: &RequestLogEntry) -> RepositoryResult<()>;
}

struct RequestLogRepositoryImpl {
  pool: Arc<DbPool>,
}

#[async_trait]
impl RequestLogRepository for RequestLogRepositoryImpl {
  async fn append(&self, entry: &RequestLogEntry) -> RepositoryResult<()> {
    let pool = Arc::clone(&self.pool);
    let new_row = NewRequestLogOwned::from(entry);
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      diesel::insert_into(request_log::table).values(&new_row).execute(&mut conn)?;
      Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

#[async_trait]
pub trait FinancialSummaryRepository: Send + Sync {
  async fn get(&self, symbol: &str, period: &str) -> RepositoryResult<Option<FinancialSummary>>;
  async fn upsert(&self, summary: &FinancialSummary) -> RepositoryResult<()>;
  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize>;
}

struct FinancialSummaryRepositoryImpl {
  pool: Arc<DbPool>,
}

#[async_trait]
impl FinancialSummaryRepository for FinancialSummaryRepositoryImpl {
  async fn get(&self, symbol: &str, period: &str) -> RepositoryResult<Option<FinancialSummary>> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    let period = period.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      let row: Option<FinancialSummaryRow> = financial_summaries::table
        .filter(financial_summaries::symbol.eq(&symbol))
        .filter(financial_summaries::period.eq(&period))
        .first(&mut conn)
        .optional()?;
      match row {
        Some(row) => Ok(Some(FinancialSummary::try_from(row)?)),
        None => Ok(None),
      }
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn upsert(&self, summary: &FinancialSummary) -> RepositoryResult<()> {
    let pool = Arc::clone(&self.pool);
    let new_row = NewFinancialSummaryOwned::try_from(summary)?;
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      diesel::insert_into(financial_summaries::table)
        .values(&new_row)
        .on_conflict((financial_summaries::symbol, financial_summaries::period))
        .do_update()
        .set(&new_row)
        .execute(&mut conn)?;
      Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }

  async fn delete_by_symbol(&self, symbol: &str) -> RepositoryResult<usize> {
    let pool = Arc::clone(&self.pool);
    let symbol = symbol.to_string();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      Ok(diesel::delete(financial_summaries::table.filter(financial_summaries::symbol.eq(&symbol))).execute(&mut conn)?)
    })
    .await
    .map_err(|e| RepositoryError::QueryError(format!("task join error: {}", e)))?
  }
}

/// Unused by production code paths today, kept for call sites (tests,
/// future migration scripts) that need a raw synchronous transaction
/// without going through `run()`.
pub fn with_transaction<F, R>(context: &DatabaseContext, f: F) -> RepositoryResult<R>
where
  F: FnOnce(&mut DbConnection) -> Result<R, DieselError>,
{
  let mut conn = context.get_connection()?;
  conn.transaction(f).map_err(RepositoryError::from)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  #[test]
  fn test_coverage_touch_is_clonable_and_carries_fields() {
    let touch = CoverageTouch {
      symbol: "600000".to_string(),
      kind: DataKind::Daily,
      earliest_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
      latest_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
      row_count_delta: 4,
      now: Utc::now().naive_utc(),
    };
    let cloned = touch.clone();
    assert_eq!(cloned.symbol, "600000");
    assert_eq!(cloned.row_count_delta, 4);
  }

  #[test]
  fn test_repository_error_from_diesel_not_found() {
    let err: RepositoryError = DieselError::NotFound.into();
    assert!(matches!(err, RepositoryError::NotFound(_)));
  }
}
