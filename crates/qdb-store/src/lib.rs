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

//! # qdb-store
//!
//! The persistent store: Diesel schema, row models, and one repository
//! trait per table, built around a pooled [`DatabaseContext`]
//! composition root. `qdb-engine` is the only consumer; repositories
//! are the sole reader path and the Cache Service (via the Fetch
//! Coordinator) is the sole writer.

#![warn(clippy::all)]

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{
  AssetRepository, CoverageRepository, CoverageTouch, DailyBarRepository, DatabaseContext,
  FinancialSummaryRepository, IndexBarRepository, RealtimeRepository, RepositoryError,
  RepositoryResult, RequestLogRepository,
};

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

/// Embedded at compile time so the process that owns the
/// `DatabaseContext` can self-migrate on startup without a separate
/// deploy step.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
