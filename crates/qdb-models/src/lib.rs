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

//! # qdb-models
//!
//! Plain, serde-friendly domain records shared between the upstream
//! adapter (`qdb-upstream`) and the persistent store (`qdb-store`).
//! These are transport/domain-level types, independent of any storage
//! representation — `qdb-store` maps them to and from its own
//! Diesel-specific row types at the repository boundary.

#![warn(clippy::all)]

pub mod asset;
pub mod bar;
pub mod coverage;
pub mod enums;
pub mod financial;

pub use asset::{Asset, RealtimeSnapshot};
pub use bar::{Bar, DailyBar, IndexBar};
pub use coverage::{DataCoverage, RequestLogEntry};
pub use enums::{Adjust, DataKind, IndexPeriod, Outcome};
pub use financial::FinancialSummary;
