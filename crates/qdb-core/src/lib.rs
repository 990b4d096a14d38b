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

//! # qdb-core
//!
//! Foundational types shared by every crate in the workspace: the market
//! taxonomy, symbol normalizer, trading calendar, environment
//! configuration, and the low-level error type.
//!
//! - [`config::EngineConfig`] — process-wide configuration, loaded once.
//! - [`error::Error`] and [`error::Result`] — this crate's error type.
//! - [`market::Market`] — the closed set of markets QuantDB understands.
//! - [`symbol::normalize`] — raw string → canonical `(market, code)`.
//! - [`calendar::TradingCalendar`] — trading-day lookups per market.

pub mod calendar;
pub mod config;
pub mod error;
pub mod market;
pub mod symbol;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use market::{CalendarRegion, InstrumentKind, Market};
pub use symbol::NormalizedSymbol;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
