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

//! # qdb-engine
//!
//! Gap resolution, fetch coordination, and the cache-service facade for
//! QuantDB: the layer that decides what a request for market data
//! actually needs from the store versus upstream, serializes and
//! retries the upstream side, and logs every resolve call.
//!
//! - [`gap`] decides which calendar-contiguous date ranges are missing
//!   from the store for a requested range.
//! - [`fetch`] coalesces concurrent upstream requests for the same
//!   signature, bounds concurrency, and retries transient failures.
//! - [`monitoring`] records one request-log entry per resolve call
//!   without ever failing the caller's own request.
//! - [`cache`] is the composition root tying the above together behind
//!   one facade, [`cache::CacheService`].

pub mod cache;
pub mod error;
pub mod fetch;
pub mod gap;
pub mod monitoring;

pub use cache::CacheService;
pub use error::{EngineError, EngineResult};
pub use fetch::FetchCoordinator;
pub use gap::{GapResolution, Segment, resolve_gap};
pub use monitoring::MonitoringEmitter;
