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

//! The error taxonomy every cache-service facade call returns. Lower
//! layers (`qdb_core::Error`, `qdb_store::RepositoryError`,
//! `qdb_upstream::AdapterError`) convert into one of these variants at
//! the boundary; callers never see the lower-layer enums.

use qdb_store::RepositoryError;
use qdb_upstream::AdapterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
  #[error("invalid symbol: {0}")]
  InvalidSymbol(String),

  #[error("no trading days in the requested range")]
  NoTradingDays,

  #[error("upstream fetch failed: {0}")]
  UpstreamFail(String),

  #[error("upstream fetch queue is full")]
  UpstreamOverloaded,

  #[error("request cancelled before completion")]
  Cancelled,

  #[error("no data available for {0}")]
  DataUnavailable(String),

  /// A post-commit verifying re-read found fewer rows than were just
  /// written. Logged at `tracing::error!` by the fetch coordinator and
  /// surfaced to the caller as `UpstreamFail`; this variant only exists
  /// to give that log line a typed, matchable shape.
  #[error("internal inconsistency: {0}")]
  InternalInconsistency(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<qdb_core::Error> for EngineError {
  fn from(err: qdb_core::Error) -> Self {
    match err {
      qdb_core::Error::InvalidSymbol(symbol) => EngineError::InvalidSymbol(symbol),
      qdb_core::Error::CalendarRangeUnsupported(detail) => EngineError::UpstreamFail(detail),
      other => EngineError::UpstreamFail(other.to_string()),
    }
  }
}

impl From<RepositoryError> for EngineError {
  fn from(err: RepositoryError) -> Self {
    EngineError::UpstreamFail(err.to_string())
  }
}

impl From<AdapterError> for EngineError {
  fn from(err: AdapterError) -> Self {
    match err {
      AdapterError::InvalidSymbol(symbol) => EngineError::InvalidSymbol(symbol),
      AdapterError::NotFound => EngineError::DataUnavailable("not found upstream".to_string()),
      other => EngineError::UpstreamFail(other.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_invalid_symbol() {
    let err = EngineError::InvalidSymbol("XYZ".to_string());
    assert_eq!(err.to_string(), "invalid symbol: XYZ");
  }

  #[test]
  fn test_display_no_trading_days() {
    assert_eq!(EngineError::NoTradingDays.to_string(), "no trading days in the requested range");
  }

  #[test]
  fn test_display_upstream_fail() {
    let err = EngineError::UpstreamFail("timeout".to_string());
    assert_eq!(err.to_string(), "upstream fetch failed: timeout");
  }

  #[test]
  fn test_display_upstream_overloaded() {
    assert_eq!(EngineError::UpstreamOverloaded.to_string(), "upstream fetch queue is full");
  }

  #[test]
  fn test_display_cancelled() {
    assert_eq!(EngineError::Cancelled.to_string(), "request cancelled before completion");
  }

  #[test]
  fn test_display_data_unavailable() {
    let err = EngineError::DataUnavailable("600000".to_string());
    assert_eq!(err.to_string(), "no data available for 600000");
  }

  #[test]
  fn test_display_internal_inconsistency() {
    let err = EngineError::InternalInconsistency("row count mismatch".to_string());
    assert_eq!(err.to_string(), "internal inconsistency: row count mismatch");
  }

  #[test]
  fn test_from_core_invalid_symbol() {
    let err: EngineError = qdb_core::Error::InvalidSymbol("ZZ".to_string()).into();
    assert!(matches!(err, EngineError::InvalidSymbol(s) if s == "ZZ"));
  }

  #[test]
  fn test_from_core_calendar_range_unsupported() {
    let err: EngineError = qdb_core::Error::CalendarRangeUnsupported("1990-01-01".to_string()).into();
    assert!(matches!(err, EngineError::UpstreamFail(_)));
  }

  #[test]
  fn test_from_adapter_invalid_symbol() {
    let err: EngineError = AdapterError::InvalidSymbol("600000".to_string()).into();
    assert!(matches!(err, EngineError::InvalidSymbol(s) if s == "600000"));
  }

  #[test]
  fn test_from_adapter_not_found() {
    let err: EngineError = AdapterError::NotFound.into();
    assert!(matches!(err, EngineError::DataUnavailable(_)));
  }

  #[test]
  fn test_from_adapter_transient_is_upstream_fail() {
    let err: EngineError = AdapterError::Transient("timeout".to_string()).into();
    assert!(matches!(err, EngineError::UpstreamFail(_)));
  }

  #[test]
  fn test_from_repository_error() {
    let err: EngineError = RepositoryError::NotFound("row".to_string()).into();
    assert!(matches!(err, EngineError::UpstreamFail(_)));
  }
}
