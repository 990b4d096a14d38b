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

use thiserror::Error;

/// The five wire-level outcomes an upstream adapter can report. The
/// fetch coordinator in `qdb-engine` maps each of these into the
/// engine-level error taxonomy exactly once, at the coordinator
/// boundary.
#[derive(Debug, Error)]
pub enum AdapterError {
  /// Worth retrying: timeouts, connection failures, 5xx, rate limiting.
  #[error("transient upstream error: {0}")]
  Transient(String),

  /// The symbol was rejected by the upstream provider itself (distinct
  /// from `qdb_core::Error::InvalidSymbol`, which never reaches the
  /// wire).
  #[error("upstream rejected symbol: {0}")]
  InvalidSymbol(String),

  /// Valid-shaped symbol the upstream provider does not recognize.
  /// Propagates as an empty result, not a hard failure.
  #[error("symbol not found upstream")]
  NotFound,

  /// Authentication/authorization failure against the upstream
  /// provider. Not retryable.
  #[error("unauthorized: {0}")]
  Unauthorized(String),

  /// Anything that does not fit the other four kinds. Not retryable.
  #[error("unknown upstream error: {0}")]
  Unknown(String),
}

impl AdapterError {
  /// Whether the fetch coordinator's retry loop should attempt this
  /// call again.
  pub fn is_retryable(&self) -> bool {
    matches!(self, AdapterError::Transient(_))
  }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transient_is_retryable() {
    assert!(AdapterError::Transient("timeout".to_string()).is_retryable());
  }

  #[test]
  fn test_invalid_symbol_is_not_retryable() {
    assert!(!AdapterError::InvalidSymbol("XX".to_string()).is_retryable());
  }

  #[test]
  fn test_not_found_is_not_retryable() {
    assert!(!AdapterError::NotFound.is_retryable());
  }

  #[test]
  fn test_unauthorized_is_not_retryable() {
    assert!(!AdapterError::Unauthorized("bad key".to_string()).is_retryable());
  }

  #[test]
  fn test_unknown_is_not_retryable() {
    assert!(!AdapterError::Unknown("weird".to_string()).is_retryable());
  }

  #[test]
  fn test_display_messages() {
    assert_eq!(AdapterError::NotFound.to_string(), "symbol not found upstream");
    assert_eq!(
      AdapterError::Transient("x".to_string()).to_string(),
      "transient upstream error: x"
    );
  }
}
