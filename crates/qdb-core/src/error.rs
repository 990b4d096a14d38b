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

/// Low-level errors shared by every crate in the workspace: symbol
/// normalization, trading-calendar lookups, and environment configuration.
/// Higher layers (`qdb-store`, `qdb-upstream`, `qdb-engine`) define their
/// own error enums and convert into or out of this one at the seam.
#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid symbol: {0}")]
  InvalidSymbol(String),

  #[error("calendar range unsupported: {0}")]
  CalendarRangeUnsupported(String),

  #[error("environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  #[error("configuration error: {0}")]
  Config(String),

  #[error("invalid configuration value for {field}: {value}")]
  ConfigValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_invalid_symbol() {
    let err = Error::InvalidSymbol("XYZ123".to_string());
    assert_eq!(err.to_string(), "invalid symbol: XYZ123");
  }

  #[test]
  fn test_error_display_calendar_range_unsupported() {
    let err = Error::CalendarRangeUnsupported("1990-01-01".to_string());
    assert_eq!(err.to_string(), "calendar range unsupported: 1990-01-01");
  }

  #[test]
  fn test_error_display_config() {
    let err = Error::Config("missing DATABASE_URL".to_string());
    assert_eq!(err.to_string(), "configuration error: missing DATABASE_URL");
  }

  #[test]
  fn test_error_display_config_value() {
    let err = Error::ConfigValue { field: "QDB_FETCH_QUEUE_CAP", value: "abc".to_string() };
    assert_eq!(
      err.to_string(),
      "invalid configuration value for QDB_FETCH_QUEUE_CAP: abc"
    );
  }

  #[test]
  fn test_error_from_env_var() {
    let env_err = std::env::VarError::NotPresent;
    let err = Error::from(env_err);
    assert!(matches!(err, Error::EnvVar(_)));
    assert!(err.to_string().contains("environment variable error"));
  }

  #[test]
  fn test_error_debug_impl() {
    let err = Error::Config("test".to_string());
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("Config"));
    assert!(debug_str.contains("test"));
  }

  #[test]
  fn test_result_type_alias() {
    fn returns_ok() -> Result<i32> {
      Ok(42)
    }
    fn returns_err() -> Result<i32> {
      Err(Error::Config("test".to_string()))
    }
    assert_eq!(returns_ok().unwrap(), 42);
    assert!(returns_err().is_err());
  }
}
