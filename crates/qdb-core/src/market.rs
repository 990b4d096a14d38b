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

//! The closed set of markets QuantDB understands, and the two trading
//! calendars ("regions") that back them.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A market a canonical symbol can belong to. Distinct from
/// [`CalendarRegion`]: several markets share one trading calendar (the
/// Shanghai and Shenzhen exchanges close on the same days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
  /// Shanghai Stock Exchange main board.
  ASh,
  /// Shenzhen Stock Exchange main board.
  ASz,
  /// Shanghai STAR Market (science and technology innovation board).
  AStar,
  /// Shenzhen ChiNext board.
  AChiNext,
  /// Hong Kong Stock Exchange.
  Hk,
  /// A mainland China market index (e.g. SSE Composite, CSI 300).
  IndexCn,
  /// A Hong Kong market index (e.g. Hang Seng Index).
  IndexHk,
}

impl Market {
  /// Which trading calendar governs this market.
  pub fn calendar_region(&self) -> CalendarRegion {
    match self {
      Market::ASh | Market::ASz | Market::AStar | Market::AChiNext | Market::IndexCn => {
        CalendarRegion::Mainland
      }
      Market::Hk | Market::IndexHk => CalendarRegion::HongKong,
    }
  }

  /// IANA timezone name the market's trading day is interpreted in.
  pub fn timezone(&self) -> Tz {
    self.calendar_region().timezone()
  }

  pub fn code(&self) -> &'static str {
    match self {
      Market::ASh => "A_SH",
      Market::ASz => "A_SZ",
      Market::AStar => "A_STAR",
      Market::AChiNext => "A_CHINEXT",
      Market::Hk => "HK",
      Market::IndexCn => "INDEX_CN",
      Market::IndexHk => "INDEX_HK",
    }
  }
}

impl fmt::Display for Market {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.code())
  }
}

/// The two distinct trading calendars in the system. Several [`Market`]
/// variants share a region because their exchanges observe the same
/// holiday set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarRegion {
  Mainland,
  HongKong,
}

impl CalendarRegion {
  pub fn timezone(&self) -> Tz {
    match self {
      CalendarRegion::Mainland => chrono_tz::Asia::Shanghai,
      CalendarRegion::HongKong => chrono_tz::Asia::Hong_Kong,
    }
  }
}

/// Whether a normalized symbol refers to a tradable security or a
/// market index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
  Stock,
  Index,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mainland_markets_share_region() {
    assert_eq!(Market::ASh.calendar_region(), CalendarRegion::Mainland);
    assert_eq!(Market::ASz.calendar_region(), CalendarRegion::Mainland);
    assert_eq!(Market::AStar.calendar_region(), CalendarRegion::Mainland);
    assert_eq!(Market::AChiNext.calendar_region(), CalendarRegion::Mainland);
    assert_eq!(Market::IndexCn.calendar_region(), CalendarRegion::Mainland);
  }

  #[test]
  fn test_hk_markets_share_region() {
    assert_eq!(Market::Hk.calendar_region(), CalendarRegion::HongKong);
    assert_eq!(Market::IndexHk.calendar_region(), CalendarRegion::HongKong);
  }

  #[test]
  fn test_timezones() {
    assert_eq!(CalendarRegion::Mainland.timezone(), chrono_tz::Asia::Shanghai);
    assert_eq!(CalendarRegion::HongKong.timezone(), chrono_tz::Asia::Hong_Kong);
    assert_eq!(Market::ASh.timezone(), chrono_tz::Asia::Shanghai);
    assert_eq!(Market::Hk.timezone(), chrono_tz::Asia::Hong_Kong);
  }

  #[test]
  fn test_market_code_and_display() {
    assert_eq!(Market::ASh.code(), "A_SH");
    assert_eq!(Market::AStar.to_string(), "A_STAR");
    assert_eq!(Market::IndexHk.to_string(), "INDEX_HK");
  }
}
