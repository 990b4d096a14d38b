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

//! Answers "is D a trading day in market M?" and enumerates trading days
//! in a closed range. The HK calendar carries a Chinese-New-Year
//! correction table that overrides whatever the upstream provider
//! reports — without it the gap resolver would loop forever re-fetching
//! days the exchange was actually closed.

pub mod data;

use crate::error::{Error, Result};
use crate::market::CalendarRegion;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Lower bound of dates this calendar has holiday data for. A lookup
/// entirely outside `[supported_start(), supported_end()]` fails with
/// `CalendarRangeUnsupported`.
pub fn supported_start() -> NaiveDate {
  NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid static date")
}

/// Upper bound of dates this calendar has holiday data for.
pub fn supported_end() -> NaiveDate {
  NaiveDate::from_ymd_opt(2035, 12, 31).expect("valid static date")
}

#[derive(Debug, Clone)]
pub struct TradingCalendar {
  mainland_holidays: BTreeSet<NaiveDate>,
  hk_holidays: BTreeSet<NaiveDate>,
}

impl Default for TradingCalendar {
  fn default() -> Self {
    Self::new()
  }
}

impl TradingCalendar {
  /// Build the calendar from the embedded static holiday tables.
  pub fn new() -> Self {
    let mainland_holidays = data::MAINLAND_HOLIDAYS.iter().map(|&ymd| ymd_to_date(ymd)).collect();

    let mut hk_holidays: BTreeSet<NaiveDate> =
      data::HK_HOLIDAYS.iter().map(|&ymd| ymd_to_date(ymd)).collect();
    // Unconditional: the CNY correction overrides upstream regardless of
    // what HK_HOLIDAYS already contains for these dates.
    hk_holidays.extend(data::HK_CNY_CORRECTIONS.iter().map(|&ymd| ymd_to_date(ymd)));

    TradingCalendar { mainland_holidays, hk_holidays }
  }

  fn holiday_set(&self, region: CalendarRegion) -> &BTreeSet<NaiveDate> {
    match region {
      CalendarRegion::Mainland => &self.mainland_holidays,
      CalendarRegion::HongKong => &self.hk_holidays,
    }
  }

  fn check_supported(&self, date: NaiveDate) -> Result<()> {
    if date < supported_start() || date > supported_end() {
      return Err(Error::CalendarRangeUnsupported(date.to_string()));
    }
    Ok(())
  }

  pub fn is_trading_day(&self, region: CalendarRegion, date: NaiveDate) -> Result<bool> {
    self.check_supported(date)?;
    let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    Ok(!is_weekend && !self.holiday_set(region).contains(&date))
  }

  /// Trading days in `[start, end]`, ascending. Empty if the range
  /// contains none. `start > end` yields an empty sequence rather than
  /// erroring here — the gap resolver validates ordering itself.
  pub fn trading_days_between(
    &self,
    region: CalendarRegion,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<NaiveDate>> {
    self.check_supported(start)?;
    self.check_supported(end)?;
    if start > end {
      return Ok(Vec::new());
    }
    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
      if self.is_trading_day(region, cursor)? {
        days.push(cursor);
      }
      cursor += Duration::days(1);
    }
    Ok(days)
  }

  /// The most recent trading day on or before `on_or_before`.
  pub fn last_trading_day(&self, region: CalendarRegion, on_or_before: NaiveDate) -> Result<NaiveDate> {
    self.check_supported(on_or_before)?;
    let mut cursor = on_or_before;
    loop {
      if self.is_trading_day(region, cursor)? {
        return Ok(cursor);
      }
      cursor -= Duration::days(1);
      if cursor < supported_start() {
        return Err(Error::CalendarRangeUnsupported(on_or_before.to_string()));
      }
    }
  }

  /// The trading day immediately after `date`, or `None` if that would
  /// fall outside the supported horizon.
  pub fn next_trading_day(&self, region: CalendarRegion, date: NaiveDate) -> Result<Option<NaiveDate>> {
    let mut cursor = date + Duration::days(1);
    while cursor <= supported_end() {
      if self.is_trading_day(region, cursor)? {
        return Ok(Some(cursor));
      }
      cursor += Duration::days(1);
    }
    Ok(None)
  }
}

fn ymd_to_date((y, m, d): data::YMD) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("static holiday table contains an invalid calendar date")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_weekend_never_trading_day() {
    let cal = TradingCalendar::new();
    // 2024-01-06 is a Saturday.
    assert!(!cal.is_trading_day(CalendarRegion::Mainland, date(2024, 1, 6)).unwrap());
    assert!(!cal.is_trading_day(CalendarRegion::HongKong, date(2024, 1, 7)).unwrap());
  }

  #[test]
  fn test_mainland_holiday() {
    let cal = TradingCalendar::new();
    assert!(!cal.is_trading_day(CalendarRegion::Mainland, date(2024, 5, 1)).unwrap());
  }

  #[test]
  fn test_ordinary_weekday_is_trading_day() {
    let cal = TradingCalendar::new();
    // 2024-01-02 is a Tuesday, not a holiday.
    assert!(cal.is_trading_day(CalendarRegion::Mainland, date(2024, 1, 2)).unwrap());
  }

  #[test]
  fn test_trading_days_between_s1_scenario() {
    let cal = TradingCalendar::new();
    let days = cal
      .trading_days_between(CalendarRegion::Mainland, date(2024, 1, 2), date(2024, 1, 5))
      .unwrap();
    assert_eq!(days, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5)]);
  }

  #[test]
  fn test_trading_days_between_skips_weekend_s3_scenario() {
    let cal = TradingCalendar::new();
    let days = cal
      .trading_days_between(CalendarRegion::Mainland, date(2024, 1, 3), date(2024, 1, 10))
      .unwrap();
    assert_eq!(
      days,
      vec![date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9), date(2024, 1, 10)]
    );
  }

  #[test]
  fn test_trading_days_between_empty_for_weekend_only_range() {
    let cal = TradingCalendar::new();
    let days = cal
      .trading_days_between(CalendarRegion::Mainland, date(2024, 1, 6), date(2024, 1, 7))
      .unwrap();
    assert!(days.is_empty());
  }

  #[test]
  fn test_trading_days_between_start_after_end_is_empty() {
    let cal = TradingCalendar::new();
    let days = cal
      .trading_days_between(CalendarRegion::Mainland, date(2024, 1, 10), date(2024, 1, 2))
      .unwrap();
    assert!(days.is_empty());
  }

  #[test]
  fn test_hk_cny_correction_s4_scenario() {
    let cal = TradingCalendar::new();
    let days = cal
      .trading_days_between(CalendarRegion::HongKong, date(2024, 2, 8), date(2024, 2, 20))
      .unwrap();
    assert_eq!(
      days,
      vec![date(2024, 2, 8), date(2024, 2, 15), date(2024, 2, 16), date(2024, 2, 19), date(2024, 2, 20)]
    );
  }

  #[test]
  fn test_last_trading_day_on_holiday_walks_back() {
    let cal = TradingCalendar::new();
    // 2024-05-01 is a holiday; the prior day, 2024-04-30, is a Tuesday.
    let last = cal.last_trading_day(CalendarRegion::Mainland, date(2024, 5, 1)).unwrap();
    assert_eq!(last, date(2024, 4, 30));
  }

  #[test]
  fn test_last_trading_day_on_trading_day_is_identity() {
    let cal = TradingCalendar::new();
    let last = cal.last_trading_day(CalendarRegion::Mainland, date(2024, 1, 2)).unwrap();
    assert_eq!(last, date(2024, 1, 2));
  }

  #[test]
  fn test_next_trading_day_skips_weekend() {
    let cal = TradingCalendar::new();
    // 2024-01-05 is a Friday; next trading day is Monday 2024-01-08.
    let next = cal.next_trading_day(CalendarRegion::Mainland, date(2024, 1, 5)).unwrap();
    assert_eq!(next, Some(date(2024, 1, 8)));
  }

  #[test]
  fn test_calendar_range_unsupported_before_horizon() {
    let cal = TradingCalendar::new();
    let err = cal.is_trading_day(CalendarRegion::Mainland, date(1990, 1, 1)).unwrap_err();
    assert!(matches!(err, Error::CalendarRangeUnsupported(_)));
  }

  #[test]
  fn test_calendar_range_unsupported_after_horizon() {
    let cal = TradingCalendar::new();
    let err = cal.is_trading_day(CalendarRegion::Mainland, date(2040, 1, 1)).unwrap_err();
    assert!(matches!(err, Error::CalendarRangeUnsupported(_)));
  }
}
