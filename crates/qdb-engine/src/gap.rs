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

//! Decides exactly which contiguous date ranges are missing from the
//! store for a requested `(symbol, start, end)` read. Pure and
//! side-effect free: it takes the set of dates already present and
//! hands back the segments that still need to be fetched, the same way
//! for daily bars and index bars alike.

use qdb_core::calendar::TradingCalendar;
use qdb_core::market::CalendarRegion;
use std::collections::BTreeSet;

use crate::error::EngineResult;

/// A closed, calendar-contiguous span of missing trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
  pub start: chrono::NaiveDate,
  pub end: chrono::NaiveDate,
}

/// The full result of resolving one `(start, end)` request against
/// what is already cached.
#[derive(Debug, Clone)]
pub struct GapResolution {
  /// Every trading day in `[start, clamped_end]`, ascending.
  pub expected: Vec<chrono::NaiveDate>,
  /// The subset of `expected` already present in the store.
  pub present: BTreeSet<chrono::NaiveDate>,
  /// Contiguous missing spans, in ascending order, ready to hand to the
  /// fetch coordinator one at a time.
  pub segments: Vec<Segment>,
}

impl GapResolution {
  pub fn is_complete(&self) -> bool {
    self.segments.is_empty()
  }
}

/// Resolve the gap between what `[start, end]` requires and what
/// `present` already holds.
///
/// `end` is clamped to the most recent trading day on or before `today`
/// before the expected set is built, so a request for "through
/// tomorrow" never asks the fetch coordinator for a day that has not
/// happened yet.
pub fn resolve_gap(
  calendar: &TradingCalendar,
  region: CalendarRegion,
  start: chrono::NaiveDate,
  end: chrono::NaiveDate,
  today: chrono::NaiveDate,
  present: BTreeSet<chrono::NaiveDate>,
) -> EngineResult<GapResolution> {
  let last_trading = calendar.last_trading_day(region, today)?;
  let clamped_end = end.min(last_trading);

  if start > clamped_end {
    return Ok(GapResolution { expected: Vec::new(), present, segments: Vec::new() });
  }

  let expected = calendar.trading_days_between(region, start, clamped_end)?;
  let segments = segment_missing(calendar, region, &expected, &present)?;
  Ok(GapResolution { expected, present, segments })
}

/// Walk `expected` once, grouping consecutive missing trading days into
/// segments. A break occurs iff the next missing date is not the
/// immediate next trading day of the previous missing date, so this is
/// O(expected.len()) with no re-scanning.
fn segment_missing(
  calendar: &TradingCalendar,
  region: CalendarRegion,
  expected: &[chrono::NaiveDate],
  present: &BTreeSet<chrono::NaiveDate>,
) -> EngineResult<Vec<Segment>> {
  let mut segments = Vec::new();
  let mut current: Option<Segment> = None;
  let mut prev_missing: Option<chrono::NaiveDate> = None;

  for &date in expected {
    if present.contains(&date) {
      if let Some(seg) = current.take() {
        segments.push(seg);
      }
      prev_missing = None;
      continue;
    }

    let contiguous = match prev_missing {
      Some(prev) => calendar.next_trading_day(region, prev)? == Some(date),
      None => false,
    };

    if contiguous {
      if let Some(seg) = current.as_mut() {
        seg.end = date;
      }
    } else {
      if let Some(seg) = current.take() {
        segments.push(seg);
      }
      current = Some(Segment { start: date, end: date });
    }
    prev_missing = Some(date);
  }

  if let Some(seg) = current.take() {
    segments.push(seg);
  }
  Ok(segments)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_fully_missing_range_is_one_segment() {
    let cal = TradingCalendar::new();
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::Mainland,
      date(2024, 1, 2),
      date(2024, 1, 5),
      date(2024, 1, 5),
      BTreeSet::new(),
    )
    .unwrap();
    assert_eq!(resolution.segments, vec![Segment { start: date(2024, 1, 2), end: date(2024, 1, 5) }]);
    assert!(!resolution.is_complete());
  }

  #[test]
  fn test_fully_present_range_has_no_segments() {
    let cal = TradingCalendar::new();
    let present: BTreeSet<_> = [date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5)].into();
    let resolution =
      resolve_gap(&cal, CalendarRegion::Mainland, date(2024, 1, 2), date(2024, 1, 5), date(2024, 1, 5), present)
        .unwrap();
    assert!(resolution.is_complete());
  }

  #[test]
  fn test_gap_in_the_middle_splits_into_two_segments() {
    let cal = TradingCalendar::new();
    // Present: 2024-01-02 and 2024-01-05; missing 2024-01-03 and 2024-01-04.
    let present: BTreeSet<_> = [date(2024, 1, 2), date(2024, 1, 5)].into();
    let resolution =
      resolve_gap(&cal, CalendarRegion::Mainland, date(2024, 1, 2), date(2024, 1, 5), date(2024, 1, 5), present)
        .unwrap();
    assert_eq!(resolution.segments, vec![Segment { start: date(2024, 1, 3), end: date(2024, 1, 4) }]);
  }

  #[test]
  fn test_two_missing_segments_around_a_present_weekday() {
    let cal = TradingCalendar::new();
    // 2024-01-02..2024-01-05, weekdays, present only in the middle.
    let present: BTreeSet<_> = [date(2024, 1, 3)].into();
    let resolution =
      resolve_gap(&cal, CalendarRegion::Mainland, date(2024, 1, 2), date(2024, 1, 5), date(2024, 1, 5), present)
        .unwrap();
    assert_eq!(
      resolution.segments,
      vec![
        Segment { start: date(2024, 1, 2), end: date(2024, 1, 2) },
        Segment { start: date(2024, 1, 4), end: date(2024, 1, 5) },
      ]
    );
  }

  #[test]
  fn test_weekend_gap_does_not_break_contiguity() {
    let cal = TradingCalendar::new();
    // Friday 2024-01-05 and Monday 2024-01-08 are calendar-consecutive
    // trading days despite the weekend between them.
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::Mainland,
      date(2024, 1, 5),
      date(2024, 1, 8),
      date(2024, 1, 8),
      BTreeSet::new(),
    )
    .unwrap();
    assert_eq!(resolution.segments, vec![Segment { start: date(2024, 1, 5), end: date(2024, 1, 8) }]);
  }

  #[test]
  fn test_weekend_only_range_has_no_trading_days() {
    let cal = TradingCalendar::new();
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::Mainland,
      date(2024, 1, 6),
      date(2024, 1, 7),
      date(2024, 1, 7),
      BTreeSet::new(),
    )
    .unwrap();
    assert!(resolution.expected.is_empty());
    assert!(resolution.is_complete());
  }

  #[test]
  fn test_end_clamped_to_last_trading_day_when_today_is_earlier() {
    let cal = TradingCalendar::new();
    // Requesting through 2024-01-10 but "today" is 2024-01-08 (a Monday);
    // the expected set should not extend past 2024-01-08.
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::Mainland,
      date(2024, 1, 2),
      date(2024, 1, 10),
      date(2024, 1, 8),
      BTreeSet::new(),
    )
    .unwrap();
    assert_eq!(resolution.expected.last(), Some(&date(2024, 1, 8)));
  }

  #[test]
  fn test_hk_cny_gap_spans_the_correction_window() {
    let cal = TradingCalendar::new();
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::HongKong,
      date(2024, 2, 8),
      date(2024, 2, 20),
      date(2024, 2, 20),
      BTreeSet::new(),
    )
    .unwrap();
    assert_eq!(resolution.segments, vec![Segment { start: date(2024, 2, 8), end: date(2024, 2, 20) }]);
  }

  #[test]
  fn test_start_after_clamped_end_yields_empty_resolution() {
    let cal = TradingCalendar::new();
    let resolution = resolve_gap(
      &cal,
      CalendarRegion::Mainland,
      date(2024, 1, 10),
      date(2024, 1, 2),
      date(2024, 1, 10),
      BTreeSet::new(),
    )
    .unwrap();
    assert!(resolution.expected.is_empty());
    assert!(resolution.is_complete());
  }
}
