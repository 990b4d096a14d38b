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

//! Holiday data, kept separate from `TradingCalendar`'s logic per the
//! "corrections live in data, not code" design note: extending coverage
//! to a new year means appending rows here, not touching `calendar.rs`.
//!
//! Dates are `(year, month, day)` triples rather than `NaiveDate`
//! literals so the table reads as a flat, reviewable list.

pub type YMD = (i32, u32, u32);

/// Mainland China (Shanghai + Shenzhen) public holidays. Covers the
/// statutory "golden week" and single-day holidays; does not model the
/// weekend-shifted make-up trading Saturdays the real exchange
/// occasionally schedules around a holiday block — those are out of
/// scope (weekends are never trading days, see `calendar.rs`).
pub const MAINLAND_HOLIDAYS: &[YMD] = &[
  // 2023
  (2023, 1, 2), (2023, 1, 3),
  (2023, 1, 23), (2023, 1, 24), (2023, 1, 25), (2023, 1, 26), (2023, 1, 27),
  (2023, 4, 5),
  (2023, 4, 29), (2023, 4, 30), (2023, 5, 1), (2023, 5, 2), (2023, 5, 3),
  (2023, 6, 22), (2023, 6, 23), (2023, 6, 24),
  (2023, 9, 29), (2023, 9, 30),
  (2023, 10, 2), (2023, 10, 3), (2023, 10, 4), (2023, 10, 5), (2023, 10, 6),
  // 2024
  (2024, 1, 1),
  (2024, 2, 9), (2024, 2, 12), (2024, 2, 13), (2024, 2, 14), (2024, 2, 15), (2024, 2, 16),
  (2024, 4, 4), (2024, 4, 5),
  (2024, 5, 1), (2024, 5, 2), (2024, 5, 3),
  (2024, 6, 10),
  (2024, 9, 16), (2024, 9, 17),
  (2024, 10, 1), (2024, 10, 2), (2024, 10, 3), (2024, 10, 4), (2024, 10, 7),
  // 2025
  (2025, 1, 1),
  (2025, 1, 28), (2025, 1, 29), (2025, 1, 30), (2025, 1, 31), (2025, 2, 3), (2025, 2, 4),
  (2025, 4, 4),
  (2025, 5, 1), (2025, 5, 2), (2025, 5, 5),
  (2025, 5, 31), (2025, 6, 2),
  (2025, 10, 1), (2025, 10, 2), (2025, 10, 3), (2025, 10, 6), (2025, 10, 7), (2025, 10, 8),
];

/// Hong Kong public holidays (ex-CNY; the Chinese-New-Year closure is
/// handled separately by `HK_CNY_CORRECTIONS` below, unconditionally).
pub const HK_HOLIDAYS: &[YMD] = &[
  // 2023
  (2023, 1, 2),
  (2023, 4, 5), (2023, 4, 7), (2023, 4, 8), (2023, 4, 10),
  (2023, 5, 1), (2023, 5, 26),
  (2023, 6, 22),
  (2023, 7, 1),
  (2023, 9, 29),
  (2023, 10, 2),
  (2023, 12, 25), (2023, 12, 26),
  // 2024
  (2024, 1, 1),
  (2024, 3, 29), (2024, 4, 1), (2024, 4, 4),
  (2024, 5, 1), (2024, 5, 15),
  (2024, 6, 10),
  (2024, 7, 1),
  (2024, 9, 18),
  (2024, 10, 1),
  (2024, 12, 25), (2024, 12, 26),
  // 2025
  (2025, 1, 1),
  (2025, 4, 4), (2025, 4, 18), (2025, 4, 21),
  (2025, 5, 1), (2025, 5, 5),
  (2025, 5, 31),
  (2025, 7, 1),
  (2025, 10, 1), (2025, 10, 7),
  (2025, 12, 25), (2025, 12, 26),
];

/// Chinese-New-Year closure correction for the HK calendar. Applied
/// unconditionally regardless of what the upstream provider reports for
/// these dates — see `calendar.rs` for why this is load-bearing.
pub const HK_CNY_CORRECTIONS: &[YMD] = &[
  // 2023 (CNY fell Jan 22)
  (2023, 1, 23), (2023, 1, 24), (2023, 1, 25),
  // 2024 (CNY fell Feb 10)
  (2024, 2, 9), (2024, 2, 12), (2024, 2, 13), (2024, 2, 14),
  // 2025 (CNY fell Jan 29)
  (2025, 1, 28), (2025, 1, 29), (2025, 1, 30), (2025, 1, 31),
  // 2026 (CNY falls Feb 17)
  (2026, 2, 16), (2026, 2, 17), (2026, 2, 18), (2026, 2, 19),
];
