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

//! Closed lookup tables for the symbol normalizer. Kept as data, not
//! branches, so a newly recognized alias or index code is a one-line
//! addition here rather than a change to `symbol.rs`'s control flow.

use crate::market::Market;

/// `(alias, canonical_code)`. Aliases are matched after trimming and
/// upper-casing the input.
pub const HK_INDEX_ALIASES: &[(&str, &str)] = &[
  ("HSI", "HSI"),
  ("^HSI", "HSI"),
  ("HK.HSI", "HSI"),
  ("HANG SENG", "HSI"),
  ("HANG SENG INDEX", "HSI"),
  ("HSCEI", "HSCEI"),
  ("HSTECH", "HSTECH"),
];

/// Recognized A-share index codes, checked before the generic 6-digit
/// stock-prefix rule so a code like `000001` resolves to the SSE
/// Composite Index rather than the Shenzhen-listed stock that happens to
/// share the digits. See `DESIGN.md` for why this ordering was chosen.
pub const A_SHARE_INDEX_CODES: &[(&str, Market)] = &[
  ("000001", Market::IndexCn), // SSE Composite Index
  ("000016", Market::IndexCn), // SSE 50
  ("000300", Market::IndexCn), // CSI 300
  ("000905", Market::IndexCn), // CSI 500
  ("000906", Market::IndexCn), // CSI 800
  ("399001", Market::IndexCn), // SZSE Component Index
  ("399005", Market::IndexCn), // SZSE SME Composite
  ("399006", Market::IndexCn), // ChiNext Index
  ("399106", Market::IndexCn), // SZSE Composite Index
];
