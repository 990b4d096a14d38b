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

//! Classifies a raw symbol string into a canonical `(market, code)`
//! tuple. Stateless, deterministic, total on its output domain: every
//! input either normalizes or is rejected with `Error::InvalidSymbol`.

pub mod tables;

use crate::error::{Error, Result};
use crate::market::{InstrumentKind, Market};

/// The result of successfully normalizing a raw symbol string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSymbol {
  pub canonical: String,
  pub market: Market,
  pub kind: InstrumentKind,
}

/// Normalize a raw symbol string. Rules are applied in order, first
/// match wins:
///
/// 1. Trim whitespace, upper-case letters.
/// 2. HK index alias (`HSI`, `HSCEI`, `HSTECH`, `^HSI`, `HK.HSI`, ...).
/// 3. A recognized A-share index code (closed list) — checked here,
///    ahead of the generic stock-prefix rule, to resolve the numeric
///    overlap between index codes and stock codes (see `tables.rs`).
/// 4. Exactly 6 digits: A-share stock, market by prefix.
/// 5. Exactly 5 digits: HK stock, zero-padded.
/// 6. Otherwise: `InvalidSymbol`.
pub fn normalize(raw: &str) -> Result<NormalizedSymbol> {
  let trimmed = raw.trim().to_uppercase();
  if trimmed.is_empty() {
    return Err(Error::InvalidSymbol(raw.to_string()));
  }

  if let Some((_, canonical)) = tables::HK_INDEX_ALIASES.iter().find(|(alias, _)| *alias == trimmed) {
    return Ok(NormalizedSymbol {
      canonical: canonical.to_string(),
      market: Market::IndexHk,
      kind: InstrumentKind::Index,
    });
  }

  if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
    if let Some((_, market)) = tables::A_SHARE_INDEX_CODES.iter().find(|(code, _)| *code == trimmed) {
      return Ok(NormalizedSymbol { canonical: trimmed, market: *market, kind: InstrumentKind::Index });
    }
    return classify_a_share_stock(&trimmed).map(|market| NormalizedSymbol {
      canonical: trimmed.clone(),
      market,
      kind: InstrumentKind::Stock,
    });
  }

  if trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
    return Ok(NormalizedSymbol { canonical: trimmed, market: Market::Hk, kind: InstrumentKind::Stock });
  }

  Err(Error::InvalidSymbol(raw.to_string()))
}

fn classify_a_share_stock(code: &str) -> Result<Market> {
  if code.starts_with("688") {
    Ok(Market::AStar)
  } else if code.starts_with("30") {
    Ok(Market::AChiNext)
  } else if code.starts_with("60") || code.starts_with("68") || code.starts_with("51") || code.starts_with("58") {
    Ok(Market::ASh)
  } else if code.starts_with("00") {
    Ok(Market::ASz)
  } else {
    Err(Error::InvalidSymbol(code.to_string()))
  }
}
