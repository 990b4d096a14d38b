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

//! Generic in-flight request registry: serializes concurrent work that
//! shares a signature, and lets a late arrival attach to the handle of
//! an already-running attempt instead of duplicating it.
//!
//! This is the primitive the fetch coordinator uses to guarantee
//! at-most-one concurrent upstream fetch per `(symbol, kind, start,
//! end, adjust)` signature; it has no knowledge of symbols, bars, or
//! fetches — just signatures and completion.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Registry of in-flight work keyed by an arbitrary signature `K`.
///
/// `run` either becomes the single owner of a signature (runs `work`
/// and wakes everyone who attached while it ran) or attaches to an
/// already-running attempt and waits for it to finish. Either way the
/// caller gets back whatever the *owner's* `work` produced — attaching
/// callers are expected to re-derive their own result afterward (e.g.
/// the fetch coordinator re-runs gap analysis once woken, since the
/// owner may have covered only part of what the waiter needed).
pub struct InFlightRegistry<K> {
  handles: Mutex<HashMap<K, Arc<Notify>>>,
}

impl<K> Default for InFlightRegistry<K>
where
  K: Eq + Hash + Clone,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<K> InFlightRegistry<K>
where
  K: Eq + Hash + Clone,
{
  pub fn new() -> Self {
    InFlightRegistry { handles: Mutex::new(HashMap::new()) }
  }

  /// Run `work` for `key` if nothing is already in flight for it,
  /// otherwise wait for the in-flight attempt to finish. Returns
  /// `Owner(T)` when this call actually executed `work`, or
  /// `Attached` when it instead waited on someone else's attempt.
  pub async fn run<F, Fut, T>(&self, key: K, work: F) -> Outcome<T>
  where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
  {
    let notify = {
      let mut handles = self.handles.lock().await;
      if let Some(existing) = handles.get(&key) {
        Some(existing.clone())
      } else {
        handles.insert(key.clone(), Arc::new(Notify::new()));
        None
      }
    };

    if let Some(notify) = notify {
      notify.notified().await;
      return Outcome::Attached;
    }

    let result = work().await;

    let mut handles = self.handles.lock().await;
    if let Some(notify) = handles.remove(&key) {
      notify.notify_waiters();
    }
    drop(handles);

    Outcome::Owner(result)
  }

  /// Number of signatures currently in flight. Test/introspection only.
  pub async fn len(&self) -> usize {
    self.handles.lock().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  /// This call executed the work itself.
  Owner(T),
  /// This call waited for another in-flight attempt to finish.
  Attached,
}

impl<T> Outcome<T> {
  pub fn into_owner(self) -> Option<T> {
    match self {
      Outcome::Owner(value) => Some(value),
      Outcome::Attached => None,
    }
  }

  pub fn is_owner(&self) -> bool {
    matches!(self, Outcome::Owner(_))
  }
}
