//! Search engines and the plumbing they share.
//!
//! Both algorithms validate the same arguments, build the same effective
//! pack, and report through the same observer surface. The observer is a
//! plain `FnMut(&[Card], SetCount)` handed to the engine constructor and
//! consumed by `run`, so it cannot change while a run is in flight. It is
//! only ever invoked from the thread that called `run`.

pub mod basic;
pub mod context;
pub mod incremental;

pub use basic::BasicSearch;
pub use incremental::IncrementalSearch;

use crate::cards::{pack, Card, PACK_SIZE};
use crate::deck::deck_valid;
use ahash::AHashSet;
use anyhow::{bail, ensure, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Smallest deck that can hold a triple.
pub const MIN_DECK_SIZE: usize = 3;

/// Shared cooperative-cancellation flag. Cloning yields another handle to
/// the same flag.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Distinguished failure returned when a run is cancelled. Observer
/// effects up to the cancellation point are retained; any count is void.
/// Recoverable from an `anyhow` chain via `Error::is::<Cancelled>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("search cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Pre-run argument validation. Everything here fails before any deck is
/// evaluated.
pub(crate) fn validate(deck_size: usize, include: &[Card], exclude: &[Card]) -> Result<()> {
    ensure!(
        (MIN_DECK_SIZE..=PACK_SIZE).contains(&deck_size),
        "deck size {deck_size} out of range [{MIN_DECK_SIZE}, {PACK_SIZE}]"
    );
    if !include.is_empty() {
        ensure!(deck_valid(include), "include list is not a valid deck");
        ensure!(
            include.len() <= deck_size,
            "include list holds {} cards but the deck size is {deck_size}",
            include.len()
        );
    }
    if !exclude.is_empty() {
        ensure!(deck_valid(exclude), "exclude list is not a valid deck");
    }
    for card in include {
        if exclude.contains(card) {
            bail!("card {card} is both included and excluded");
        }
    }
    Ok(())
}

/// The pack the search runs over: excludes dropped, includes moved to the
/// front (preserving their given order), the rest in canonical order.
pub(crate) fn effective_pack(include: &[Card], exclude: &[Card]) -> Vec<Card> {
    let filtered: AHashSet<u32> = include.iter().chain(exclude).map(|c| c.id()).collect();
    let mut cards = include.to_vec();
    cards.extend(pack().iter().filter(|c| !filtered.contains(&c.id())));
    cards
}

/// Count the no-Set decks of `deck_size` cards under the given filters,
/// using the parallel incremental engine with default tuning.
///
/// The returned count is exact. -1 is reserved for "the algorithm cannot
/// produce a definitive answer"; neither shipped algorithm uses it.
pub fn run(
    deck_size: usize,
    include: &[Card],
    exclude: &[Card],
    cancel: &CancelToken,
) -> Result<i64> {
    let count = IncrementalSearch::new(deck_size, include, exclude, |_: &[Card], _| {})?
        .run(cancel)?;
    Ok(count as i64)
}
