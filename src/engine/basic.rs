//! Single-threaded reference engine.
//!
//! Enumerates every candidate deck lexicographically and counts each one.
//! Intractable beyond small deck sizes; it exists as the semantic
//! reference the incremental engine is checked against.

use crate::cards::Card;
use crate::combinations::Combinations;
use crate::deck::{count_sets, SetCount};
use crate::engine::{effective_pack, validate, CancelToken, Cancelled};
use anyhow::Result;

pub struct BasicSearch<F> {
    deck_size: usize,
    include: Vec<Card>,
    exclude: Vec<Card>,
    observer: F,
}

impl<F: FnMut(&[Card], SetCount)> BasicSearch<F> {
    pub fn new(
        deck_size: usize,
        include: &[Card],
        exclude: &[Card],
        observer: F,
    ) -> Result<BasicSearch<F>> {
        validate(deck_size, include, exclude)?;
        Ok(BasicSearch {
            deck_size,
            include: include.to_vec(),
            exclude: exclude.to_vec(),
            observer,
        })
    }

    /// Enumerate and count. Returns the number of no-Set decks of exactly
    /// `deck_size` cards.
    pub fn run(mut self, cancel: &CancelToken) -> Result<u64> {
        let pack_effective = effective_pack(&self.include, &self.exclude);
        // The pool excludes the forced cards; every candidate is
        // include + a pick from the pool.
        let pool = &pack_effective[self.include.len()..];
        let picks = self.deck_size - self.include.len();
        if picks > pool.len() {
            return Ok(0);
        }

        let mut combos = Combinations::new(pool.len(), picks)?;
        let mut candidate: Vec<Card> = Vec::with_capacity(self.deck_size);
        let mut no_set_count = 0u64;
        loop {
            if cancel.is_cancelled() {
                return Err(Cancelled.into());
            }
            if !combos.advance() {
                break;
            }
            candidate.clear();
            candidate.extend_from_slice(&self.include);
            candidate.extend(combos.current().iter().map(|&i| pool[i]));

            let count = count_sets(&candidate, true);
            (self.observer)(&candidate, count);
            if count.tested > 0 && count.sets == 0 {
                no_set_count += 1;
            }
        }
        Ok(no_set_count)
    }
}
