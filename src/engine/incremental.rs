//! Parallel incremental engine.
//!
//! Grows decks depth-first, one card at a time, and never extends a deck
//! that already holds a Set: any superset would keep that Set, so whole
//! branches of the C(81, k) space are cut the moment a triple matches.
//! Work is spread over per-worker contexts; each round the coordinator
//! dispatches one bounded batch per active worker (a rayon join point),
//! then drains every reported deck sequentially. The observer therefore
//! runs on the coordinator thread only.

use crate::cards::{pack, Card};
use crate::chain::DeckChain;
use crate::deck::SetCount;
use crate::engine::context::{BatchInputs, WorkContext};
use crate::engine::{effective_pack, validate, CancelToken, Cancelled};
use crate::runtime;
use anyhow::{ensure, Result};
use rayon::prelude::*;

pub struct IncrementalSearch<F> {
    deck_size: usize,
    include: Vec<Card>,
    exclude: Vec<Card>,
    workers: usize,
    batch_size: usize,
    observer: F,
}

impl<F: FnMut(&[Card], SetCount)> IncrementalSearch<F> {
    /// Validates the arguments and captures the observer. Worker count
    /// and batch size start from the runtime defaults.
    pub fn new(
        deck_size: usize,
        include: &[Card],
        exclude: &[Card],
        observer: F,
    ) -> Result<IncrementalSearch<F>> {
        validate(deck_size, include, exclude)?;
        Ok(IncrementalSearch {
            deck_size,
            include: include.to_vec(),
            exclude: exclude.to_vec(),
            workers: runtime::default_workers(),
            batch_size: runtime::default_batch_size(),
            observer,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Result<IncrementalSearch<F>> {
        ensure!(workers > 0, "worker count must be positive");
        self.workers = workers;
        Ok(self)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Result<IncrementalSearch<F>> {
        ensure!(batch_size > 0, "batch size must be positive");
        self.batch_size = batch_size;
        Ok(self)
    }

    /// Run to completion, returning the number of no-Set decks of exactly
    /// `deck_size` cards.
    pub fn run(mut self, cancel: &CancelToken) -> Result<u64> {
        let pack_effective = effective_pack(&self.include, &self.exclude);
        let base = DeckChain::from_cards(&self.include);
        let mut contexts: Vec<WorkContext> = (0..self.workers).map(|_| WorkContext::new()).collect();

        // Seed the workers. The base deck (the include cards) either is
        // the single candidate already, or sprouts one seed per later
        // effective-pack position, dealt round-robin.
        if self.include.len() == self.deck_size {
            contexts[0]
                .pending
                .push(base.expect("deck size is at least 3, so the base is non-empty"));
        } else {
            let first = self.include.len();
            for (i, pos) in (first..pack_effective.len()).enumerate() {
                let card = pack_effective[pos];
                let seed = match &base {
                    Some(base) => base.child(card, pos),
                    None => DeckChain::seed(card, pos),
                };
                contexts[i % self.workers].pending.push(seed);
            }
        }

        let inputs = BatchInputs {
            pack_effective: &pack_effective,
            deck_size: self.deck_size,
            batch_size: self.batch_size,
        };
        let mut no_set_count = 0u64;
        let mut scratch = *pack();

        loop {
            if cancel.is_cancelled() {
                return Err(Cancelled.into());
            }

            // Join point: every active worker runs one batch. No context
            // is touched from this thread while the round is in flight.
            contexts.par_iter_mut().for_each(|ctx| {
                if !ctx.pending.is_empty() {
                    ctx.run_batch(&inputs, cancel);
                }
            });

            // In-flight results of a cancelled round are discarded.
            if cancel.is_cancelled() {
                return Err(Cancelled.into());
            }

            let mut any_pending = false;
            for ctx in contexts.iter_mut() {
                for reported in ctx.reported.drain(..) {
                    let n = reported.chain.write_cards(&mut scratch);
                    (self.observer)(&scratch[..n], reported.count);
                    if n == self.deck_size
                        && reported.count.tested > 0
                        && reported.count.sets == 0
                    {
                        no_set_count += 1;
                    }
                }
                any_pending |= !ctx.pending.is_empty();
            }
            if !any_pending {
                break;
            }
        }
        Ok(no_set_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::deck_valid;

    fn by_indexes(indexes: &[usize]) -> Vec<Card> {
        indexes.iter().map(|&i| pack()[i]).collect()
    }

    #[test]
    fn counts_the_size_three_no_set_decks() {
        let count = IncrementalSearch::new(3, &[], &[], |_: &[Card], _: SetCount| {})
            .unwrap()
            .with_workers(4)
            .unwrap()
            .run(&CancelToken::new())
            .unwrap();
        assert_eq!(count, 84_240);
    }

    #[test]
    fn everything_excluded_counts_zero() {
        let exclude = pack().to_vec();
        let mut calls = 0u64;
        let count = IncrementalSearch::new(5, &[], &exclude, |_: &[Card], _: SetCount| calls += 1)
            .unwrap()
            .run(&CancelToken::new())
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn include_equal_to_deck_size_reports_exactly_the_base() {
        let include = by_indexes(&[2, 17, 33]);
        let mut reported = Vec::new();
        let count = IncrementalSearch::new(3, &include, &[], |cards: &[Card], count: SetCount| {
            reported.push((cards.to_vec(), count));
        })
        .unwrap()
        .run(&CancelToken::new())
        .unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].0, include);
        assert_eq!(count, if reported[0].1.sets == 0 { 1 } else { 0 });
    }

    #[test]
    fn observer_sees_valid_filtered_decks() {
        let include = by_indexes(&[12]);
        // Keep only the 11 cards with index = 5 mod 7 (12 is one of them)
        // so the run stays small.
        let exclude: Vec<Card> = pack()
            .iter()
            .filter(|c| c.index() % 7 != 5)
            .copied()
            .collect();
        IncrementalSearch::new(4, &include, &exclude, |cards: &[Card], count: SetCount| {
            assert!(deck_valid(cards));
            assert!(count.sets <= count.tested);
            assert_eq!(cards[0].index(), 12);
            assert!(cards.iter().all(|c| c.index() % 7 == 5));
        })
        .unwrap()
        .run(&CancelToken::new())
        .unwrap();
    }

    #[test]
    fn zero_workers_is_rejected() {
        let engine = IncrementalSearch::new(3, &[], &[], |_: &[Card], _: SetCount| {}).unwrap();
        assert!(engine.with_workers(0).is_err());
    }

    #[test]
    fn pre_cancelled_run_fails_without_reporting() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = IncrementalSearch::new(3, &[], &[], |_: &[Card], _: SetCount| {
            panic!("observer must not run after cancellation");
        })
        .unwrap()
        .run(&cancel)
        .unwrap_err();
        assert!(err.is::<Cancelled>());
    }
}
