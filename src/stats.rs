//! Aggregate search statistics.
//!
//! `SearchStats` is fed from an engine observer and read concurrently by
//! the CLI's status thread, so counters are atomics. The longest no-Set
//! deck seen is kept for the completion summary.

use crate::cards::{Card, PACK_SIZE};
use crate::deck::SetCount;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

pub struct SearchStats {
    started: Instant,
    decks_analyzed: AtomicU64,
    triples_tested: AtomicU64,
    decks_no_set: AtomicU64,
    no_set_by_size: [AtomicU64; PACK_SIZE + 1],
    longest_no_set: Mutex<Vec<Card>>,
}

impl SearchStats {
    pub fn new() -> SearchStats {
        SearchStats {
            started: Instant::now(),
            decks_analyzed: AtomicU64::new(0),
            triples_tested: AtomicU64::new(0),
            decks_no_set: AtomicU64::new(0),
            no_set_by_size: std::array::from_fn(|_| AtomicU64::new(0)),
            longest_no_set: Mutex::new(Vec::new()),
        }
    }

    /// Record one evaluated deck. Decks too small to test a triple count
    /// as analyzed but not as no-Set.
    pub fn record(&self, cards: &[Card], count: SetCount) {
        self.decks_analyzed.fetch_add(1, Ordering::Relaxed);
        self.triples_tested.fetch_add(count.tested, Ordering::Relaxed);
        if count.tested > 0 && count.sets == 0 {
            self.decks_no_set.fetch_add(1, Ordering::Relaxed);
            self.no_set_by_size[cards.len()].fetch_add(1, Ordering::Relaxed);
            let mut longest = self.longest_no_set.lock().unwrap();
            if cards.len() > longest.len() {
                *longest = cards.to_vec();
            }
        }
    }

    pub fn decks_analyzed(&self) -> u64 {
        self.decks_analyzed.load(Ordering::Relaxed)
    }

    pub fn triples_tested(&self) -> u64 {
        self.triples_tested.load(Ordering::Relaxed)
    }

    pub fn decks_no_set(&self) -> u64 {
        self.decks_no_set.load(Ordering::Relaxed)
    }

    /// (size, count) pairs for every size that produced a no-Set deck.
    pub fn no_set_by_size(&self) -> Vec<(usize, u64)> {
        self.no_set_by_size
            .iter()
            .enumerate()
            .filter_map(|(size, n)| {
                let n = n.load(Ordering::Relaxed);
                (n > 0).then_some((size, n))
            })
            .collect()
    }

    pub fn longest_no_set(&self) -> Vec<Card> {
        self.longest_no_set.lock().unwrap().clone()
    }

    /// `time_s total_triples_tested triples_per_s decks_analyzed decks_no_set`
    pub fn status_line(&self) -> String {
        let secs = self.started.elapsed().as_secs_f64();
        let tested = self.triples_tested();
        let per_s = if secs > 0.0 { tested as f64 / secs } else { 0.0 };
        format!(
            "{:.0} {} {:.0} {} {}",
            secs,
            tested,
            per_s,
            self.decks_analyzed(),
            self.decks_no_set()
        )
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        SearchStats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::pack;

    #[test]
    fn records_no_set_decks_by_size() {
        let stats = SearchStats::new();
        let pack = pack();
        // Too small to test a triple.
        stats.record(&pack[..2], SetCount::default());
        // A Set-free triple.
        stats.record(&[pack[0], pack[1], pack[3]], SetCount { tested: 1, sets: 0 });
        // A deck holding a Set.
        stats.record(&pack[..4], SetCount { tested: 1, sets: 1 });

        assert_eq!(stats.decks_analyzed(), 3);
        assert_eq!(stats.triples_tested(), 2);
        assert_eq!(stats.decks_no_set(), 1);
        assert_eq!(stats.no_set_by_size(), vec![(3, 1)]);
        assert_eq!(stats.longest_no_set().len(), 3);
    }
}
