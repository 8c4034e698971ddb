//! Flat-form decks: validation and triple-set counting.

use crate::cards::{is_set, pack, Card, PACK_SIZE};

/// Result of evaluating a deck: how many triples were tested and how many
/// of them were Sets. `tested == 0` means the deck is too small to hold a
/// triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetCount {
    pub tested: u64,
    pub sets: u64,
}

/// A deck is valid when it is non-empty, every card is the pack's card at
/// its own index, and no card repeats. Quadratic is fine at n <= 81.
pub fn deck_valid(cards: &[Card]) -> bool {
    if cards.is_empty() {
        return false;
    }
    for (i, card) in cards.iter().enumerate() {
        if card.index() >= PACK_SIZE || pack()[card.index()] != *card {
            return false;
        }
        if cards[..i].contains(card) {
            return false;
        }
    }
    true
}

/// Count Sets among all triples (i < j < k) of the deck. With
/// `short_circuit` the scan stops at the first Set, returning the number
/// of triples tested up to and including the hit.
pub fn count_sets(cards: &[Card], short_circuit: bool) -> SetCount {
    let mut count = SetCount::default();
    let n = cards.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                count.tested += 1;
                if is_set(cards[i], cards[j], cards[k]) {
                    count.sets += 1;
                    if short_circuit {
                        return count;
                    }
                }
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinations::binomial;

    fn by_indexes(indexes: &[usize]) -> Vec<Card> {
        indexes.iter().map(|&i| pack()[i]).collect()
    }

    #[test]
    fn validity() {
        assert!(deck_valid(&by_indexes(&[0, 40, 80])));
        assert!(deck_valid(&by_indexes(&[7])));
        assert!(!deck_valid(&[]));
        assert!(!deck_valid(&by_indexes(&[3, 17, 3])));
    }

    #[test]
    fn full_scan_tests_every_triple() {
        for n in [1usize, 2, 3, 5, 9] {
            let deck = by_indexes(&(0..n).collect::<Vec<_>>());
            let count = count_sets(&deck, false);
            assert_eq!(count.tested as u128, binomial(n as u64, 3));
        }
    }

    #[test]
    fn whole_pack_holds_1080_sets() {
        let count = count_sets(pack(), false);
        assert_eq!(count.tested as u128, binomial(81, 3));
        assert_eq!(count.sets, 1080);
    }

    #[test]
    fn short_circuit_stops_at_first_set() {
        // Cards 0,1,2 form a Set, so the very first triple hits.
        let deck = by_indexes(&[0, 1, 2, 5, 7]);
        let count = count_sets(&deck, true);
        assert_eq!(count, SetCount { tested: 1, sets: 1 });

        // A Set-free deck is scanned in full either way.
        let free = by_indexes(&[0, 1, 3]);
        assert_eq!(count_sets(&free, true), count_sets(&free, false));
        assert_eq!(count_sets(&free, true).sets, 0);
    }

    #[test]
    fn small_decks_test_nothing() {
        assert_eq!(count_sets(&by_indexes(&[0, 1]), true), SetCount::default());
    }
}
