//! Linked-prefix deck representation.
//!
//! A `DeckChain` node appends one card to a shared parent chain. Many
//! sibling decks reference the same parent, so long common prefixes are
//! stored once. Nodes are immutable; evaluation results travel with the
//! work queues, not with the chain.

use crate::cards::Card;
use std::sync::Arc;

pub struct DeckChain {
    parent: Option<Arc<DeckChain>>,
    card: Card,
    /// Position of `card` in the effective pack, not its pack index.
    /// Children always extend with strictly later positions, which is what
    /// keeps every subset enumerated exactly once.
    pos: usize,
    len: usize,
}

impl DeckChain {
    /// A one-card chain.
    pub fn seed(card: Card, pos: usize) -> Arc<DeckChain> {
        Arc::new(DeckChain {
            parent: None,
            card,
            pos,
            len: 1,
        })
    }

    /// Extend this chain by one card at a strictly later position.
    pub fn child(self: &Arc<Self>, card: Card, pos: usize) -> Arc<DeckChain> {
        debug_assert!(pos > self.pos, "child position {pos} not after {}", self.pos);
        Arc::new(DeckChain {
            parent: Some(Arc::clone(self)),
            card,
            pos,
            len: self.len + 1,
        })
    }

    /// Build a chain from a card sequence, positions 0..len.
    /// Returns None for an empty sequence.
    pub fn from_cards(cards: &[Card]) -> Option<Arc<DeckChain>> {
        let mut chain: Option<Arc<DeckChain>> = None;
        for (pos, &card) in cards.iter().enumerate() {
            chain = Some(match chain {
                Some(parent) => parent.child(card, pos),
                None => DeckChain::seed(card, pos),
            });
        }
        chain
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Effective-pack position of the most recently appended card.
    #[inline]
    pub fn last_pos(&self) -> usize {
        self.pos
    }

    /// Materialize the deck into `buf[..len]` in insertion order, walking
    /// parent links back-to-front. Returns the deck length.
    pub fn write_cards(&self, buf: &mut [Card]) -> usize {
        let mut node = self;
        let mut i = self.len;
        loop {
            i -= 1;
            buf[i] = node.card;
            match &node.parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
        debug_assert_eq!(i, 0);
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::pack;

    #[test]
    fn materializes_in_insertion_order() {
        let pack = pack();
        let chain = DeckChain::seed(pack[10], 0)
            .child(pack[4], 2)
            .child(pack[63], 5);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.last_pos(), 5);

        let mut buf = *pack;
        let n = chain.write_cards(&mut buf);
        let indexes: Vec<usize> = buf[..n].iter().map(|c| c.index()).collect();
        assert_eq!(indexes, vec![10, 4, 63]);
    }

    #[test]
    fn from_cards_round_trips() {
        let pack = pack();
        let cards = [pack[7], pack[3], pack[41]];
        let chain = DeckChain::from_cards(&cards).unwrap();
        assert_eq!(chain.len(), 3);
        let mut buf = *pack;
        let n = chain.write_cards(&mut buf);
        assert_eq!(&buf[..n], &cards);

        assert!(DeckChain::from_cards(&[]).is_none());
    }

    #[test]
    fn siblings_share_their_parent() {
        let pack = pack();
        let parent = DeckChain::seed(pack[0], 0);
        let a = parent.child(pack[1], 1);
        let b = parent.child(pack[2], 2);
        assert_eq!(a.len(), b.len());
        // Two children plus our local handle.
        assert_eq!(Arc::strong_count(&parent), 3);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn rejects_non_ascending_positions() {
        let pack = pack();
        let chain = DeckChain::seed(pack[5], 3);
        let _ = chain.child(pack[6], 3);
    }
}
