//! Exact counting of no-Set decks in the card game *Set*.
//!
//! Given a deck size k (3..=81) and optional include/exclude card filters,
//! the crate counts the k-card subsets of the 81-card pack that contain no
//! Set. Two engines share one observer contract:
//!
//! - [`BasicSearch`] enumerates every candidate deck lexicographically and
//!   counts each one. Simple and exact, but intractable past small k.
//! - [`IncrementalSearch`] grows decks one card at a time across parallel
//!   workers and prunes every branch whose prefix already holds a Set,
//!   which is what makes larger deck sizes reachable.
//!
//! The hot inner predicate rides on a bit-packed card encoding: adding
//! three card ids lets each attribute be checked with a mask compare, see
//! [`cards::is_set`].

pub mod cards;
pub mod chain;
pub mod combinations;
pub mod deck;
pub mod engine;
pub mod runtime;
pub mod stats;

pub use cards::{pack, Card};
pub use deck::{count_sets, deck_valid, SetCount};
pub use engine::{run, BasicSearch, CancelToken, Cancelled, IncrementalSearch};
pub use stats::SearchStats;
