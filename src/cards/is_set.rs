//! The Set predicate: do three cards form a valid Set?
//!
//! Three variants with identical semantics. `is_set` is the hot one: it
//! adds the three packed ids and checks each 6-bit attribute field of the
//! sum. Because an attribute value contributes exactly one of {1, 4, 16}
//! to its field, the per-field sum is 3, 12 or 48 when all three cards
//! agree and 1 + 4 + 16 = 21 when all three differ; any other sum means
//! "two of a kind", which disqualifies the triple. The index bytes sum to
//! at most 240 and never carry into the shape field.

use super::{Card, COLOR_SHIFT, COUNT_SHIFT, FIELD_MASK, SHADING_SHIFT, SHAPE_SHIFT};

/// Field sums that a Set produces: all-equal at one of the three
/// sub-slots, or one of each value.
const ALL_LOW: u32 = 0b00_00_11;
const ALL_MID: u32 = 0b00_11_00;
const ALL_HIGH: u32 = 0b11_00_00;
const ONE_OF_EACH: u32 = 0b01_01_01;

/// The admissible sums above, as a 64-bit membership mask over the 6-bit
/// field value.
const SET_SUMS: u64 =
    (1 << ALL_LOW) | (1 << ALL_MID) | (1 << ALL_HIGH) | (1 << ONE_OF_EACH);

#[inline(always)]
fn field_admissible(field: u32) -> bool {
    matches!(field, ALL_LOW | ALL_MID | ALL_HIGH | ONE_OF_EACH)
}

/// Bitwise Set predicate: one 32-bit add, then four field checks with
/// short-circuit. The default for all hot paths.
#[inline(always)]
pub fn is_set(a: Card, b: Card, c: Card) -> bool {
    let sum = a.id() + b.id() + c.id();
    field_admissible((sum >> SHAPE_SHIFT) & FIELD_MASK)
        && field_admissible((sum >> COUNT_SHIFT) & FIELD_MASK)
        && field_admissible((sum >> COLOR_SHIFT) & FIELD_MASK)
        && field_admissible((sum >> SHADING_SHIFT) & FIELD_MASK)
}

/// Branch-free variant: every field indexes the membership mask, and the
/// four verdicts are combined in bit 0. No short-circuit.
#[inline(always)]
pub fn is_set_branchless(a: Card, b: Card, c: Card) -> bool {
    let sum = a.id() + b.id() + c.id();
    let hits = (SET_SUMS >> ((sum >> SHAPE_SHIFT) & FIELD_MASK))
        & (SET_SUMS >> ((sum >> COUNT_SHIFT) & FIELD_MASK))
        & (SET_SUMS >> ((sum >> COLOR_SHIFT) & FIELD_MASK))
        & (SET_SUMS >> ((sum >> SHADING_SHIFT) & FIELD_MASK));
    hits & 1 == 1
}

/// Readable reference implementation: decode the attributes and compare.
pub fn is_set_reference(a: Card, b: Card, c: Card) -> bool {
    fn uniform_or_distinct<T: PartialEq>(x: T, y: T, z: T) -> bool {
        (x == y && y == z) || (x != y && y != z && x != z)
    }
    uniform_or_distinct(a.shape(), b.shape(), c.shape())
        && uniform_or_distinct(a.count(), b.count(), c.count())
        && uniform_or_distinct(a.color(), b.color(), c.color())
        && uniform_or_distinct(a.shading(), b.shading(), c.shading())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{pack, PACK_SIZE};

    #[test]
    fn known_set_and_non_set() {
        let pack = pack();
        // Same shape, count and color; all three shadings.
        assert!(is_set(pack[0], pack[1], pack[2]));
        // Two purple, one green.
        assert!(!is_set(pack[0], pack[1], pack[3]));
    }

    #[test]
    fn all_variants_agree_on_every_triple() {
        let pack = pack();
        let mut sets = 0u64;
        for i in 0..PACK_SIZE {
            for j in (i + 1)..PACK_SIZE {
                for k in (j + 1)..PACK_SIZE {
                    let (a, b, c) = (pack[i], pack[j], pack[k]);
                    let fast = is_set(a, b, c);
                    assert_eq!(fast, is_set_reference(a, b, c), "{a:?} {b:?} {c:?}");
                    assert_eq!(fast, is_set_branchless(a, b, c), "{a:?} {b:?} {c:?}");
                    if fast {
                        sets += 1;
                    }
                }
            }
        }
        // Every pair of cards completes to exactly one Set, and each Set
        // holds three pairs: 81 * 80 / 2 / 3.
        assert_eq!(sets, 1080);
    }

    #[test]
    fn argument_order_is_irrelevant() {
        let pack = pack();
        let (a, b, c) = (pack[4], pack[31], pack[58]);
        let expected = is_set(a, b, c);
        assert_eq!(is_set(c, a, b), expected);
        assert_eq!(is_set(b, c, a), expected);
    }
}
