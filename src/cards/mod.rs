//! Card encoding and the canonical 81-card pack.
//!
//! A card id is a packed u32: the card's pack index in the low byte, then
//! four 6-bit attribute fields (shape, count, color, shading). Within a
//! field the three attribute values occupy the 2-bit sub-slots at positions
//! 0, 2 and 4, so exactly one of bits {0, 2, 4} of the field is set. The
//! Set predicate depends on this layout: adding three ids makes each field
//! count value occurrences without carrying into its neighbours.

use anyhow::{ensure, Result};
use std::fmt;
use std::sync::LazyLock;

pub mod is_set;

pub use is_set::{is_set, is_set_branchless, is_set_reference};

/// Number of cards in the full pack.
pub const PACK_SIZE: usize = 81;

// Field layout of a card id.
pub(crate) const INDEX_MASK: u32 = 0xff;
pub(crate) const FIELD_MASK: u32 = 0b11_11_11;
pub(crate) const SHAPE_SHIFT: u32 = 8;
pub(crate) const COUNT_SHIFT: u32 = 14;
pub(crate) const COLOR_SHIFT: u32 = 20;
pub(crate) const SHADING_SHIFT: u32 = 26;

macro_rules! attribute {
    ($name:ident { $a:ident, $b:ident, $c:ident }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $a,
            $b,
            $c,
        }

        impl $name {
            pub const ALL: [$name; 3] = [$name::$a, $name::$b, $name::$c];

            /// One-hot pattern inside the attribute's 6-bit field.
            #[inline]
            pub(crate) fn bits(self) -> u32 {
                1 << (2 * self as u32)
            }

            #[inline]
            fn from_field(field: u32) -> $name {
                match field {
                    0b00_00_01 => $name::$a,
                    0b00_01_00 => $name::$b,
                    0b01_00_00 => $name::$c,
                    _ => unreachable!("corrupt card id: bad {} field", stringify!($name)),
                }
            }
        }
    };
}

attribute!(Shape { Diamond, Squiggle, Oval });
attribute!(Count { One, Two, Three });
attribute!(Color { Purple, Green, Red });
attribute!(Shading { Open, Solid, Striped });

/// A Set card, stored as its packed 32-bit id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u32);

impl Card {
    /// Build a card from its four attributes. The pack index is derived
    /// from the canonical ordering (shape outermost, shading innermost).
    pub fn new(shape: Shape, count: Count, color: Color, shading: Shading) -> Card {
        let index = ((shape as u32 * 3 + count as u32) * 3 + color as u32) * 3 + shading as u32;
        Card(
            index
                + (shape.bits() << SHAPE_SHIFT)
                + (count.bits() << COUNT_SHIFT)
                + (color.bits() << COLOR_SHIFT)
                + (shading.bits() << SHADING_SHIFT),
        )
    }

    /// Reconstruct a card from a raw id. Only the canonical encoding of a
    /// pack card is accepted; anything else (including the zero id) fails.
    pub fn from_id(id: u32) -> Result<Card> {
        let index = (id & INDEX_MASK) as usize;
        ensure!(index < PACK_SIZE, "card index {index} out of range");
        let canonical = pack()[index];
        ensure!(
            canonical.0 == id,
            "id {id:#010x} is not the canonical encoding of card {index}"
        );
        Ok(canonical)
    }

    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    #[inline]
    pub fn shape(self) -> Shape {
        Shape::from_field((self.0 >> SHAPE_SHIFT) & FIELD_MASK)
    }

    #[inline]
    pub fn count(self) -> Count {
        Count::from_field((self.0 >> COUNT_SHIFT) & FIELD_MASK)
    }

    #[inline]
    pub fn color(self) -> Color {
        Color::from_field((self.0 >> COLOR_SHIFT) & FIELD_MASK)
    }

    #[inline]
    pub fn shading(self) -> Shading {
        Shading::from_field((self.0 >> SHADING_SHIFT) & FIELD_MASK)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card({} {:?} {:?} {:?} {:?})",
            self.index(),
            self.shape(),
            self.count(),
            self.color(),
            self.shading()
        )
    }
}

static PACK: LazyLock<[Card; PACK_SIZE]> = LazyLock::new(|| {
    let mut cards = [Card(0); PACK_SIZE];
    let mut i = 0;
    for shape in Shape::ALL {
        for count in Count::ALL {
            for color in Color::ALL {
                for shading in Shading::ALL {
                    cards[i] = Card::new(shape, count, color, shading);
                    i += 1;
                }
            }
        }
    }
    cards
});

/// The canonical pack, ordered so that `pack()[i].index() == i`.
pub fn pack() -> &'static [Card; PACK_SIZE] {
    &PACK
}
