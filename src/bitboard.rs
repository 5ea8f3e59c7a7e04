use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::square::{File, Rank, Square};

/// A set of squares packed into 64 bits.
///
/// Square number `n` lives at bit `64 - n`: a1 is the most significant bit,
/// h8 the least significant. Bitboards are plain values; every "mutator"
/// returns a new bitboard.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(!0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_square(square: Square) -> Self {
        Bitboard(square.bit())
    }

    /// Every square of `rank`.
    pub fn from_rank(rank: Rank) -> Self {
        let first = Square::from_coords(File::A, rank);
        // a..h of one rank are eight consecutive bits, a-file highest.
        Bitboard(0xFF << (64 - first.number() - 7))
    }

    /// Returns a copy with all `squares` added.
    pub fn set(self, squares: impl IntoIterator<Item = Square>) -> Self {
        squares
            .into_iter()
            .fold(self, |bb, square| Bitboard(bb.0 | square.bit()))
    }

    /// Returns a copy with all `squares` removed.
    pub fn unset(self, squares: impl IntoIterator<Item = Square>) -> Self {
        squares
            .into_iter()
            .fold(self, |bb, square| Bitboard(bb.0 & !square.bit()))
    }

    #[inline]
    pub const fn with(self, square: Square) -> Self {
        Bitboard(self.0 | square.bit())
    }

    #[inline]
    pub const fn without(self, square: Square) -> Self {
        Bitboard(self.0 & !square.bit())
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & square.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The lowest-numbered square in the set.
    #[inline]
    pub fn first(self) -> Option<Square> {
        self.squares().next()
    }

    /// Mirrors the bits end to end: a1 swaps with h8, b1 with g8, and so on.
    #[inline]
    pub const fn reverse(self) -> Self {
        Bitboard(self.0.reverse_bits())
    }

    /// Iterates the set in ascending square number order.
    ///
    /// The iterator works on a copy, so each call starts afresh.
    #[inline]
    pub const fn squares(self) -> Squares {
        Squares(self.0)
    }
}

/// Ascending-order iterator over the squares of a [`Bitboard`].
#[derive(Debug, Clone)]
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        // The lowest square number sits at the highest set bit.
        let leading = self.0.leading_zeros();
        self.0 &= !(1u64 << (63 - leading));
        Square::new(leading as u8 + 1).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        self.squares()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        Bitboard::EMPTY.set(iter)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Bitboard::from_square(square)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

macro_rules! bitboard_ops {
    ($($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident => $op:tt;)*) => {$(
        impl $trait for Bitboard {
            type Output = Bitboard;

            #[inline]
            fn $method(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $op rhs.0)
            }
        }

        impl $assign_trait for Bitboard {
            #[inline]
            fn $assign_method(&mut self, rhs: Bitboard) {
                self.0 = self.0 $op rhs.0;
            }
        }
    )*};
}

bitboard_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign => &;
    BitOr::bitor, BitOrAssign::bitor_assign => |;
    BitXor::bitxor, BitXorAssign::bitxor_assign => ^;
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018X})", self.0)
    }
}

/// Renders the set as an 8x8 grid, rank 8 on top.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let mark = if self.contains(Square::from_coords(file, *rank)) {
                    'x'
                } else {
                    '.'
                };
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
