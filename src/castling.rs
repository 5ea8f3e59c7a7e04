use std::fmt;

use crate::piece::Color;
use crate::square::{File, Square};

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// File the rook starts on.
    pub const fn rook_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    /// File the king lands on.
    pub const fn king_target_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    /// File the rook lands on, which is also the file the king passes.
    pub const fn rook_target_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// Home square of the king for `color`.
    pub const fn king_square(color: Color) -> Square {
        Square::from_coords(File::E, color.back_rank())
    }

    pub const fn rook_square(self, color: Color) -> Square {
        Square::from_coords(self.rook_file(), color.back_rank())
    }

    pub const fn king_target(self, color: Color) -> Square {
        Square::from_coords(self.king_target_file(), color.back_rank())
    }

    pub const fn rook_target(self, color: Color) -> Square {
        Square::from_coords(self.rook_target_file(), color.back_rank())
    }

    /// Squares strictly between king and rook, which must be empty.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let rank = color.back_rank();
        let files: &'static [File] = match self {
            CastlingSide::KingSide => &[File::F, File::G],
            CastlingSide::QueenSide => &[File::B, File::C, File::D],
        };
        files
            .iter()
            .map(move |&file| Square::from_coords(file, rank))
    }

    /// Squares the king stands on, passes and lands on; none may be attacked.
    pub fn king_path(self, color: Color) -> [Square; 3] {
        [
            Self::king_square(color),
            self.rook_target(color),
            self.king_target(color),
        ]
    }
}

/// Set of castling rights, at most one of each (color, side) pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Notation order: `K`, `Q`, `k`, `q`.
    const ORDER: [(Color, CastlingSide); 4] = [
        (Color::White, CastlingSide::KingSide),
        (Color::White, CastlingSide::QueenSide),
        (Color::Black, CastlingSide::KingSide),
        (Color::Black, CastlingSide::QueenSide),
    ];

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        let shift = match (color, side) {
            (Color::White, CastlingSide::KingSide) => 0,
            (Color::White, CastlingSide::QueenSide) => 1,
            (Color::Black, CastlingSide::KingSide) => 2,
            (Color::Black, CastlingSide::QueenSide) => 3,
        };
        1 << shift
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, color: Color, side: CastlingSide) -> Self {
        CastlingRights(self.0 | Self::flag(color, side))
    }

    #[inline]
    #[must_use]
    pub const fn without(self, color: Color, side: CastlingSide) -> Self {
        CastlingRights(self.0 & !Self::flag(color, side))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Drops every right tied to `square`: a king's home square clears both
    /// of that color's rights, a rook's home square clears its side.
    #[must_use]
    pub fn touched(self, square: Square) -> Self {
        Self::ORDER
            .into_iter()
            .filter(|&(color, side)| {
                square == CastlingSide::king_square(color) || square == side.rook_square(color)
            })
            .fold(self, |rights, (color, side)| rights.without(color, side))
    }

    /// Notation letter for a right: `K`, `Q`, `k` or `q`.
    pub const fn char(color: Color, side: CastlingSide) -> char {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => 'K',
            (Color::White, CastlingSide::QueenSide) => 'Q',
            (Color::Black, CastlingSide::KingSide) => 'k',
            (Color::Black, CastlingSide::QueenSide) => 'q',
        }
    }

    pub fn from_char(ch: char) -> Option<(Color, CastlingSide)> {
        Self::ORDER
            .into_iter()
            .find(|&(color, side)| Self::char(color, side) == ch)
    }
}

/// Writes the notation field: a subset of `KQkq`, or `-` when empty.
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (color, side) in Self::ORDER {
            if self.has(color, side) {
                write!(f, "{}", Self::char(color, side))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({self})")
    }
}
