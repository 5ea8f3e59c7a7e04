use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::piece::{Color, Piece, Role};
use crate::square::{File, Rank, Square};

/// Piece placement: one bitboard per colored piece.
///
/// The twelve bitboards never overlap. Indexing is by [`Piece::index`], so
/// iteration order is fixed: white king first, black pawn last.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    pieces: [Bitboard; 12],
}

impl Board {
    pub const fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 12],
        }
    }

    /// The standard starting placement.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        let back = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(back) {
                board.put(Square::from_coords(file, color.back_rank()), role.of(color));
                board.put(
                    Square::from_coords(file, color.pawn_rank()),
                    Role::Pawn.of(color),
                );
            }
        }
        board
    }

    #[inline]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    pub fn by_color(&self, color: Color) -> Bitboard {
        Role::ALL
            .into_iter()
            .fold(Bitboard::EMPTY, |bb, role| bb | self.by_piece(role.of(color)))
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().fold(Bitboard::EMPTY, |bb, &piece| bb | piece)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|piece| self.by_piece(*piece).contains(square))
    }

    /// Square of `color`'s king, if it has one.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.by_piece(Role::King.of(color)).first()
    }

    /// Pieces with their bitboards in [`Piece::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Bitboard)> + '_ {
        Piece::ALL.into_iter().zip(self.pieces.iter().copied())
    }

    /// Places `piece` on `square`, clearing whatever stood there.
    pub(crate) fn put(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        self.pieces[piece.index()] = self.pieces[piece.index()].with(square);
    }

    /// Clears `square`, returning the piece that stood there.
    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.pieces[piece.index()] = self.pieces[piece.index()].without(square);
        Some(piece)
    }

    /// True when no square is claimed by two pieces.
    pub(crate) fn is_disjoint(&self) -> bool {
        let total: u32 = self.pieces.iter().map(|bb| bb.count()).sum();
        total == self.occupied().count()
    }
}

/// Parses the board field of FEN: eight `/`-separated ranks, rank 8 first.
impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<&str> = s.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (text, rank) in ranks.into_iter().zip(Rank::ALL.into_iter().rev()) {
            let mut files = 0usize;
            for ch in text.chars() {
                if let Some(skip) = ch.to_digit(10).filter(|d| (1..=9).contains(d)) {
                    files += skip as usize;
                    continue;
                }

                let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                let file = File::new(files as u8).ok_or(FenError::FileCount {
                    rank,
                    files: files + 1,
                })?;
                board.put(Square::from_coords(file, rank), piece);
                files += 1;
            }
            if files != 8 {
                return Err(FenError::FileCount { rank, files });
            }
        }
        Ok(board)
    }
}

/// Writes the board field of FEN.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::from_coords(file, *rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}
