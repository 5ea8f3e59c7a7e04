//! Attack geometry: per-square line and jump tables, and the sliding-piece
//! reachability formula built on them.
//!
//! Tables are derived once from [`Square::offset`], the single source of
//! board adjacency, and are read-only afterwards.

use std::sync::LazyLock;

use crate::bitboard::Bitboard;
use crate::piece::Color;
use crate::square::Square;

/// One of the four lines through a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Rank,
    File,
    /// The a1-h8 direction.
    Diagonal,
    /// The a8-h1 direction.
    AntiDiagonal,
}

impl Line {
    pub const ALL: [Line; 4] = [Line::Rank, Line::File, Line::Diagonal, Line::AntiDiagonal];

    /// (file, rank) step along the line; the opposite step covers the rest.
    const fn step(self) -> (i8, i8) {
        match self {
            Line::Rank => (1, 0),
            Line::File => (0, 1),
            Line::Diagonal => (1, 1),
            Line::AntiDiagonal => (1, -1),
        }
    }
}

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

struct Tables {
    lines: [[Bitboard; 64]; 4],
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

impl Tables {
    fn build() -> Self {
        let mut tables = Tables {
            lines: [[Bitboard::EMPTY; 64]; 4],
            king: [Bitboard::EMPTY; 64],
            knight: [Bitboard::EMPTY; 64],
            pawn: [[Bitboard::EMPTY; 64]; 2],
        };

        for square in Square::all() {
            let i = table_index(square);
            for line in Line::ALL {
                let (df, dr) = line.step();
                tables.lines[line as usize][i] = ray(square, df, dr) | ray(square, -df, -dr);
            }
            tables.king[i] = jumps(square, &KING_OFFSETS);
            tables.knight[i] = jumps(square, &KNIGHT_OFFSETS);
            for color in Color::ALL {
                let forward = color.forward();
                tables.pawn[color.index()][i] = jumps(square, &[(-1, forward), (1, forward)]);
            }
        }

        log::trace!("attack tables built");
        tables
    }
}

#[inline]
fn table_index(square: Square) -> usize {
    square.number() as usize - 1
}

/// Squares from `origin` (exclusive) to the board edge along one step.
fn ray(origin: Square, df: i8, dr: i8) -> Bitboard {
    std::iter::successors(origin.offset(df, dr), |square| square.offset(df, dr)).collect()
}

fn jumps(origin: Square, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(df, dr)| origin.offset(df, dr))
        .collect()
}

/// Every square on `line` through `square`, excluding `square` itself.
#[inline]
pub fn line(square: Square, line: Line) -> Bitboard {
    TABLES.lines[line as usize][table_index(square)]
}

#[inline]
pub fn king_attacks(square: Square) -> Bitboard {
    TABLES.king[table_index(square)]
}

#[inline]
pub fn knight_attacks(square: Square) -> Bitboard {
    TABLES.knight[table_index(square)]
}

/// Squares a `color` pawn on `square` captures on.
#[inline]
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    TABLES.pawn[color.index()][table_index(square)]
}

/// Squares reachable from `origin` along `line` given `occupied`, up to and
/// including the first occupied square in each direction.
///
/// Subtracting twice the origin bit borrows through the empty bits up to the
/// nearest blocker, flipping exactly the travelled squares. The same
/// subtraction on the bit-reversed board covers the other direction.
/// Blockers of either color are included.
#[inline]
pub fn slide(origin: Square, line: Bitboard, occupied: Bitboard) -> Bitboard {
    let origin = Bitboard::from_square(origin);
    let blockers = occupied & line;
    let forward = blockers.0.wrapping_sub(origin.0.wrapping_mul(2));
    let backward = blockers
        .reverse()
        .0
        .wrapping_sub(origin.reverse().0.wrapping_mul(2))
        .reverse_bits();
    line & Bitboard(forward ^ backward)
}

#[inline]
pub fn rook_attacks(origin: Square, occupied: Bitboard) -> Bitboard {
    slide(origin, line(origin, Line::Rank), occupied)
        | slide(origin, line(origin, Line::File), occupied)
}

#[inline]
pub fn bishop_attacks(origin: Square, occupied: Bitboard) -> Bitboard {
    slide(origin, line(origin, Line::Diagonal), occupied)
        | slide(origin, line(origin, Line::AntiDiagonal), occupied)
}

#[inline]
pub fn queen_attacks(origin: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(origin, occupied) | bishop_attacks(origin, occupied)
}
