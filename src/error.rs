//! Error types reported at the notation boundary.
//!
//! Parsing is all-or-nothing: any of these errors means no [`Position`] was
//! produced. Broken internal invariants are not represented here; they
//! panic.
//!
//! [`Position`]: crate::Position

use thiserror::Error;

use crate::piece::Color;
use crate::square::{Rank, Square, SquareParseError};

/// Failure to parse position notation (FEN).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in board field, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("rank {} describes {files} files instead of 8", .rank.char())]
    FileCount { rank: Rank, files: usize },
    #[error("invalid active color '{0}', expected 'w' or 'b'")]
    InvalidColor(String),
    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),
    #[error("duplicate castling character '{0}'")]
    DuplicateCastling(char),
    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(#[from] SquareParseError),
    #[error("en passant square {0} is not on rank 3 or 6")]
    EnPassantRank(Square),
    #[error("invalid half-move clock '{0}'")]
    HalfMoveClock(String),
    #[error("invalid full-move number '{0}', expected a positive integer")]
    FullMoveNumber(String),
    #[error("{color} has {count} kings, expected exactly 1")]
    KingCount { color: Color, count: u32 },
    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),
    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Failure to resolve long algebraic move text against a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("malformed move '{0}'")]
    Malformed(String),
    #[error("move '{0}' is not legal in this position")]
    Illegal(String),
}
