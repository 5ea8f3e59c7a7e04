//! Full game position and its notation.
//!
//! A [`Position`] is a plain value. Playing a move produces a new position
//! and leaves the old one as it was, so callers can keep any number of
//! predecessors around or probe hypothetical moves freely.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castling::{CastlingRights, CastlingSide};
use crate::error::{FenError, MoveParseError};
use crate::movegen;
use crate::moves::Move;
use crate::piece::{Color, Role};
use crate::square::{File, Rank, Square};

/// Notation of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
}

impl Position {
    pub fn starting() -> Self {
        Position {
            board: Board::starting(),
            turn: Color::White,
            castling: CastlingRights::ALL,
            ep_square: None,
            halfmove_clock: 0,
            fullmoves: 1,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Square passed over by the previous move's double pawn push, if any.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmoves
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    pub fn in_check(&self) -> bool {
        movegen::in_check(self)
    }

    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        movegen::is_attacked(&self.board, square, by)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Plays `mv` if it is legal here.
    ///
    /// The returned position is built from the generated move, so tags on
    /// `mv` are irrelevant.
    pub fn play(&self, mv: &Move) -> Result<Position, MoveParseError> {
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|candidate| candidate.same_transition(mv))
            .ok_or_else(|| MoveParseError::Illegal(mv.to_string()))?;
        Ok(self.play_unchecked(&legal))
    }

    /// Resolves long algebraic text such as `e2e4` or `e7e8q` to one of the
    /// legal moves of this position.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let requested = parse_long_algebraic(text).ok_or_else(|| {
            log::debug!("rejecting malformed move text '{text}'");
            MoveParseError::Malformed(text.to_string())
        })?;

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.same_transition(&requested))
            .ok_or_else(|| {
                log::debug!("move '{text}' is not legal in {self}");
                MoveParseError::Illegal(text.to_string())
            })
    }

    /// Applies `mv` without checking that it is legal.
    ///
    /// The move must come from this position's own move generation (or be
    /// otherwise known legal). A move starting on an empty square panics.
    pub fn play_unchecked(&self, mv: &Move) -> Position {
        let (from, to) = (mv.from(), mv.to());
        let piece = self
            .board
            .piece_at(from)
            .unwrap_or_else(|| panic!("move {mv} starts on empty square in {self}"));
        let color = piece.color;
        let mut board = self.board;

        let en_passant = piece.role == Role::Pawn
            && from.file() != to.file()
            && board.piece_at(to).is_none();
        let captured = if en_passant {
            board.remove(Square::from_coords(to.file(), from.rank()))
        } else {
            board.remove(to)
        };

        board.remove(from);
        board.put(to, mv.promotion().map_or(piece, |role| role.of(color)));

        if piece.role == Role::King && movegen::file_distance(from, to) == 2 {
            let side = if to.file() == File::G {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            };
            let rook = board
                .remove(side.rook_square(color))
                .expect("castling rook on its home square");
            board.put(side.rook_target(color), rook);
        }
        debug_assert!(board.is_disjoint());

        let ep_square = if piece.role == Role::Pawn && movegen::rank_distance(from, to) == 2 {
            from.offset(0, color.forward())
        } else {
            None
        };

        let halfmove_clock = if piece.role == Role::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        let fullmoves = match color {
            Color::White => self.fullmoves,
            Color::Black => self.fullmoves.saturating_add(1),
        };

        Position {
            board,
            turn: !self.turn,
            castling: self.castling.touched(from).touched(to),
            ep_square,
            halfmove_clock,
            fullmoves,
        }
    }

    fn validate(&self) -> Result<(), FenError> {
        for color in Color::ALL {
            let count = self.board.by_piece(Role::King.of(color)).count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        let back_ranks = [Rank::First, Rank::Eighth];
        for color in Color::ALL {
            if let Some(square) = self
                .board
                .by_piece(Role::Pawn.of(color))
                .squares()
                .find(|square| back_ranks.contains(&square.rank()))
            {
                return Err(FenError::PawnOnBackRank(square));
            }
        }

        let waiting = !self.turn;
        if let Some(king) = self.board.king_of(waiting)
            && self.is_attacked(king, self.turn)
        {
            return Err(FenError::OpponentInCheck(waiting));
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

fn parse_long_algebraic(text: &str) -> Option<Move> {
    let from = text.get(0..2)?.parse().ok()?;
    let to = text.get(2..4)?.parse().ok()?;
    let promotion = match text.get(4..)? {
        "" => None,
        "q" => Some(Role::Queen),
        "r" => Some(Role::Rook),
        "b" => Some(Role::Bishop),
        "n" => Some(Role::Knight),
        _ => return None,
    };
    Some(Move::new(from, to, promotion))
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in field.chars() {
        let (color, side) = CastlingRights::from_char(ch).ok_or(FenError::InvalidCastling(ch))?;
        if rights.has(color, side) {
            return Err(FenError::DuplicateCastling(ch));
        }
        rights = rights.with(color, side);
    }
    Ok(rights)
}

fn parse_ep_square(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }

    let square: Square = field.parse()?;
    if !matches!(square.rank(), Rank::Third | Rank::Sixth) {
        return Err(FenError::EnPassantRank(square));
    }
    Ok(Some(square))
}

/// Parses all six fields of FEN and checks the result is a sane position.
///
/// # Examples
/// ```
/// # use chess_movegen::Position;
/// let position: Position = "8/8/8/8/8/8/8/K6k b - - 12 40".parse().unwrap();
/// assert_eq!(position.fullmove_number(), 40);
/// ```
impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_ascii_whitespace().collect();
        let [board, turn, castling, ep, halfmove, fullmove] = fields[..] else {
            log::debug!("rejecting notation with {} fields: '{s}'", fields.len());
            return Err(FenError::FieldCount(fields.len()));
        };

        let mut chars = turn.chars();
        let turn = match (chars.next().and_then(Color::from_char), chars.next()) {
            (Some(color), None) => color,
            _ => return Err(FenError::InvalidColor(turn.to_string())),
        };

        let halfmove_clock = halfmove
            .parse()
            .map_err(|_| FenError::HalfMoveClock(halfmove.to_string()))?;
        let fullmoves = fullmove
            .parse()
            .ok()
            .filter(|&n: &u32| n > 0)
            .ok_or_else(|| FenError::FullMoveNumber(fullmove.to_string()))?;

        let position = Position {
            board: board.parse()?,
            turn,
            castling: parse_castling(castling)?,
            ep_square: parse_ep_square(ep)?,
            halfmove_clock,
            fullmoves,
        };
        position.validate().inspect_err(|err| {
            log::debug!("rejecting notation '{s}': {err}");
        })?;
        Ok(position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.board,
            self.turn.char(),
            self.castling
        )?;
        match self.ep_square {
            Some(square) => write!(f, "{square}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmoves)
    }
}
