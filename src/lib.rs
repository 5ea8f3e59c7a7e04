//! Legal chess move generation on 64-bit bitboards.
//!
//! Positions are parsed from FEN, queried for their legal moves, and
//! advanced by playing a move, which yields a new [`Position`]:
//!
//! ```
//! use chess_movegen::Position;
//!
//! let start = Position::starting();
//! let mv = start.parse_move("e2e4").unwrap();
//! let next = start.play(&mv).unwrap();
//!
//! assert_eq!(start.legal_moves().len(), 20);
//! assert_eq!(
//!     next.to_string(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod castling;
pub mod error;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling::{CastlingRights, CastlingSide};
pub use error::{FenError, MoveParseError};
pub use moves::{Move, MoveTag, MoveTags};
pub use perft::{perft, perft_divide};
pub use piece::{Color, Piece, Role};
pub use position::{Position, STARTING_FEN};
pub use square::{File, InvalidSquare, Rank, Square, SquareParseError};
