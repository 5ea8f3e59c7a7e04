use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A board file, `A` through `H`, ordered left to right from White's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Zero-based file index (A = 0).
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a'..='h' => Self::new(ch as u8 - b'a'),
            _ => None,
        }
    }

    /// The file `delta` steps to the right, if it is still on the board.
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Self> {
        u8::try_from(self as i8 + delta).ok().and_then(Self::new)
    }
}

/// A board rank, `First` through `Eighth`, ordered from White's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    /// Zero-based rank index (rank 1 = 0).
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '1'..='8' => Self::new(ch as u8 - b'1'),
            _ => None,
        }
    }

    /// The rank `delta` steps towards rank 8, if it is still on the board.
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Self> {
        u8::try_from(self as i8 + delta).ok().and_then(Self::new)
    }
}

/// Square number outside of `1..=64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square number {0} is outside 1..=64")]
pub struct InvalidSquare(pub u8);

/// A single square of the board, stored as its square number.
///
/// Squares are numbered 1 through 64, file-major within a rank and
/// rank-major overall: a1 = 1, h1 = 8, a2 = 9, ..., h8 = 64. The bitboard
/// bit of a square is `64 - number`, so a1 is the most significant bit and
/// h8 the least significant one. Every other offset in the crate is derived
/// from this numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from its number, failing outside `1..=64`.
    pub const fn new(number: u8) -> Result<Self, InvalidSquare> {
        if number >= 1 && number <= 64 {
            Ok(Square(number))
        } else {
            Err(InvalidSquare(number))
        }
    }

    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Self {
        Square(rank as u8 * 8 + file as u8 + 1)
    }

    /// The square number, 1 through 64.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[((self.0 - 1) % 8) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[((self.0 - 1) / 8) as usize]
    }

    /// The single bit this square occupies in a bitboard.
    #[inline]
    pub(crate) const fn bit(self) -> u64 {
        1u64 << (64 - self.0)
    }

    /// The square reached by stepping `files` right and `ranks` up, if any.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Square> {
        let file = self.file().offset(files)?;
        let rank = self.rank().offset(ranks)?;
        Some(Square::from_coords(file, rank))
    }

    /// All 64 squares in ascending square number order.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=64).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = InvalidSquare;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Square::new(number)
    }
}

macro_rules! square_consts {
    ($($name:ident = $number:literal),* $(,)?) => {
        #[allow(missing_docs)]
        impl Square {
            $(pub const $name: Square = Square($number);)*
        }
    };
}

square_consts! {
    A1 = 1, B1 = 2, C1 = 3, D1 = 4, E1 = 5, F1 = 6, G1 = 7, H1 = 8,
    A2 = 9, B2 = 10, C2 = 11, D2 = 12, E2 = 13, F2 = 14, G2 = 15, H2 = 16,
    A3 = 17, B3 = 18, C3 = 19, D3 = 20, E3 = 21, F3 = 22, G3 = 23, H3 = 24,
    A4 = 25, B4 = 26, C4 = 27, D4 = 28, E4 = 29, F4 = 30, G4 = 31, H4 = 32,
    A5 = 33, B5 = 34, C5 = 35, D5 = 36, E5 = 37, F5 = 38, G5 = 39, H5 = 40,
    A6 = 41, B6 = 42, C6 = 43, D6 = 44, E6 = 45, F6 = 46, G6 = 47, H6 = 48,
    A7 = 49, B7 = 50, C7 = 51, D7 = 52, E7 = 53, F7 = 54, G7 = 55, H7 = 56,
    A8 = 57, B8 = 58, C8 = 59, D8 = 60, E8 = 61, F8 = 62, G8 = 63, H8 = 64,
}

/// Parse algebraic notation like "e4" into a Square.
///
/// # Examples
/// ```
/// # use chess_movegen::Square;
/// let square: Square = "e4".parse().unwrap();
/// assert_eq!(square.number(), 29);
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::WrongLength);
        };

        let file = File::from_char(file).ok_or(SquareParseError::BadFile)?;
        let rank = Rank::from_char(rank).ok_or(SquareParseError::BadRank)?;
        Ok(Square::from_coords(file, rank))
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    #[error("file must be a-h")]
    BadFile,
    #[error("rank must be 1-8")]
    BadRank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_square_creation() {
        assert!(Square::new(1).is_ok());
        assert!(Square::new(64).is_ok());
        assert_eq!(Square::new(0), Err(InvalidSquare(0)));
        assert_eq!(Square::new(65), Err(InvalidSquare(65)));
        assert_eq!(Square::try_from(255), Err(InvalidSquare(255)));
    }

    #[test]
    fn test_square_file_rank() {
        assert_eq!(Square::A1.file(), File::A);
        assert_eq!(Square::A1.rank(), Rank::First);
        assert_eq!(Square::H8.file(), File::H);
        assert_eq!(Square::H8.rank(), Rank::Eighth);
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::Fourth);
    }

    #[test]
    fn test_square_numbering_is_file_major_within_rank() {
        assert_eq!(Square::A1.number(), 1);
        assert_eq!(Square::H1.number(), 8);
        assert_eq!(Square::A2.number(), 9);
        assert_eq!(Square::H8.number(), 64);
        assert_eq!(Square::from_coords(File::C, Rank::Sixth), Square::C6);
    }

    #[test]
    fn test_square_bits() {
        assert_eq!(Square::A1.bit(), 1 << 63);
        assert_eq!(Square::B1.bit(), 1 << 62);
        assert_eq!(Square::H8.bit(), 1);
    }

    #[test_case("a1", Square::A1)]
    #[test_case("h1", Square::H1)]
    #[test_case("a8", Square::A8)]
    #[test_case("h8", Square::H8)]
    #[test_case("e4", Square::E4)]
    fn test_square_from_str(text: &str, expected: Square) {
        assert_eq!(text.parse::<Square>(), Ok(expected));
    }

    #[test_case("", SquareParseError::WrongLength)]
    #[test_case("a", SquareParseError::WrongLength)]
    #[test_case("abc", SquareParseError::WrongLength)]
    #[test_case("a9", SquareParseError::BadRank)]
    #[test_case("a0", SquareParseError::BadRank)]
    #[test_case("i1", SquareParseError::BadFile)]
    #[test_case("E4", SquareParseError::BadFile)]
    fn test_square_from_str_invalid(text: &str, expected: SquareParseError) {
        assert_eq!(text.parse::<Square>(), Err(expected));
    }

    #[test]
    fn test_square_roundtrip() {
        for square in Square::all() {
            let parsed: Square = square.to_string().parse().unwrap();
            assert_eq!(square, parsed);
        }
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Square::E4.offset(1, 2), Some(Square::F6));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H4.offset(1, 0), None);
    }
}
