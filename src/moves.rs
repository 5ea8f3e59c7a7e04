use std::fmt;

use crate::piece::Role;
use crate::square::Square;

/// Descriptive annotation on a generated move.
///
/// Tags only describe a move; they never decide how it is generated or
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveTag {
    Capture = 1 << 0,
    Check = 1 << 1,
    EnPassantCapture = 1 << 2,
    KingSideCastle = 1 << 3,
    QueenSideCastle = 1 << 4,
}

impl MoveTag {
    pub const ALL: [MoveTag; 5] = [
        MoveTag::Capture,
        MoveTag::Check,
        MoveTag::EnPassantCapture,
        MoveTag::KingSideCastle,
        MoveTag::QueenSideCastle,
    ];
}

/// Small set of [`MoveTag`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveTags(u8);

impl MoveTags {
    pub const NONE: MoveTags = MoveTags(0);

    #[inline]
    pub const fn contains(self, tag: MoveTag) -> bool {
        self.0 & tag as u8 != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, tag: MoveTag) -> Self {
        MoveTags(self.0 | tag as u8)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = MoveTag> {
        MoveTag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<MoveTag> for MoveTags {
    fn from_iter<I: IntoIterator<Item = MoveTag>>(iter: I) -> Self {
        iter.into_iter().fold(MoveTags::NONE, MoveTags::with)
    }
}

impl fmt::Debug for MoveTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One transition from a position: origin, destination, optional
/// promotion role and descriptive tags.
///
/// Moves are built by the generator for the position they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Role>,
    tags: MoveTags,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<Role>) -> Self {
        Move {
            from,
            to,
            promotion,
            tags: MoveTags::NONE,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_tags(self, tags: MoveTags) -> Self {
        Move { tags, ..self }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub const fn promotion(&self) -> Option<Role> {
        self.promotion
    }

    #[inline]
    pub const fn tags(&self) -> MoveTags {
        self.tags
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.tags.contains(MoveTag::Capture)
    }

    #[inline]
    pub const fn is_check(&self) -> bool {
        self.tags.contains(MoveTag::Check)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.tags.contains(MoveTag::EnPassantCapture)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.tags.contains(MoveTag::KingSideCastle) || self.tags.contains(MoveTag::QueenSideCastle)
    }

    /// True when `self` and `other` describe the same transition, ignoring tags.
    #[inline]
    pub fn same_transition(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

/// Long algebraic notation: origin, destination and a lowercase promotion
/// letter, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(Square::E2, Square::E4, None).to_string(), "e2e4");
        assert_eq!(
            Move::new(Square::B7, Square::A8, Some(Role::Knight)).to_string(),
            "b7a8n"
        );
    }

    #[test]
    fn test_tags_are_a_set() {
        let tags: MoveTags = [MoveTag::Capture, MoveTag::Check, MoveTag::Capture]
            .into_iter()
            .collect();
        assert!(tags.contains(MoveTag::Capture));
        assert!(tags.contains(MoveTag::Check));
        assert!(!tags.contains(MoveTag::EnPassantCapture));
        assert_eq!(tags.iter().count(), 2);
    }

    #[test]
    fn test_same_transition_ignores_tags() {
        let plain = Move::new(Square::E1, Square::G1, None);
        let tagged = plain.with_tags(MoveTags::NONE.with(MoveTag::KingSideCastle));
        assert!(plain.same_transition(&tagged));
        assert_ne!(plain, tagged);
        assert!(tagged.is_castle());
    }
}
