//! Legal move generation.
//!
//! Generation is pseudo-legal first, then every candidate is played on a
//! successor [`Position`] value and dropped if it leaves the mover's king
//! attacked. The original position is never touched.

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castling::CastlingSide;
use crate::moves::{Move, MoveTag, MoveTags};
use crate::piece::{Color, Piece, Role};
use crate::position::Position;
use crate::square::{File, Rank, Square};

/// Whether any piece of color `by` attacks `square` on `board`.
///
/// Each role's attack pattern is computed from `square` outwards and
/// intersected with that role's pieces: a piece on X attacks `square` exactly
/// when the same piece on `square` would reach X.
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    let occupied = board.occupied();
    let attackers = |role: Role| board.by_piece(role.of(by));

    (attacks::queen_attacks(square, occupied) & attackers(Role::Queen)).any()
        || (attacks::rook_attacks(square, occupied) & attackers(Role::Rook)).any()
        || (attacks::bishop_attacks(square, occupied) & attackers(Role::Bishop)).any()
        || (attacks::knight_attacks(square) & attackers(Role::Knight)).any()
        || (attacks::pawn_attacks(!by, square) & attackers(Role::Pawn)).any()
        || (attacks::king_attacks(square) & attackers(Role::King)).any()
}

/// Whether the side to move is in check.
pub fn in_check(position: &Position) -> bool {
    let turn = position.turn();
    position
        .board()
        .king_of(turn)
        .is_some_and(|king| is_attacked(position.board(), king, !turn))
}

/// All legal moves for the side to move.
///
/// Order is fixed: by role (king first, pawns last), then ascending origin
/// square, then ascending destination, then promotion role
/// (queen, rook, bishop, knight).
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let turn = position.turn();
    let mut moves = Vec::with_capacity(48);

    for role in Role::ALL {
        let piece = role.of(turn);
        for origin in position.board().by_piece(piece) {
            for to in destinations(position, piece, origin) {
                if role == Role::Pawn && to.rank() == turn.promotion_rank() {
                    for promotion in Role::PROMOTIONS {
                        push_if_legal(position, Move::new(origin, to, Some(promotion)), &mut moves);
                    }
                } else {
                    push_if_legal(position, Move::new(origin, to, None), &mut moves);
                }
            }
        }
    }

    log::trace!("{} legal moves in {position}", moves.len());
    moves
}

fn push_if_legal(position: &Position, mv: Move, moves: &mut Vec<Move>) {
    let turn = position.turn();
    let after = position.play_unchecked(&mv);
    let king = after
        .board()
        .king_of(turn)
        .expect("mover's king survives its own move");

    if is_attacked(after.board(), king, !turn) {
        log::trace!("{mv} leaves the {turn} king attacked");
        return;
    }

    moves.push(mv.with_tags(tags(position, &mv, &after)));
}

/// Pseudo-legal destinations for `piece` standing on `origin`.
pub fn destinations(position: &Position, piece: Piece, origin: Square) -> Bitboard {
    let board = position.board();
    let occupied = board.occupied();
    let own = board.by_color(piece.color);

    let reach = match piece.role {
        Role::King => attacks::king_attacks(origin) | castling_destinations(position, origin),
        Role::Queen => attacks::queen_attacks(origin, occupied),
        Role::Rook => attacks::rook_attacks(origin, occupied),
        Role::Bishop => attacks::bishop_attacks(origin, occupied),
        Role::Knight => attacks::knight_attacks(origin),
        Role::Pawn => pawn_destinations(position, piece.color, origin),
    };
    reach & !own
}

fn pawn_destinations(position: &Position, color: Color, origin: Square) -> Bitboard {
    let board = position.board();
    let empty = !board.occupied();
    let forward = color.forward();
    let mut dests = Bitboard::EMPTY;

    if let Some(single) = origin.offset(0, forward)
        && empty.contains(single)
    {
        dests = dests.with(single);
        if origin.rank() == color.pawn_rank()
            && let Some(double) = single.offset(0, forward)
            && empty.contains(double)
        {
            dests = dests.with(double);
        }
    }

    let mut targets = board.by_color(!color);
    if let Some(ep) = en_passant_target(position) {
        targets = targets.with(ep);
    }
    dests | (attacks::pawn_attacks(color, origin) & targets)
}

/// The en passant square, if the side to move can actually capture onto it:
/// it lies on the mover's sixth rank with an enemy pawn just behind it.
fn en_passant_target(position: &Position) -> Option<Square> {
    let turn = position.turn();
    let ep = position.ep_square()?;
    let sixth = match turn {
        Color::White => Rank::Sixth,
        Color::Black => Rank::Third,
    };
    let victim = ep.offset(0, -turn.forward())?;
    (ep.rank() == sixth
        && position
            .board()
            .by_piece(Role::Pawn.of(!turn))
            .contains(victim))
    .then_some(ep)
}

fn castling_destinations(position: &Position, origin: Square) -> Bitboard {
    let turn = position.turn();
    let board = position.board();
    let occupied = board.occupied();

    if origin != CastlingSide::king_square(turn) {
        return Bitboard::EMPTY;
    }

    CastlingSide::ALL
        .into_iter()
        .filter(|&side| {
            position.castling_rights().has(turn, side)
                && board
                    .by_piece(Role::Rook.of(turn))
                    .contains(side.rook_square(turn))
                && side.between(turn).all(|square| !occupied.contains(square))
                && side
                    .king_path(turn)
                    .into_iter()
                    .all(|square| !is_attacked(board, square, !turn))
        })
        .map(|side| side.king_target(turn))
        .collect()
}

/// Describes `mv` by comparing the position before and after it.
fn tags(before: &Position, mv: &Move, after: &Position) -> MoveTags {
    let mover = before
        .board()
        .piece_at(mv.from())
        .expect("generated move starts on a piece");
    let mut tags = MoveTags::NONE;

    let en_passant = mover.role == Role::Pawn
        && mv.from().file() != mv.to().file()
        && before.board().piece_at(mv.to()).is_none();
    if en_passant {
        tags = tags.with(MoveTag::EnPassantCapture);
    }
    if en_passant || before.board().piece_at(mv.to()).is_some() {
        tags = tags.with(MoveTag::Capture);
    }

    if mover.role == Role::King && file_distance(mv.from(), mv.to()) == 2 {
        tags = tags.with(if mv.to().file() == File::G {
            MoveTag::KingSideCastle
        } else {
            MoveTag::QueenSideCastle
        });
    }

    if in_check(after) {
        tags = tags.with(MoveTag::Check);
    }
    tags
}

#[inline]
pub(crate) fn file_distance(a: Square, b: Square) -> u8 {
    a.file().index().abs_diff(b.file().index())
}

#[inline]
pub(crate) fn rank_distance(a: Square, b: Square) -> u8 {
    a.rank().index().abs_diff(b.rank().index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn position(fen: &str) -> Position {
        fen.parse().expect("test FEN is valid")
    }

    fn moves_text(position: &Position) -> Vec<String> {
        legal_moves(position).iter().map(Move::to_string).collect()
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let moves = legal_moves(&Position::starting());
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|mv| mv.from().rank() == Rank::Second)
            .count();
        assert_eq!(pawn_moves, 16);
        assert!(moves.iter().all(|mv| mv.tags().is_empty()));
    }

    #[test]
    fn test_generation_order_is_stable() {
        let moves = moves_text(&Position::starting());
        assert_eq!(&moves[..4], ["b1a3", "b1c3", "g1f3", "g1h3"]);
        assert_eq!(&moves[4..8], ["a2a3", "a2a4", "b2b3", "b2b4"]);
        assert_eq!(moves, moves_text(&Position::starting()));
    }

    #[test_case("4k3/8/8/8/8/8/8/R3K3 b - - 0 1", Square::A8, true; "rook on the back rank")]
    #[test_case("4k3/8/8/8/8/8/8/R3K3 b - - 0 1", Square::B7, false; "rook does not reach diagonally")]
    #[test_case("4k3/8/8/8/8/2B5/8/4K3 b - - 0 1", Square::G7, true; "bishop diagonal")]
    #[test_case("4k3/8/8/8/3P4/2B5/8/4K3 b - - 0 1", Square::F6, false; "bishop blocked by own pawn")]
    #[test_case("4k3/8/8/8/8/8/8/4K1N1 b - - 0 1", Square::F3, true; "knight jump")]
    #[test_case("4k3/8/8/8/8/8/3P4/4K3 b - - 0 1", Square::E3, true; "pawn captures forward diagonal")]
    #[test_case("4k3/8/8/8/8/8/3P4/4K3 b - - 0 1", Square::D3, false; "pawn push is not an attack")]
    #[test_case("4k3/8/8/8/8/8/8/4K3 b - - 0 1", Square::F2, true; "king neighbourhood")]
    fn test_is_attacked_by_white(fen: &str, square: Square, expected: bool) {
        let position = position(fen);
        assert_eq!(is_attacked(position.board(), square, Color::White), expected);
    }

    #[test_case("4k3/8/8/8/8/8/8/4K2q w - - 0 1"; "queen on rank")]
    #[test_case("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1"; "rook on file")]
    #[test_case("4k3/8/8/8/1b6/8/8/4K3 w - - 0 1"; "bishop on diagonal")]
    #[test_case("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1"; "knight")]
    #[test_case("4k3/8/8/8/8/8/5p2/4K3 w - - 0 1"; "pawn")]
    fn test_in_check_agrees_with_king_attacked(fen: &str) {
        let position = position(fen);
        let king = position.board().king_of(Color::White).unwrap();
        assert!(in_check(&position));
        assert_eq!(in_check(&position), is_attacked(position.board(), king, Color::Black));
    }

    #[test]
    fn test_not_in_check_behind_blocker() {
        let position = position("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
        assert!(!in_check(&position));
    }

    #[test]
    fn test_slider_destinations_exclude_own_blockers() {
        // Rook d4, own pawn d6, enemy knight b4.
        let position = position("4k3/8/3P4/8/1n1R4/8/8/4K3 w - - 0 1");
        let dests = destinations(&position, Role::Rook.of(Color::White), Square::D4);

        assert!(dests.contains(Square::D5));
        assert!(!dests.contains(Square::D6));
        assert!(dests.contains(Square::C4));
        assert!(dests.contains(Square::B4));
        assert!(!dests.contains(Square::A4));
        assert_eq!(dests.count(), 1 + 2 + 3 + 4);
    }

    #[test]
    fn test_promotion_expands_to_four_moves() {
        let position = position("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let promotions: Vec<Move> = legal_moves(&position)
            .into_iter()
            .filter(|mv| mv.from() == Square::B7)
            .collect();

        assert_eq!(promotions.len(), 4);
        assert!(promotions.iter().all(|mv| mv.to() == Square::B8));
        assert_eq!(
            promotions.iter().map(|mv| mv.promotion()).collect::<Vec<_>>(),
            vec![
                Some(Role::Queen),
                Some(Role::Rook),
                Some(Role::Bishop),
                Some(Role::Knight)
            ]
        );
    }

    #[test]
    fn test_blocked_promotion_has_no_moves() {
        let position = position("1n2k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        assert!(
            legal_moves(&position)
                .iter()
                .all(|mv| mv.from() != Square::B7 || mv.to() != Square::B8)
        );
    }

    #[test]
    fn test_pawn_double_push_needs_both_squares_empty() {
        let blocked = position("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        let moves = moves_text(&blocked);
        assert!(!moves.contains(&"e2e3".to_string()));
        assert!(!moves.contains(&"e2e4".to_string()));

        let far_blocked = position("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        let moves = moves_text(&far_blocked);
        assert!(moves.contains(&"e2e3".to_string()));
        assert!(!moves.contains(&"e2e4".to_string()));
    }

    #[test]
    fn test_pawn_captures_do_not_wrap_files() {
        let position = position("4k3/8/8/8/8/1p5p/P7/4K3 w - - 0 1");
        let moves = moves_text(&position);
        assert!(moves.contains(&"a2b3".to_string()));
        assert!(!moves.iter().any(|mv| mv == "a2h3"));
    }

    #[test]
    fn test_en_passant_capture_is_generated_and_tagged() {
        let position = position("rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        let mv = legal_moves(&position)
            .into_iter()
            .find(|mv| mv.from() == Square::E5 && mv.to() == Square::D6)
            .expect("en passant available");

        assert!(mv.is_en_passant());
        assert!(mv.is_capture());
    }

    #[test]
    fn test_en_passant_rejected_when_it_exposes_king() {
        // Capturing exd6 would clear the fifth rank between rook and king.
        let position = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!moves_text(&position).contains(&"e5d6".to_string()));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        let position = position("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(
            legal_moves(&position)
                .iter()
                .all(|mv| mv.from() != Square::E2)
        );
    }

    #[test]
    fn test_castling_both_sides() {
        let position = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = legal_moves(&position);

        let king_side = moves
            .iter()
            .find(|mv| mv.from() == Square::E1 && mv.to() == Square::G1)
            .expect("king side castle");
        assert!(king_side.tags().contains(MoveTag::KingSideCastle));

        let queen_side = moves
            .iter()
            .find(|mv| mv.from() == Square::E1 && mv.to() == Square::C1)
            .expect("queen side castle");
        assert!(queen_side.tags().contains(MoveTag::QueenSideCastle));
    }

    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", "e1g1"; "right missing")]
    #[test_case("r3k2r/8/8/8/8/8/8/R3KN1R w KQkq - 0 1", "e1g1"; "path occupied")]
    #[test_case("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", "e1c1"; "b-file occupied")]
    #[test_case("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1", "e1g1"; "passes attacked square")]
    #[test_case("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1", "e1c1"; "king in check")]
    #[test_case("r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1", "e1g1"; "lands on attacked square")]
    fn test_castling_forbidden(fen: &str, castle: &str) {
        assert!(!moves_text(&position(fen)).contains(&castle.to_string()));
    }

    #[test]
    fn test_queen_side_castle_allows_attacked_b_file() {
        // Only b1 is attacked; the king never crosses it.
        let position = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves_text(&position).contains(&"e1c1".to_string()));
    }

    #[test]
    fn test_check_tag() {
        let position = position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let mv = legal_moves(&position)
            .into_iter()
            .find(|mv| mv.to_string() == "a1a8")
            .unwrap();
        assert!(mv.is_check());
        assert!(!mv.is_capture());
    }

    #[test]
    fn test_capture_tag() {
        let position = position("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        let moves = legal_moves(&position);
        let capture = moves.iter().find(|mv| mv.to() == Square::D5).unwrap();
        let push = moves.iter().find(|mv| mv.to() == Square::E5).unwrap();
        assert!(capture.is_capture());
        assert!(!push.is_capture());
    }

    #[test]
    fn test_distances() {
        assert_eq!(file_distance(Square::E1, Square::C1), 2);
        assert_eq!(rank_distance(Square::E2, Square::E4), 2);
        assert_eq!(rank_distance(Square::E7, Square::E5), 2);
    }
}
