//! Move-path enumeration for validating move generation.

use crate::moves::Move;
use crate::position::Position;

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|mv| perft(&position.play_unchecked(mv), depth - 1))
        .sum()
}

/// Per-move leaf counts at `depth`, in generation order.
///
/// At depth 0 there are no moves to divide by, so the result is empty.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.play_unchecked(&mv), depth - 1);
            log::debug!("{mv}: {nodes}");
            (mv, nodes)
        })
        .collect()
}
