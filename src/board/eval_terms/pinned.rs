//! Pins against each king: pieces of ours that sit on the only square between
//! our king and an enemy slider.

use crate::board::attack_tables::slider_attacks;
use crate::board::eval::EvalScore;
use crate::board::masks::IN_BETWEEN;
use crate::board::parameters::{pinned_index, Parameters};
use crate::board::state::Board;
use crate::board::types::{Color, Piece};

fn pinned_for(board: &Board, us: Color, params: &Parameters) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let them = us.opponent();

    let king_bb = board.pieces_of(us, Piece::King).0;
    if king_bb == 0 {
        return score;
    }
    let king_sq = king_bb.trailing_zeros() as usize;

    let our_occ = board.occupied_by(us).0;
    let their_occ = board.occupied_by(them).0;

    let bishops = board.pieces_of(them, Piece::Bishop).0;
    let rooks = board.pieces_of(them, Piece::Rook).0;
    let queens = board.pieces_of(them, Piece::Queen).0;

    // Rays from our king through our own pieces, blocked only by enemy pieces:
    // this finds sliders that would attack the king if our blockers moved.
    let rook_attacks = slider_attacks(king_sq, their_occ, false) & (rooks | queens);
    let bishop_attacks = slider_attacks(king_sq, their_occ, true) & (bishops | queens);
    let mut potential_pinners = rook_attacks | bishop_attacks;

    while potential_pinners != 0 {
        let pinner_sq = potential_pinners.trailing_zeros() as usize;
        potential_pinners &= potential_pinners - 1;

        let in_between = IN_BETWEEN[king_sq][pinner_sq].0;
        let potential_pinned = our_occ & in_between;
        if potential_pinned == 0 || !potential_pinned.is_power_of_two() {
            continue;
        }

        let pinned_sq = crate::board::types::Square::from_index(potential_pinned.trailing_zeros() as usize);
        let pinner_sq_typed = crate::board::types::Square::from_index(pinner_sq);

        let Some((_, pinned_piece)) = board.piece_at(pinned_sq) else {
            continue;
        };
        let Some((_, pinner_piece)) = board.piece_at(pinner_sq_typed) else {
            continue;
        };

        let pinner_kind = match pinner_piece {
            Piece::Bishop => 0,
            Piece::Rook => 1,
            Piece::Queen => 2,
            _ => continue,
        };

        score += params.pinned_eval[pinned_index(pinned_piece.index(), pinner_kind)];
    }

    score
}

/// `computePinnedPieces<White>() - computePinnedPieces<Black>()`: a
/// white-minus-black total, not re-signed by the caller.
pub(crate) fn pinned(board: &Board, params: &Parameters) -> EvalScore {
    pinned_for(board, Color::White, params) - pinned_for(board, Color::Black, params)
}
