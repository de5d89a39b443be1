//! King pawn shield and king proximity to enemy pieces.

use crate::board::attack_tables::KING_ATTACKS;
use crate::board::eval::EvalScore;
use crate::board::eval_context::EvalContext;
use crate::board::parameters::Parameters;
use crate::board::state::Board;
use crate::board::types::{Color, Piece};

pub(crate) fn king_features(
    board: &Board,
    color: Color,
    _ctx: &EvalContext,
    params: &Parameters,
) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let enemy = color.opponent();

    let king_bb = board.pieces_of(color, Piece::King).0;
    if king_bb == 0 {
        return score;
    }
    let king_sq = king_bb.trailing_zeros() as usize;
    let zone = KING_ATTACKS[king_sq];

    let own_pawns = board.pieces_of(color, Piece::Pawn).0;
    let enemy_team = board.occupied_by(enemy).0;

    score += params.king_pawn_shield.scale((zone & own_pawns).count_ones() as i32);
    score += params
        .king_close_opponent
        .scale((zone & enemy_team).count_ones() as i32);

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::eval_context::EvalContext;

    fn make_board(fen: &str) -> Board {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn full_pawn_shield_outscores_no_shield() {
        let with_shield = make_board("4k3/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        let no_shield = make_board("4k3/8/8/8/8/8/8/6K1 w - - 0 1");
        let params = Parameters::default();

        let with_ctx = EvalContext::build(&with_shield);
        let no_ctx = EvalContext::build(&no_shield);

        let with_score = king_features(&with_shield, Color::White, &with_ctx, &params);
        let no_score = king_features(&no_shield, Color::White, &no_ctx, &params);
        assert!(with_score.mg() > no_score.mg(), "with={with_score:?} without={no_score:?}");
    }
}
