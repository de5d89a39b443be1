//! Rook file placement: open files, half-open files, and a rook sharing a
//! file/rank with the enemy king.

use crate::board::attack_tables::slider_attacks;
use crate::board::eval::EvalScore;
use crate::board::eval_context::EvalContext;
use crate::board::parameters::Parameters;
use crate::board::state::Board;
use crate::board::types::{Color, Piece};

pub(crate) fn rook_file_features(
    board: &Board,
    color: Color,
    ctx: &EvalContext,
    params: &Parameters,
) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let enemy = color.opponent();

    let own_rooks = board.pieces_of(color, Piece::Rook).0;
    let open_files = ctx.semi_open[color.index()].0 & ctx.semi_open[enemy.index()].0;

    score += params.rook_open_file.scale((open_files & own_rooks).count_ones() as i32);
    score += params.rook_half_open_file.scale(
        (ctx.semi_open[color.index()].0 & !open_files & own_rooks).count_ones() as i32,
    );

    let enemy_king_sq = board.pieces_of(enemy, Piece::King).0.trailing_zeros() as usize;
    let rook_attacks_from_king = slider_attacks(enemy_king_sq, board.all_occupied.0, false);
    score += params
        .rook_king_line
        .scale((rook_attacks_from_king & own_rooks).count_ones() as i32);

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
    fn fully_open_file_outscores_half_open_file() {
        let open = make_board("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let half_open = make_board("4k3/p7/8/8/8/8/P7/R3K3 w Q - 0 1");
        let params = Parameters::default();

        let open_ctx = EvalContext::build(&open);
        let half_open_ctx = EvalContext::build(&half_open);

        let open_score = rook_file_features(&open, Color::White, &open_ctx, &params);
        let half_open_score = rook_file_features(&half_open, Color::White, &half_open_ctx, &params);

        let diff = open_score - half_open_score;
        assert_eq!(diff, params.rook_open_file - params.rook_half_open_file);
    }
}
