//! Pieces sitting on a square their own side doesn't cover, per the source
//! this evaluator is modeled on — "hanging" here means undefended by our own
//! attack set, independent of whether the enemy actually attacks it.

use crate::board::eval::EvalScore;
use crate::board::eval_context::EvalContext;
use crate::board::parameters::Parameters;
use crate::board::state::Board;
use crate::board::types::{Color, Piece};

const PIECES: [Piece; 5] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
];

/// White-minus-black total; not re-signed by the caller.
pub(crate) fn hanging(board: &Board, ctx: &EvalContext, params: &Parameters) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let white_not_attacked = !ctx.all_attacks[Color::White.index()].0;
    let black_not_attacked = !ctx.all_attacks[Color::Black.index()].0;

    for (i, &piece) in PIECES.iter().enumerate() {
        let white_count = (board.pieces_of(Color::White, piece).0 & white_not_attacked).count_ones();
        let black_count = (board.pieces_of(Color::Black, piece).0 & black_not_attacked).count_ones();
        score += params.hanging_eval[i].scale(white_count as i32 - black_count as i32);
    }

    score
}
