//! Passed pawns: the base rank bonus plus doubled/blocked/covered-promotion/
//! helper/defended/square-rule/king-span modifiers.

use crate::board::attack_tables::KING_ATTACKS;
use crate::board::eval::EvalScore;
use crate::board::eval_context::EvalContext;
use crate::board::masks::{bishop_square_complex, fill_north, fill_south, relative_rank, PASSED_PAWN_MASK};
use crate::board::parameters::Parameters;
use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, Piece, Square};

use super::pawns::helper_pawn_count;

/// `color`'s own point of view; the caller applies the sign.
pub(crate) fn passers(
    board: &Board,
    color: Color,
    ctx: &EvalContext,
    params: &Parameters,
) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let enemy = color.opponent();

    let own_pawns = board.pieces_of(color, Piece::Pawn).0;
    let enemy_pawns = board.pieces_of(enemy, Piece::Pawn).0;
    let enemy_team = board.occupied_by(enemy).0;
    let own_bishops = board.pieces_of(color, Piece::Bishop).0;
    let own_queens = board.pieces_of(color, Piece::Queen).0;
    let enemy_bishops = board.pieces_of(enemy, Piece::Bishop).0;
    let enemy_queens = board.pieces_of(enemy, Piece::Queen).0;

    let helper_count = helper_pawn_count(own_pawns, color) as i32;
    let enemy_king_sq = board.pieces_of(enemy, Piece::King).0.trailing_zeros() as usize;
    let own_king_zone = KING_ATTACKS[board.pieces_of(color, Piece::King).0.trailing_zeros() as usize];

    let mut bb = own_pawns;
    while bb != 0 {
        let idx = bb.trailing_zeros() as usize;
        bb &= bb - 1;

        if PASSED_PAWN_MASK[color.index()][idx].0 & enemy_pawns != 0 {
            continue;
        }

        let file = idx % 8;
        let rank = idx / 8;
        let r = relative_rank(rank, color);
        let sq_bit = 1u64 << idx;

        let tele = match color {
            Color::White => sq_bit << 8,
            Color::Black => sq_bit >> 8,
        };
        let front_span = match color {
            Color::White => fill_north(tele),
            Color::Black => fill_south(tele),
        };
        let promotion_rank = match color {
            Color::White => Bitboard::RANK_8.0,
            Color::Black => Bitboard::RANK_1.0,
        };
        let prom_bb = Bitboard::file_mask(file).0 & promotion_rank;
        let prom_sq = prom_bb.trailing_zeros() as usize;
        let promo_complex = bishop_square_complex(prom_sq).0;

        score += params.passer_rank[r];

        score += params.pawn_passed_and_doubled.scale((tele & own_pawns).count_ones() as i32);
        score += params
            .pawn_passed_and_blocked
            .scale((tele & enemy_team).count_ones() as i32);

        score += params.pawn_passed_covered_promo.scale(
            (own_bishops & promo_complex).count_ones() as i32 + own_queens.count_ones() as i32
                - (enemy_bishops & promo_complex).count_ones() as i32
                - enemy_queens.count_ones() as i32,
        );

        score += params.pawn_passed_helper.scale(helper_count);

        score += params.pawn_passed_and_defended.scale(
            (sq_bit & ctx.pawn_west_attacks[color.index()].0).count_ones() as i32
                + (sq_bit & ctx.pawn_east_attacks[color.index()].0).count_ones() as i32,
        );

        let own_to_move = color == board.side_to_move();
        let tempo = i32::from(!own_to_move);
        let pawn_distance = 7 - r as i32 + tempo;
        let king_distance =
            Square::from_index(prom_sq).manhattan_distance(Square::from_index(enemy_king_sq));
        if pawn_distance < king_distance {
            score += params.pawn_passed_square_rule;
        }

        if own_king_zone & front_span == front_span {
            score += params.pawn_passed_king_span;
        }
    }

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
    fn unopposed_pawn_is_flagged_passed() {
        // White pawn on e5, nothing ahead of it on d/e/f: passed.
        let board = make_board("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1");
        let e5 = 4 * 8 + 4;
        assert_eq!(PASSED_PAWN_MASK[Color::White.index()][e5].0 & board.pieces_of(Color::Black, Piece::Pawn).0, 0);

        let ctx = EvalContext::build(&board);
        let params = Parameters::default();
        let score = passers(&board, Color::White, &ctx, &params);
        // Rank 4 (0-indexed from White's own perspective, e5 is the 4th rank
        // advanced) contributes at least the base passer_rank bonus.
        assert_ne!(score, EvalScore::ZERO);
    }

    #[test]
    fn a_blocking_enemy_pawn_on_the_same_file_clears_the_flag() {
        // Black pawn on e7 sits in White's e5 pawn's passed-pawn mask.
        let board = make_board("4k3/4p3/8/4P3/8/8/8/4K3 w - - 0 1");
        let e5 = 4 * 8 + 4;
        assert_ne!(
            PASSED_PAWN_MASK[Color::White.index()][e5].0 & board.pieces_of(Color::Black, Piece::Pawn).0,
            0
        );
    }
}
