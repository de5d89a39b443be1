//! Pawn-structure features, pawn attacks on enemy pieces, and minor pieces
//! tucked in directly behind a pawn.

use crate::board::eval::EvalScore;
use crate::board::eval_context::EvalContext;
use crate::board::masks::{fill_north, fill_south, ADJACENT_FILES};
use crate::board::parameters::Parameters;
use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, Piece};

/// Union of the diagonal squares a pawn's attack could ever land on as the
/// whole group advances straight ahead, filled toward the back rank instead
/// of the front — used to find backward pawns (see `PAWN_BACKWARD` below).
fn attack_front_spans(east: u64, west: u64, color: Color) -> u64 {
    match color {
        Color::White => fill_north(east | west),
        Color::Black => fill_south(east | west),
    }
}

/// Same diagonal attack pattern, filled toward the *rear* instead: finds a
/// pawn one file over and one rank back that could eventually defend this one.
fn attack_rear_spans(pawns: u64, color: Color) -> u64 {
    match color {
        Color::White => {
            let east = (pawns << 9) & !Bitboard::FILE_A.0;
            let west = (pawns << 7) & !Bitboard::FILE_H.0;
            fill_south(east | west)
        }
        Color::Black => {
            let east = (pawns >> 7) & !Bitboard::FILE_A.0;
            let west = (pawns >> 9) & !Bitboard::FILE_H.0;
            fill_north(east | west)
        }
    }
}

/// Doubled/isolated/backward/open/blocked pawns, pawn attacks landing on
/// enemy minors/rooks/queens, and minor pieces tucked in directly behind a
/// pawn of either color. Returned from `color`'s own point of view.
pub(crate) fn pawn_features(
    board: &Board,
    color: Color,
    ctx: &EvalContext,
    params: &Parameters,
) -> EvalScore {
    let mut score = EvalScore::ZERO;
    let enemy = color.opponent();

    let own_pawns = board.pieces_of(color, Piece::Pawn).0;
    let enemy_pawns = board.pieces_of(enemy, Piece::Pawn).0;

    let own_east = ctx.pawn_east_attacks[color.index()].0;
    let own_west = ctx.pawn_west_attacks[color.index()].0;
    let enemy_east = ctx.pawn_east_attacks[enemy.index()].0;
    let enemy_west = ctx.pawn_west_attacks[enemy.index()].0;
    let enemy_attacks = enemy_east | enemy_west;

    let (doubled_without_first, doubled_fill, blocked, open, backward) = match color {
        Color::White => {
            let doubled_without_first = fill_north(own_pawns << 8) & own_pawns;
            let doubled_fill = fill_south(doubled_without_first);
            let blocked = (own_pawns << 8) & board.all_occupied.0;
            let open = own_pawns & !fill_south(enemy_pawns);
            let front_spans = attack_front_spans(own_east, own_west, color);
            let backward = fill_south(!front_spans & enemy_attacks) & own_pawns;
            (doubled_without_first, doubled_fill, blocked, open, backward)
        }
        Color::Black => {
            let doubled_without_first = fill_south(own_pawns >> 8) & own_pawns;
            let doubled_fill = fill_north(doubled_without_first);
            let blocked = (own_pawns >> 8) & board.all_occupied.0;
            let open = own_pawns & !fill_north(enemy_pawns);
            let front_spans = attack_front_spans(own_east, own_west, color);
            let backward = fill_north(!front_spans & enemy_attacks) & own_pawns;
            (doubled_without_first, doubled_fill, blocked, open, backward)
        }
    };
    let doubled = doubled_without_first | (doubled_fill & own_pawns);

    let mut isolated = 0u64;
    let mut bb = own_pawns;
    while bb != 0 {
        let idx = bb.trailing_zeros() as usize;
        bb &= bb - 1;
        let file = idx % 8;
        if ADJACENT_FILES[file].0 & own_pawns == 0 {
            isolated |= 1u64 << idx;
        }
    }

    score += params
        .pawn_doubled_and_isolated
        .scale((isolated & doubled).count_ones() as i32);
    score += params.pawn_doubled.scale((!isolated & doubled).count_ones() as i32);
    score += params.pawn_isolated.scale((isolated & !doubled).count_ones() as i32);

    score += params.pawn_open.scale(open.count_ones() as i32);
    score += params.pawn_backward.scale(backward.count_ones() as i32);
    score += params.pawn_blocked.scale(blocked.count_ones() as i32);

    // Summed separately (not unioned) so a square covered from both diagonals counts twice.
    score += params
        .pawn_structure
        .scale(((own_east & own_pawns).count_ones() + (own_west & own_pawns).count_ones()) as i32);

    let enemy_minors = board.pieces_of(enemy, Piece::Knight).0 | board.pieces_of(enemy, Piece::Bishop).0;
    let enemy_rooks = board.pieces_of(enemy, Piece::Rook).0;
    let enemy_queens = board.pieces_of(enemy, Piece::Queen).0;
    let own_attacks = own_east | own_west;

    score += params
        .pawn_attack_minor
        .scale((own_attacks & enemy_minors).count_ones() as i32);
    score += params
        .pawn_attack_rook
        .scale((own_attacks & enemy_rooks).count_ones() as i32);
    score += params
        .pawn_attack_queen
        .scale((own_attacks & enemy_queens).count_ones() as i32);

    let own_minors = board.pieces_of(color, Piece::Knight).0 | board.pieces_of(color, Piece::Bishop).0;
    let all_pawns = own_pawns | enemy_pawns;
    let behind = match color {
        Color::White => own_minors << 8,
        Color::Black => own_minors >> 8,
    };
    score += params.minor_behind_pawn.scale((behind & all_pawns).count_ones() as i32);

    score
}

/// Count of our own pawns sitting where another own pawn's advancing diagonal
/// attack could eventually defend them — used by the passed-pawn "helper" term.
pub(crate) fn helper_pawn_count(own_pawns: u64, color: Color) -> u32 {
    (own_pawns & attack_rear_spans(own_pawns, color)).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::eval_context::EvalContext;

    fn make_board(fen: &str) -> Board {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn doubled_pawns_on_one_file_score_worse_than_spread_pawns() {
        let doubled = make_board("4k3/8/8/8/4P3/8/4P3/4K3 w - - 0 1");
        let spread = make_board("4k3/8/8/8/4P3/8/3P4/4K3 w - - 0 1");
        let params = Parameters::default();

        let doubled_ctx = EvalContext::build(&doubled);
        let spread_ctx = EvalContext::build(&spread);

        let doubled_score = pawn_features(&doubled, Color::White, &doubled_ctx, &params);
        let spread_score = pawn_features(&spread, Color::White, &spread_ctx, &params);
        assert!(
            doubled_score.mg() < spread_score.mg(),
            "doubled={doubled_score:?} spread={spread_score:?}"
        );
    }

    #[test]
    fn isolated_pawn_has_no_adjacent_file_support() {
        // A lone e-pawn with no pawn on the d- or f-file is isolated.
        let board = make_board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let params = Parameters::default();
        let ctx = EvalContext::build(&board);
        let score = pawn_features(&board, Color::White, &ctx, &params);
        assert_eq!(score.mg(), params.pawn_isolated.mg() + params.pawn_open.mg());
    }
}
