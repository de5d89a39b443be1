//! Static position evaluator.
//!
//! `evaluate` is a pure function of a [`Board`], a [`Parameters`] bundle and
//! a scratch [`EvalContext`]: material + lazy cutoff, per-piece-type feature
//! accumulation, then a finalization pass (king safety, hanging, pinned,
//! passers) blended by game phase. Nothing here allocates; every scratch
//! structure is stack-sized and rebuilt, never grown.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::eval_context::EvalContext;
use super::eval_terms;
use super::parameters::Parameters;
use super::state::Board;
use super::types::{Color, Piece};

/// A paired middle-/end-game centipawn score.
///
/// The source this crate's evaluator is modeled on packs both halves into a
/// single `i32` (two sign-extended `i16`s) so accumulation is one machine
/// add; this implementation keeps the halves as two plain `i32` fields
/// instead, which is equivalent for every test in this crate and reads more
/// plainly at call sites that aren't on the hot path of a packed add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalScore {
    mg: i32,
    eg: i32,
}

impl EvalScore {
    pub const ZERO: EvalScore = EvalScore { mg: 0, eg: 0 };

    #[inline]
    #[must_use]
    pub const fn new(mg: i32, eg: i32) -> Self {
        EvalScore { mg, eg }
    }

    #[inline]
    #[must_use]
    pub const fn mg(self) -> i32 {
        self.mg
    }

    #[inline]
    #[must_use]
    pub const fn eg(self) -> i32 {
        self.eg
    }

    /// Scale both halves by an integer count (e.g. `hanging_eval[pawn] * count`).
    #[inline]
    #[must_use]
    pub const fn scale(self, factor: i32) -> Self {
        EvalScore::new(self.mg * factor, self.eg * factor)
    }

    /// Blend by a raw phase numerator in `0..=24` (0 = pure middlegame, 24 =
    /// pure endgame), truncating toward zero.
    #[inline]
    #[must_use]
    pub(crate) const fn blend(self, phase_raw: i32) -> i32 {
        (self.mg * (24 - phase_raw) + self.eg * phase_raw) / 24
    }
}

impl Add for EvalScore {
    type Output = EvalScore;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        EvalScore::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl AddAssign for EvalScore {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.mg += rhs.mg;
        self.eg += rhs.eg;
    }
}

impl Sub for EvalScore {
    type Output = EvalScore;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        EvalScore::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl SubAssign for EvalScore {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.mg -= rhs.mg;
        self.eg -= rhs.eg;
    }
}

impl Neg for EvalScore {
    type Output = EvalScore;
    #[inline]
    fn neg(self) -> Self {
        EvalScore::new(-self.mg, -self.eg)
    }
}

/// Raw phase numerator in `0..=24` (see [`phase_fraction`] for the normalized `[0,1]` value).
#[inline]
#[must_use]
pub(crate) fn phase_raw(board: &Board) -> i32 {
    (24 - board.phase_weight()).clamp(0, 24)
}

/// Phase as a `[0,1]` fraction: 0 = opening/middlegame material, 1 = pure
/// king-and-pawn endgame.
#[inline]
#[must_use]
pub(crate) fn phase_fraction(board: &Board) -> f32 {
    phase_raw(board) as f32 / 24.0
}

/// Whether `color` has enough material to force mate against a lone king,
/// ignoring the opponent's own material entirely. A pure bitboard test.
#[must_use]
pub fn mating_material(board: &Board, color: Color) -> bool {
    if !board.pieces_of(color, Piece::Queen).is_empty()
        || !board.pieces_of(color, Piece::Rook).is_empty()
        || !board.pieces_of(color, Piece::Pawn).is_empty()
    {
        return true;
    }
    let knights = board.pieces_of(color, Piece::Knight).popcount();
    let bishops = board.pieces_of(color, Piece::Bishop).popcount();
    knights + bishops >= 2 && bishops >= 1
}

/// Evaluate `board` from the side-to-move's perspective, honoring the lazy
/// cutoff against `[alpha, beta]`. Returns `(score, phase)`.
pub(crate) fn evaluate(
    board: &Board,
    params: &Parameters,
    ctx: &mut EvalContext,
    alpha: i32,
    beta: i32,
) -> (i32, f32) {
    let phase_raw = phase_raw(board);
    let phase = phase_raw as f32 / 24.0;
    let stm = board.side_to_move();

    let material = board.material();
    let material_resolved = material.blend(phase_raw);
    let stm_material = if stm == Color::White {
        material_resolved
    } else {
        -material_resolved
    };

    if stm_material < alpha - params.lazy_eval_alpha_bound
        || stm_material > beta + params.lazy_eval_beta_bound
    {
        return (stm_material, phase);
    }

    *ctx = EvalContext::build(board);

    let mut total = material;

    for color in Color::BOTH {
        let sign = color.sign();
        total += eval_terms::pawns::pawn_features(board, color, ctx, params).scale(sign);

        let (piece_score, attack_value) =
            eval_terms::pieces::piece_features(board, color, ctx, params);
        total += piece_score.scale(sign);
        ctx.attack_value[color.index()] = attack_value;

        total += eval_terms::rooks::rook_file_features(board, color, ctx, params).scale(sign);
        total += eval_terms::king::king_features(board, color, ctx, params).scale(sign);
        total += eval_terms::pieces::bishop_pair(board, color, params).scale(sign);
        total += eval_terms::passed_pawns::passers(board, color, ctx, params).scale(sign);
    }

    total += eval_terms::hanging::hanging(board, ctx, params);
    total += eval_terms::pinned::pinned(board, params);
    total += king_safety(ctx, params);

    let white_rights = (board.castling_rights() & 0b0011).count_ones() as i32;
    let black_rights = (board.castling_rights() & 0b1100).count_ones() as i32;
    total += params.castling_rights.scale(white_rights - black_rights);

    total += params.side_to_move.scale(stm.sign());

    let resolved = total.blend(phase_raw);
    let damped = apply_no_mating_material_damping(board, resolved);
    let stm_damped = if stm == Color::White { damped } else { -damped };
    (stm_damped, phase)
}

/// `king_safety_table[attack_value_white_on_black]` minus
/// `king_safety_table[attack_value_black_on_white]`.
fn king_safety(ctx: &EvalContext, params: &Parameters) -> EvalScore {
    let white_attack = ctx.attack_value[Color::White.index()].clamp(0, 99) as usize;
    let black_attack = ctx.attack_value[Color::Black.index()].clamp(0, 99) as usize;
    params.king_safety_table[white_attack] - params.king_safety_table[black_attack]
}

/// If the side whose score is positive lacks mating material, divide by 10.
/// `resolved` must be white-relative (undamped, pre-side-to-move-negation):
/// the sign-to-color mapping below only holds before the final negation for
/// black to move.
fn apply_no_mating_material_damping(board: &Board, resolved: i32) -> i32 {
    let leader = if resolved > 0 {
        Color::White
    } else if resolved < 0 {
        Color::Black
    } else {
        return resolved;
    };
    if mating_material(board, leader) {
        resolved
    } else {
        resolved / 10
    }
}
