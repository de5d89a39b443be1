//! The object a search driver actually owns: an immutable reference to the
//! [`Parameters`] table plus one scratch [`EvalContext`], bundled so a
//! parallel search can give each worker its own without sharing mutable
//! state. Not thread-safe by design — the scratch context is reused
//! across calls rather than reallocated, so one `Evaluator` belongs to
//! one worker.

use crate::board::eval;
use crate::board::parameters::Parameters;
use crate::board::{mating_material, Board, Color, EvalContext};

/// Owns one worker's evaluation scratch space and a reference to the
/// (process-wide, immutable) parameter tables.
pub struct Evaluator<'p> {
    params: &'p Parameters,
    ctx: EvalContext,
    phase: f32,
}

impl<'p> Evaluator<'p> {
    /// Build a fresh evaluator over `params`. Cheap: the scratch context
    /// starts zeroed and nothing is allocated.
    #[must_use]
    pub fn new(params: &'p Parameters) -> Self {
        Evaluator {
            params,
            ctx: EvalContext::default(),
            phase: 0.0,
        }
    }

    /// The parameter tables this evaluator reads from — the tuner's hook
    /// for reading back (and, through its own mutable handle, rewriting)
    /// every tunable slot.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        self.params
    }

    /// Evaluate `position` from the side-to-move's perspective, honoring
    /// the lazy cutoff against `[alpha, beta]`. Pass `(-i32::MAX, i32::MAX)`
    /// for a standalone call with no pruning window.
    pub fn evaluate(&mut self, position: &Board, alpha: i32, beta: i32) -> i32 {
        let (score, phase) = eval::evaluate(position, self.params, &mut self.ctx, alpha, beta);
        self.phase = phase;
        score
    }

    /// The game phase computed by the most recent [`evaluate`](Self::evaluate)
    /// call, in `[0, 1]` (0 = opening/middlegame, 1 = pure king-and-pawn ending).
    /// `0.0` before the first call.
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Whether `color` holds enough material to force mate against a lone
    /// king, ignoring the opponent's own material. A pure bitboard test,
    /// independent of any prior `evaluate()` call.
    #[must_use]
    pub fn mating_material(&self, position: &Board, color: Color) -> bool {
        mating_material(position, color)
    }
}
