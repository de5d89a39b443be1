//! Time-management controller bounding how long a search may run before
//! consulting the evaluator.
//!
//! Mirrors the feedback loop an iterative-deepening driver runs: wall-clock
//! deadlines (depth/node/move-time/match-time) plus two adaptive factors —
//! `eval_factor` (score stability) and `move_factor` (best-move stability)
//! — that let the time budgeted for the match stretch when the position is
//! unsettled and shrink once the search has converged on one move.
//!
//! Configuration (`set_*`) is single-writer: the search thread calls it
//! before launching workers. `force_stop` is the one field any thread may
//! write, via [`StopFlag`]; every other probe only reads.

use std::time::Instant;

use crate::board::Move;
use crate::sync::StopFlag;

/// Lifecycle the manager conceptually passes through. The public API only
/// ever constructs a manager already [`Running`](TimeManagerState::Running);
/// `Idle` exists for symmetry with a driver that pools managers across games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeManagerState {
    Idle,
    Running,
    Stopped,
}

/// Mutated by [`TimeManager::is_time_left`] as a side channel back to the
/// caller's per-iteration bookkeeping, matching the source's `SearchData`
/// coupling (see the time-manager design note for why a cleaner
/// architecture would return this instead of mutating it in place).
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchData {
    pub target_reached: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct DepthLimit {
    depth: u32,
    enabled: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeLimit {
    nodes: u64,
    enabled: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct MoveTimeLimit {
    upper_bound_ms: u64,
    enabled: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct MatchTimeLimit {
    target_ms: u64,
    enabled: bool,
}

/// Per-search time budget and iterative-deepening feedback controller.
pub struct TimeManager {
    start_time: Instant,
    depth_limit: DepthLimit,
    node_limit: NodeLimit,
    move_time_limit: MoveTimeLimit,
    match_time_limit: MatchTimeLimit,

    last_eval: i32,
    prev_move: Move,
    same_move_depth: i32,
    eval_factor: f64,
    move_factor: f64,

    force_stop: StopFlag,
}

impl TimeManager {
    /// Start a new manager with the clock running and no limits installed.
    #[must_use]
    pub fn new() -> Self {
        TimeManager {
            start_time: Instant::now(),
            depth_limit: DepthLimit::default(),
            node_limit: NodeLimit::default(),
            move_time_limit: MoveTimeLimit::default(),
            match_time_limit: MatchTimeLimit::default(),
            last_eval: 0,
            prev_move: Move::null(),
            same_move_depth: 0,
            eval_factor: 1.0,
            move_factor: 1.0,
            force_stop: StopFlag::new(),
        }
    }

    /// Current lifecycle state: `Stopped` once [`stop_search`](Self::stop_search)
    /// has been called (by any clone of the underlying flag), `Running` otherwise.
    #[must_use]
    pub fn state(&self) -> TimeManagerState {
        if self.force_stop.is_stopped() {
            TimeManagerState::Stopped
        } else {
            TimeManagerState::Running
        }
    }

    /// A clone of the cross-thread stop signal, for handing to worker threads.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.force_stop.clone()
    }

    pub fn set_depth_limit(&mut self, depth: u32) {
        self.depth_limit = DepthLimit { depth, enabled: true };
    }

    pub fn set_node_limit(&mut self, nodes: u64) {
        self.node_limit = NodeLimit { nodes, enabled: true };
    }

    pub fn set_move_time_limit(&mut self, move_time_ms: u64) {
        self.move_time_limit = MoveTimeLimit {
            upper_bound_ms: move_time_ms,
            enabled: true,
        };
    }

    /// Derive a move-time upper bound and a match-time target from the
    /// remaining clock, per Koivisto's `setMatchTimeLimit`: the upper bound
    /// gives a hard ceiling generous enough to survive one unstable
    /// iteration, the target is the time `root_time_left` scales down from
    /// as the position settles.
    pub fn set_match_time_limit(&mut self, remaining_ms: u64, increment_ms: u64, moves_to_go: u32) {
        let division = moves_to_go as f64 + 1.0;
        let remaining = remaining_ms as f64;
        let inc = increment_ms as f64;

        let upper_bound = (remaining / division).trunc() * 3.0
            + (remaining * 0.9 + inc).min(inc * 3.0)
            - 25.0;
        let target = remaining_ms / 40;

        let ceiling = remaining_ms.saturating_sub(increment_ms);
        let upper_bound = (upper_bound.max(0.0) as u64).min(ceiling);
        let target = target.min(ceiling);

        self.set_move_time_limit(upper_bound);
        self.match_time_limit = MatchTimeLimit {
            target_ms: target,
            enabled: true,
        };
    }

    /// Feedback from the search after each completed iterative-deepening
    /// iteration. Depths below 6 are a warm-up: too little signal yet to
    /// adjust the stability factors, so only the running best move/eval
    /// are recorded.
    pub fn update(&mut self, depth: u32, eval: i32, best_move: Move) {
        if depth < 6 {
            self.last_eval = eval;
            self.prev_move = best_move;
            return;
        }

        if best_move == self.prev_move {
            self.same_move_depth += 1;
        } else {
            self.same_move_depth = 0;
        }
        self.move_factor = 1.05f64.powi(9 - self.same_move_depth).max(0.4);

        let diff = ((eval - self.last_eval).unsigned_abs() as f64 / 25.0).min(1.0);
        self.eval_factor *= 1.05f64.powf(diff);

        self.prev_move = best_move;
        self.last_eval = eval;
    }

    /// Signal every probe (on this and every cloned [`StopFlag`]) to return "no time".
    pub fn stop_search(&self) {
        self.force_stop.stop();
    }

    /// Milliseconds elapsed since construction, on a monotonic clock.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Inner-loop gate, polled at leaf boundaries. `search_data`, if given,
    /// has its `target_reached` bit updated whenever a match-time target is
    /// installed — a caller-owned side channel rather than a return value,
    /// faithfully carried over from the source this is modeled on.
    #[must_use]
    pub fn is_time_left(&self, search_data: Option<&mut SearchData>) -> bool {
        if self.force_stop.is_stopped() {
            return false;
        }

        let elapsed = self.elapsed_ms();

        if let Some(sd) = search_data {
            if self.match_time_limit.enabled {
                sd.target_reached = elapsed >= self.match_time_limit.target_ms;
            }
        }

        if self.move_time_limit.enabled && self.move_time_limit.upper_bound_ms < elapsed {
            return false;
        }

        true
    }

    /// Outer-loop gate, polled only between iterations. `score_hint` is
    /// accepted but unused: the source's comment describes scaling the
    /// remaining budget by how much of the search stayed on the best move,
    /// but the function it documents never reads its `score` parameter.
    /// Reproduced as-is rather than silently implementing the described
    /// (and never-shipped) behavior.
    #[must_use]
    pub fn root_time_left(&self, score_hint: i32) -> bool {
        let _ = score_hint;

        if self.force_stop.is_stopped() {
            return false;
        }

        let elapsed = self.elapsed_ms();

        if self.move_time_limit.enabled && self.move_time_limit.upper_bound_ms < elapsed {
            return false;
        }

        if self.match_time_limit.enabled {
            let scaled =
                (self.match_time_limit.target_ms as f64 * self.eval_factor * self.move_factor * 0.8) as u64;
            if scaled < elapsed {
                return false;
            }
        }

        true
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        TimeManager::new()
    }
}
