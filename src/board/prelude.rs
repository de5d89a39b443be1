//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_engine::board::prelude::*;
//! ```

pub use super::{
    mating_material, Board, BoardBuilder, CastlingRights, Color, EvalContext, EvalScore, FenError,
    Move, MoveList, MoveParseError, Piece, Square, SquareError,
};
