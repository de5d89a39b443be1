//! Static chess position evaluator and search time-management controller.
//!
//! This crate covers two things a search driver consumes as black boxes:
//! a pure `Position -> Score` evaluation function ([`evaluator`], backed by
//! [`board`]'s bitboard representation and feature tables) and a
//! closed-loop [`time_manager`] that decides when iterative deepening
//! should stop. Move generation, alpha-beta search, and the UCI loop are
//! external collaborators and are out of scope here; [`board::Board`]
//! implements just enough of them (legal move generation, make/unmake) to
//! be a usable, testable stand-in for the `Position` a search would drive.

pub mod board;
pub mod evaluator;
pub mod sync;
pub mod time_manager;
pub mod zobrist;
