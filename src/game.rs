//! Game engine for tessera.
//!
//! Implements the territory-claiming rules:
//! - Board with per-player aggregate counters
//! - Region tracking (union-find over cells)
//! - Free-neighbor ledger for O(1) free-cell queries
//! - Golden move with split detection and atomic rollback
//! - Text rendering of the board

mod board;
mod golden;
mod invariants;
mod neighbors;
mod regions;
mod render;

pub use board::{Board, Coord, PlayerId};
pub use invariants::{
    InvariantViolation, assert_invariants, check_invariants, recount_areas, region_partition,
};
