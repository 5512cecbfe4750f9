// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tessera: a territory-claiming board game engine.
//!
//! Players place pieces on a grid, each player may occupy at most a fixed
//! number of disjoint connected regions, and each player has a single
//! "golden move" that captures one opponent cell - provided the capture
//! does not push the dispossessed opponent over their own region limit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Front ends (batch / terminal)     │
//! ├─────────────────────────────────────┤
//! │   Board: moves, queries, render     │
//! ├─────────────────────────────────────┤
//! │   Region tracker + split detector   │
//! └─────────────────────────────────────┘
//! ```

pub mod batch;
pub mod game;

// Re-export key types at crate root for convenience
pub use game::{Board, Coord, InvariantViolation, PlayerId, check_invariants};
