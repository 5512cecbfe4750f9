//! Free-neighbor ledger bookkeeping.
//!
//! `free_neighbors[p]` counts the free cells adjacent to at least one cell
//! of player `p`. The helpers here keep that count exact under placement
//! and capture without rescanning the board.

use crate::game::board::{Board, Coord, PlayerId};

/// Check whether `pos` has at least one 4-neighbor owned by `player`.
#[must_use]
pub(crate) fn has_neighbor(board: &Board, player: PlayerId, pos: Coord) -> bool {
    let (adjacent, count) = pos.adjacent(board.width(), board.height());
    adjacent[..count as usize]
        .iter()
        .any(|nb| board.owners[board.index(*nb)] == Some(player))
}

/// Count the free 4-neighbors of `pos` that are not adjacent to any other
/// cell of `player`.
///
/// These are exactly the cells that become new free neighbors of `player`
/// once `pos` is theirs; cells already adjacent to the player's territory
/// are excluded to avoid double counting.
#[must_use]
pub(crate) fn isolated_free_neighbors(board: &Board, player: PlayerId, pos: Coord) -> u64 {
    let (adjacent, count) = pos.adjacent(board.width(), board.height());
    let mut gained = 0u64;
    for nb in &adjacent[..count as usize] {
        if board.owners[board.index(*nb)].is_none() && !has_neighbor(board, player, *nb) {
            gained += 1;
        }
    }
    gained
}

/// Decrement the free-neighbor count of every player other than `player`
/// owning a 4-neighbor of `pos`.
///
/// `pos` is about to stop being free, so each such owner loses it as a free
/// neighbor. Each distinct owner is debited at most once even when several
/// neighboring cells belong to them.
pub(crate) fn debit_neighbor_owners(board: &mut Board, player: PlayerId, pos: Coord) {
    let (adjacent, count) = pos.adjacent(board.width(), board.height());
    let mut seen = [0 as PlayerId; 4];
    let mut seen_count = 0usize;

    for nb in &adjacent[..count as usize] {
        let Some(owner) = board.owners[board.index(*nb)] else {
            continue;
        };
        if owner == player || seen[..seen_count].contains(&owner) {
            continue;
        }
        seen[seen_count] = owner;
        seen_count += 1;
        if let Some(slot) = board.slot(owner) {
            board.free_neighbors[slot] -= 1;
        }
    }
}
