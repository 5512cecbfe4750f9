//! Golden move: one-time capture of an opponent cell, with split detection.
//!
//! Removing a cell from the middle of a region may break it into several
//! fragments. The union-find tracker cannot undo a merge, so the split
//! detector rebuilds representatives for every fragment touching the
//! captured cell and counts them; the move commits only when the
//! dispossessed owner stays within the area limit, and rolls back
//! atomically otherwise.

use crate::game::board::{Board, Coord, PlayerId};
use crate::game::neighbors::{has_neighbor, isolated_free_neighbors};

impl Board {
    /// Capture the opponent-owned cell at `pos` for `player`.
    ///
    /// Each player may do this once per game. Fails (returning `false`,
    /// with the board left exactly as it was) if the player number or
    /// position is invalid, the player has already spent their golden move,
    /// the target cell is free or the player's own, the capture would start
    /// a new region for a player already at the area limit, or removing the
    /// cell would split its owner's territory into more regions than the
    /// limit allows.
    pub fn golden_move(&mut self, player: PlayerId, pos: Coord) -> bool {
        let Some(slot) = self.slot(player) else {
            return false;
        };
        if !self.in_bounds(pos) || self.used_golden[slot] {
            return false;
        }
        let idx = self.index(pos);
        let Some(prev) = self.owners[idx] else {
            return false;
        };
        if prev == player {
            return false;
        }
        if !has_neighbor(self, player, pos) && self.areas[slot] == self.area_limit() {
            return false;
        }
        let Some(prev_slot) = self.slot(prev) else {
            return false;
        };

        // Free neighbors the capture will credit to the mover, measured
        // before the cell changes hands.
        let gained = isolated_free_neighbors(self, player, pos);

        // Tentatively recolor the cell and cut it out of its component.
        self.owners[idx] = Some(player);
        self.regions.detach(idx);
        self.fields[prev_slot] -= 1;

        // The captured cell leaves as one unit; `parts` fragments of its
        // old component survive around it.
        let parts = split_parts(self, prev, pos);
        self.areas[prev_slot] += parts;
        self.areas[prev_slot] -= 1;

        if self.areas[prev_slot] <= self.area_limit() {
            // Commit: the cell is no longer a frontier of its old owner,
            // and the mover inherits its free neighbors.
            self.free_neighbors[prev_slot] -= isolated_free_neighbors(self, prev, pos);
            self.free_neighbors[slot] += gained;
            self.fuse_with_neighbors(player, pos);
            self.used_golden[slot] = true;
            true
        } else {
            // Roll back: hand the cell back and re-fuse the fragments.
            // fuse_with_neighbors adds one area and takes one back per
            // fragment joined, restoring the pre-call count exactly.
            self.fuse_with_neighbors(prev, pos);
            false
        }
    }

    /// Whether `player` can still perform some legal golden move.
    ///
    /// Never mutates the board. Below the area limit the answer only needs
    /// the counters: any opponent-owned cell admits a legal capture, since
    /// every non-empty territory has a cell whose removal leaves at most one
    /// adjacent fragment. At the limit only cells bordering the player's own
    /// territory are candidates, and each is checked by trial-running the
    /// real golden move on a copy of the board.
    #[must_use]
    pub fn golden_possible(&self, player: PlayerId) -> bool {
        let Some(slot) = self.slot(player) else {
            return false;
        };
        if self.used_golden[slot] {
            return false;
        }
        let total = u64::from(self.width()) * u64::from(self.height());
        if self.free_cells + self.fields[slot] >= total {
            // No opponent owns anything.
            return false;
        }
        if self.areas[slot] < self.area_limit() {
            return true;
        }

        for y in 0..self.height() {
            for x in 0..self.width() {
                let pos = Coord::new(x, y);
                match self.owners[self.index(pos)] {
                    Some(owner) if owner != player => {}
                    _ => continue,
                }
                if !has_neighbor(self, player, pos) {
                    continue;
                }
                let mut trial = self.clone();
                if trial.golden_move(player, pos) {
                    return true;
                }
            }
        }
        false
    }
}

/// Count the fragments of `prev`'s old component that survive around the
/// removed cell at `pos`, relabeling each fragment under a seed neighbor.
///
/// Launches one work-stack DFS per neighbor of `pos` still owned by `prev`
/// and not yet claimed by an earlier fragment. Visitation is tracked with a
/// per-call generation stamp, so no state leaks between calls and no
/// clearing pass is needed. Cost is bounded by the size of the single
/// component that contained `pos`, not the whole board.
fn split_parts(board: &mut Board, prev: PlayerId, pos: Coord) -> u32 {
    board.generation += 1;
    let stamp = board.generation;
    let width = board.width();
    let height = board.height();

    let mut parts = 0u32;
    let mut stack: Vec<Coord> = Vec::new();

    let (adjacent, count) = pos.adjacent(width, height);
    for seed in &adjacent[..count as usize] {
        let seed_idx = board.index(*seed);
        if board.owners[seed_idx] != Some(prev) || board.visited[seed_idx] == stamp {
            continue;
        }
        parts += 1;
        board.visited[seed_idx] = stamp;
        board.regions.relabel(seed_idx, seed_idx);
        stack.push(*seed);

        while let Some(cur) = stack.pop() {
            let (nbs, n) = cur.adjacent(width, height);
            for nb in &nbs[..n as usize] {
                let nb_idx = board.index(*nb);
                if board.owners[nb_idx] == Some(prev) && board.visited[nb_idx] != stamp {
                    board.visited[nb_idx] = stamp;
                    board.regions.relabel(nb_idx, seed_idx);
                    stack.push(*nb);
                }
            }
        }
    }
    parts
}
