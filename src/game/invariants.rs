//! Board invariants - sanity checks that detect bugs.
//!
//! Every counter the engine maintains incrementally is recomputed here from
//! the raw grid. In a correct implementation these checks never trigger; if
//! they do, the incremental bookkeeping has a bug.

use crate::game::board::{Board, Coord, PlayerId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Recompute the number of disjoint regions owned by `player` by flood fill,
/// independent of the union-find tracker.
#[must_use]
pub fn recount_areas(board: &Board, player: PlayerId) -> u32 {
    let mut seen = vec![false; board.owners.len()];
    let mut regions = 0u32;
    let mut stack: Vec<Coord> = Vec::new();

    for y in 0..board.height() {
        for x in 0..board.width() {
            let pos = Coord::new(x, y);
            let idx = board.index(pos);
            if board.owners[idx] != Some(player) || seen[idx] {
                continue;
            }
            regions += 1;
            seen[idx] = true;
            stack.push(pos);
            while let Some(cur) = stack.pop() {
                let (adjacent, count) = cur.adjacent(board.width(), board.height());
                for nb in &adjacent[..count as usize] {
                    let nb_idx = board.index(*nb);
                    if board.owners[nb_idx] == Some(player) && !seen[nb_idx] {
                        seen[nb_idx] = true;
                        stack.push(*nb);
                    }
                }
            }
        }
    }
    regions
}

/// The partition of occupied cells into regions, as seen by the union-find
/// tracker, with representatives normalized to first-occurrence order.
///
/// Free cells map to `None`. Two boards with the same owners and the same
/// connectivity produce equal partitions even when path compression or
/// split-detection relabeling renamed the underlying representatives.
#[must_use]
pub fn region_partition(board: &Board) -> Vec<Option<usize>> {
    let mut ordinal_of_root: Vec<Option<usize>> = vec![None; board.owners.len()];
    let mut next = 0usize;
    let mut partition = Vec::with_capacity(board.owners.len());

    for (idx, owner) in board.owners.iter().enumerate() {
        if owner.is_none() {
            partition.push(None);
            continue;
        }
        let root = board.regions.root_of(idx);
        let ordinal = *ordinal_of_root[root].get_or_insert_with(|| {
            let n = next;
            next += 1;
            n
        });
        partition.push(Some(ordinal));
    }
    partition
}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let players = board.players();

    // Recount owned and free cells.
    let mut fields = vec![0u64; players as usize];
    let mut free = 0u64;
    for owner in &board.owners {
        match owner {
            Some(player) => {
                if let Some(slot) = board.slot(*player) {
                    fields[slot] += 1;
                } else {
                    violations.push(InvariantViolation {
                        message: format!("Cell owned by unknown player {player}"),
                    });
                }
            }
            None => free += 1,
        }
    }

    if free != board.free_cells {
        violations.push(InvariantViolation {
            message: format!(
                "Free-cell count {} does not match recount {free}",
                board.free_cells
            ),
        });
    }

    for player in 1..=players {
        let Some(slot) = board.slot(player) else {
            continue;
        };

        if fields[slot] != board.fields[slot] {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} field count {} does not match recount {}",
                    board.fields[slot], fields[slot]
                ),
            });
        }

        let areas = recount_areas(board, player);
        if areas != board.areas[slot] {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} area count {} does not match flood fill {areas}",
                    board.areas[slot]
                ),
            });
        }
        if board.areas[slot] > board.area_limit() {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} area count {} exceeds limit {}",
                    board.areas[slot],
                    board.area_limit()
                ),
            });
        }

        let neighbors = recount_free_neighbors(board, player);
        if neighbors != board.free_neighbors[slot] {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} free-neighbor count {} does not match recount {neighbors}",
                    board.free_neighbors[slot]
                ),
            });
        }
    }

    // Union-find representatives must agree with flood-fill connectivity:
    // same component, same root.
    for y in 0..board.height() {
        for x in 0..board.width() {
            let pos = Coord::new(x, y);
            let idx = board.index(pos);
            let Some(owner) = board.owners[idx] else {
                continue;
            };
            let (adjacent, count) = pos.adjacent(board.width(), board.height());
            for nb in &adjacent[..count as usize] {
                let nb_idx = board.index(*nb);
                if board.owners[nb_idx] == Some(owner)
                    && board.regions.root_of(idx) != board.regions.root_of(nb_idx)
                {
                    violations.push(InvariantViolation {
                        message: format!(
                            "Adjacent cells ({}, {}) and ({}, {}) of player {owner} \
                             have different representatives",
                            pos.x, pos.y, nb.x, nb.y
                        ),
                    });
                }
            }
        }
    }

    violations
}

/// Count free cells adjacent to at least one cell of `player` by scanning.
fn recount_free_neighbors(board: &Board, player: PlayerId) -> u64 {
    let mut count = 0u64;
    for y in 0..board.height() {
        for x in 0..board.width() {
            let pos = Coord::new(x, y);
            if board.owners[board.index(pos)].is_some() {
                continue;
            }
            let (adjacent, n) = pos.adjacent(board.width(), board.height());
            if adjacent[..n as usize]
                .iter()
                .any(|nb| board.owners[board.index(*nb)] == Some(player))
            {
                count += 1;
            }
        }
    }
    count
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_board() -> Board {
        let mut board = Board::new(5, 5, 2, 2).unwrap();
        for (player, x, y) in [
            (1, 0, 0),
            (2, 4, 4),
            (1, 1, 0),
            (2, 3, 4),
            (1, 3, 2),
            (2, 0, 4),
        ] {
            assert!(board.place(player, Coord::new(x, y)));
        }
        board
    }

    #[test]
    fn test_valid_board_passes() {
        let board = played_board();
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_corrupted_field_count_detected() {
        let mut board = played_board();
        board.fields[0] += 1;
        let violations = check_invariants(&board);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("field count"));
    }

    #[test]
    fn test_corrupted_area_count_detected() {
        let mut board = played_board();
        board.areas[1] = 1;
        let violations = check_invariants(&board);
        assert!(
            violations
                .iter()
                .any(|v| v.message.contains("area count"))
        );
    }

    #[test]
    fn test_corrupted_representative_detected() {
        let mut board = played_board();
        // (0,0) and (1,0) belong to one region of player 1; splitting
        // their representatives must be caught.
        let idx = board.index(Coord::new(1, 0));
        board.regions.detach(idx);
        let violations = check_invariants(&board);
        assert!(
            violations
                .iter()
                .any(|v| v.message.contains("representatives"))
        );
    }

    #[test]
    fn test_recount_areas_matches_engine() {
        let board = played_board();
        assert_eq!(recount_areas(&board, 1), board.region_count(1));
        assert_eq!(recount_areas(&board, 2), board.region_count(2));
    }

    #[test]
    fn test_region_partition_stable_under_renaming() {
        let board = played_board();
        let mut relabeled = board.clone();
        // Renaming a representative inside one component must not change
        // the normalized partition.
        let a = relabeled.index(Coord::new(0, 0));
        let b = relabeled.index(Coord::new(1, 0));
        let root = relabeled.regions.root_of(a);
        let other = if root == a { b } else { a };
        relabeled.regions.detach(other);
        relabeled.regions.relabel(root, other);
        assert_eq!(region_partition(&board), region_partition(&relabeled));
    }
}
