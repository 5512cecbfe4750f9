//! Property-based tests for the board engine.
//!
//! These tests drive random command sequences and verify that the
//! incremental counters always agree with a from-scratch recount.
//! Run with: cargo test --release --test prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use tessera::game::region_partition;
use tessera::{Board, Coord, check_invariants};

const WIDTH: u32 = 6;
const HEIGHT: u32 = 6;
const PLAYERS: u32 = 3;
const AREAS: u32 = 3;

/// One step of a random game: which player acts where, and whether they
/// try their golden move instead of an ordinary one.
fn step_strategy() -> impl Strategy<Value = (u32, u32, u32, bool)> {
    (1..=PLAYERS, 0..WIDTH, 0..HEIGHT, any::<bool>())
}

fn count_free(board: &Board) -> u64 {
    let mut free = 0u64;
    for y in 0..board.height() {
        for x in 0..board.width() {
            if board.owner(Coord::new(x, y)).is_none() {
                free += 1;
            }
        }
    }
    free
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every reachable board state passes a full invariant recount, and
    /// no cell is ever lost or duplicated.
    #[test]
    fn prop_invariants_hold_under_random_play(
        steps in prop::collection::vec(step_strategy(), 0..120)
    ) {
        let mut board = Board::new(WIDTH, HEIGHT, PLAYERS, AREAS).unwrap();

        for (player, x, y, golden) in steps {
            let pos = Coord::new(x, y);
            if golden {
                board.golden_move(player, pos);
            } else {
                board.place(player, pos);
            }

            let violations = check_invariants(&board);
            prop_assert!(violations.is_empty(), "violations: {violations:?}");

            let occupied: u64 = (1..=PLAYERS).map(|p| board.occupied_fields(p)).sum();
            prop_assert_eq!(
                occupied + count_free(&board),
                u64::from(WIDTH) * u64::from(HEIGHT)
            );
        }
    }

    /// A failed golden move leaves no observable trace.
    #[test]
    fn prop_failed_golden_move_is_invisible(
        steps in prop::collection::vec(step_strategy(), 1..80),
        target_x in 0..WIDTH,
        target_y in 0..HEIGHT,
        mover in 1..=PLAYERS
    ) {
        let mut board = Board::new(WIDTH, HEIGHT, PLAYERS, AREAS).unwrap();
        for (player, x, y, _) in steps {
            board.place(player, Coord::new(x, y));
        }

        let rendered = board.render();
        let partition = region_partition(&board);
        let counters: Vec<(u64, u64, bool)> = (1..=PLAYERS)
            .map(|p| (board.occupied_fields(p), board.free_fields(p), board.golden_used(p)))
            .collect();

        if !board.golden_move(mover, Coord::new(target_x, target_y)) {
            prop_assert_eq!(board.render(), rendered);
            prop_assert_eq!(region_partition(&board), partition);
            let after: Vec<(u64, u64, bool)> = (1..=PLAYERS)
                .map(|p| (board.occupied_fields(p), board.free_fields(p), board.golden_used(p)))
                .collect();
            prop_assert_eq!(after, counters);
        }
        prop_assert!(check_invariants(&board).is_empty());
    }

    /// The fast golden-move feasibility check agrees with trying every
    /// opponent cell one by one.
    #[test]
    fn prop_golden_possible_matches_brute_force(
        steps in prop::collection::vec(step_strategy(), 0..60)
    ) {
        let mut board = Board::new(WIDTH, HEIGHT, PLAYERS, AREAS).unwrap();
        for (player, x, y, golden) in steps {
            let pos = Coord::new(x, y);
            if golden {
                board.golden_move(player, pos);
            } else {
                board.place(player, pos);
            }
        }

        for player in 1..=PLAYERS {
            let mut brute = false;
            if !board.golden_used(player) {
                'scan: for y in 0..HEIGHT {
                    for x in 0..WIDTH {
                        let pos = Coord::new(x, y);
                        if board.owner(pos).is_some_and(|owner| owner != player) {
                            let mut trial = board.clone();
                            if trial.golden_move(player, pos) {
                                brute = true;
                                break 'scan;
                            }
                        }
                    }
                }
            }
            prop_assert_eq!(board.golden_possible(player), brute, "player {}", player);
        }
    }
}
