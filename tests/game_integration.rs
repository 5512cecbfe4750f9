//! End-to-end tests driving the engine and the batch interpreter through
//! the public API.
//!
//! Run with: cargo test --test game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tessera::batch::{self, Format};
use tessera::game::{recount_areas, region_partition};
use tessera::{Board, Coord, check_invariants};

/// Exhaustive golden-move search, the slow way: try every opponent cell
/// on a scratch copy.
fn golden_possible_brute(board: &Board, player: u32) -> bool {
    if board.golden_used(player) {
        return false;
    }
    for y in 0..board.height() {
        for x in 0..board.width() {
            let pos = Coord::new(x, y);
            if board.owner(pos).is_some_and(|owner| owner != player) {
                let mut trial = board.clone();
                if trial.golden_move(player, pos) {
                    return true;
                }
            }
        }
    }
    false
}

#[test]
fn test_single_cell_board() {
    let mut board = Board::new(1, 1, 1, 1).unwrap();
    assert!(board.place(1, Coord::new(0, 0)));
    assert_eq!(board.occupied_fields(1), 1);
    assert_eq!(board.free_fields(1), 0);
    assert!(!board.golden_possible(1));
    assert!(check_invariants(&board).is_empty());
}

#[test]
fn test_golden_corner_of_l_rejected_and_board_unchanged() {
    // Player 1 owns an L; capturing its corner would split it in two,
    // which player 1's limit of 1 forbids.
    let mut board = Board::new(5, 5, 2, 1).unwrap();
    assert!(board.place(1, Coord::new(0, 0)));
    assert!(board.place(1, Coord::new(0, 1)));
    assert!(board.place(1, Coord::new(0, 2)));
    assert!(board.place(1, Coord::new(1, 0)));

    let rendered = board.render();
    let partition = region_partition(&board);
    let counters = (
        board.occupied_fields(1),
        board.occupied_fields(2),
        board.free_fields(1),
        board.free_fields(2),
    );

    assert!(!board.golden_move(2, Coord::new(0, 0)));

    assert_eq!(board.render(), rendered);
    assert_eq!(region_partition(&board), partition);
    assert_eq!(
        (
            board.occupied_fields(1),
            board.occupied_fields(2),
            board.free_fields(1),
            board.free_fields(2),
        ),
        counters
    );
    assert!(!board.golden_used(2));
    assert!(check_invariants(&board).is_empty());
}

#[test]
fn test_golden_tip_of_l_succeeds() {
    let mut board = Board::new(5, 5, 2, 1).unwrap();
    assert!(board.place(1, Coord::new(0, 0)));
    assert!(board.place(1, Coord::new(0, 1)));
    assert!(board.place(1, Coord::new(0, 2)));
    assert!(board.place(1, Coord::new(1, 0)));

    let fields_before = board.occupied_fields(1);
    assert!(board.golden_move(2, Coord::new(0, 2)));

    assert_eq!(board.occupied_fields(1), fields_before - 1);
    assert_eq!(board.occupied_fields(2), 1);
    assert_eq!(recount_areas(&board, 1), 1);
    assert!(board.golden_used(2));
    assert!(check_invariants(&board).is_empty());
}

#[test]
fn test_full_skirmish() {
    let mut board = Board::new(4, 4, 2, 3).unwrap();

    assert!(board.place(1, Coord::new(0, 0)));
    assert!(board.place(2, Coord::new(3, 3)));
    assert!(board.place(1, Coord::new(2, 0)));
    assert!(board.place(1, Coord::new(1, 3)));
    // A fourth disjoint region for player 1 is over the limit.
    assert!(!board.place(1, Coord::new(2, 2)));
    // Bridging two regions is always allowed.
    assert!(board.place(1, Coord::new(1, 0)));
    assert_eq!(recount_areas(&board, 1), 2);

    assert!(board.place(2, Coord::new(1, 2)));
    assert!(board.place(2, Coord::new(2, 2)));
    assert!(check_invariants(&board).is_empty());

    // Capturing the middle of player 1's bottom row splits it in two,
    // which both limits can absorb.
    assert!(board.golden_move(2, Coord::new(1, 0)));
    assert_eq!(board.occupied_fields(1), 3);
    assert_eq!(board.occupied_fields(2), 4);
    assert_eq!(recount_areas(&board, 1), 3);
    assert_eq!(recount_areas(&board, 2), 3);
    assert!(board.golden_used(2));
    assert!(!board.golden_possible(2));
    assert!(check_invariants(&board).is_empty());

    // Player 1 is at the limit, so only an adjacent capture works.
    assert!(!board.golden_move(1, Coord::new(2, 2)));
    assert!(board.golden_move(1, Coord::new(1, 2)));
    assert_eq!(board.occupied_fields(1), 4);
    assert_eq!(board.occupied_fields(2), 3);
    assert!(!board.golden_possible(1));
    assert!(check_invariants(&board).is_empty());
}

#[test]
fn test_golden_possible_matches_exhaustive_search() {
    let mut board = Board::new(4, 4, 3, 2).unwrap();
    let script = [
        (1, 0, 0),
        (1, 0, 1),
        (2, 1, 0),
        (2, 1, 1),
        (3, 3, 3),
        (1, 3, 0),
        (2, 2, 3),
    ];
    for (player, x, y) in script {
        assert!(board.place(player, Coord::new(x, y)));
        for probe in 1..=3 {
            assert_eq!(
                board.golden_possible(probe),
                golden_possible_brute(&board, probe),
                "player {probe} after placing for {player} at ({x},{y})"
            );
        }
    }
}

#[test]
fn test_batch_session() {
    let script = "\
# two players on a 4x4 board, three regions each
B 4 4 2 3
m 1 0 0
m 2 3 3
m 1 2 0
bogus
m 1 1 3
m 1 2 2
m 1 1 0
p
g 2 1 0
b 1
b 2
f 2
q 2
";
    let mut out = Vec::new();
    let mut err = Vec::new();
    batch::run(script.as_bytes(), &mut out, &mut err, Format::Text).unwrap();

    let expected_board = "\
.1.2
....
....
111.
";
    let expected = format!("OK 2\n1\n1\n1\n1\n0\n1\n{expected_board}1\n3\n2\n11\n0\n");
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(String::from_utf8(err).unwrap(), "ERROR 6\n");
}
