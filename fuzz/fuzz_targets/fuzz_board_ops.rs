#![no_main]

//! Board operation fuzzer.
//!
//! Applies an arbitrary action sequence to a small board and verifies the
//! incremental counters against a full recount after every action.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera::{check_invariants, Board, Coord};

const SIDE: u32 = 8;
const PLAYERS: u32 = 3;

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    /// Ordinary placement.
    Place { player: u8, x: u8, y: u8 },
    /// Golden capture attempt.
    Golden { player: u8, x: u8, y: u8 },
    /// Counter queries, which must not disturb state.
    Query { player: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let Some(mut board) = Board::new(SIDE, SIDE, PLAYERS, 2) else {
        return;
    };

    for action in actions.into_iter().take(200) {
        match action {
            FuzzAction::Place { player, x, y } => {
                let player = u32::from(player) % PLAYERS + 1;
                let pos = Coord::new(u32::from(x), u32::from(y));
                board.place(player, pos);
            }
            FuzzAction::Golden { player, x, y } => {
                let player = u32::from(player) % PLAYERS + 1;
                let pos = Coord::new(u32::from(x), u32::from(y));
                board.golden_move(player, pos);
            }
            FuzzAction::Query { player } => {
                let player = u32::from(player) % PLAYERS + 1;
                let _ = board.occupied_fields(player);
                let _ = board.free_fields(player);
                let _ = board.golden_possible(player);
                let _ = board.render();
            }
        }

        let violations = check_invariants(&board);
        assert!(violations.is_empty(), "violations: {violations:?}");
    }
});
