//! Randomised checks of the engine invariants.

use proptest::prelude::*;
use tictactoe_wasm::{Cell, GameEngine, Line, Player};

/// Grid size plus a stream of move attempts (player index, x, y), some of them illegal.
fn session() -> impl Strategy<Value = (usize, Vec<(u8, usize, usize)>)> {
    (1usize..=6).prop_flat_map(|n| {
        let attempt = (0u8..2, 0..n, 0..n);
        (Just(n), prop::collection::vec(attempt, 0..64))
    })
}

/// Line sums recomputed from scratch by scanning the board.
fn rescan(engine: &GameEngine) -> Vec<i32> {
    let n = engine.grid_size();
    (0..2 * n + 2)
        .map(|slot| {
            let line = Line::from_slot(slot, n).expect("slot within table");
            line.cells(n)
                .map(|(x, y)| match engine.cell(x, y).expect("on grid") {
                    Cell::Empty => 0,
                    Cell::Occupied(p) => p.sign(),
                })
                .sum()
        })
        .collect()
}

proptest! {
    #[test]
    fn invariants_hold_after_every_attempt((n, attempts) in session()) {
        let mut engine = GameEngine::new(n).expect("valid size");
        for (index, x, y) in attempts {
            let player = Player::from_index(index).expect("index below 2");
            let before = engine.snapshot();
            let result = engine.attempt_move(player, x, y).expect("coordinates on grid");

            if !result.accepted() {
                let after = engine.snapshot();
                prop_assert_eq!(&before.cells, &after.cells);
                prop_assert_eq!(&before.line_sums, &after.line_sums);
                prop_assert_eq!(before.turn_count, after.turn_count);
                prop_assert_eq!(before.current_player, after.current_player);
            }

            prop_assert_eq!(engine.turn_count(), engine.board().occupied());
            let rescanned = rescan(&engine);
            prop_assert_eq!(engine.line_sums(), rescanned.as_slice());
            for &sum in engine.line_sums() {
                prop_assert!((sum.unsigned_abs() as usize) <= n);
            }

            let complete = engine
                .line_sums()
                .iter()
                .any(|s| s.unsigned_abs() as usize == n);
            let full = engine.turn_count() == n * n;
            prop_assert_eq!(engine.is_game_over(), complete || full);
            prop_assert_eq!(engine.winner().is_some(), complete);
        }
    }

    #[test]
    fn reset_is_idempotent((n, attempts) in session()) {
        let mut engine = GameEngine::new(n).expect("valid size");
        for (index, x, y) in attempts {
            let player = Player::from_index(index).expect("index below 2");
            engine.attempt_move(player, x, y).expect("coordinates on grid");
        }
        engine.reset();
        let once = engine.snapshot();
        engine.reset();
        let twice = engine.snapshot();
        prop_assert_eq!(&once, &twice);
        let fresh = GameEngine::new(n).expect("valid size").snapshot();
        prop_assert_eq!(once, fresh);
    }
}
