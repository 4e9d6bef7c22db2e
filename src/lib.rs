#![deny(clippy::unwrap_used)]
//! WebAssembly rules engine for Tic-Tac-Toe on an arbitrary N×N grid.
//!
//! The page (JavaScript/TypeScript side) owns everything visual: it builds the grid, turns
//! drag-and-drop gestures into "player P drops a piece on cell (x, y)" and prints the status
//! line. This crate owns the rules:
//!
//! * [`GameEngine`] – one game session. Tracks occupancy, whose turn it is and a table of
//!   `2N + 2` running line sums (columns, rows, both diagonals) that decides wins in constant
//!   time per move, independent of the grid size.
//! * [`TicTacToeGame`] – the `wasm-bindgen` handle the page talks to. It mirrors the engine API
//!   with player indices (0/1), returns plain JS objects and throws a JS `Error` on contract
//!   violations such as off-grid coordinates.
//!
//! The engine is plain Rust and runs natively as well; only the binding layer touches JS types.

mod board;
mod config;
mod engine;
mod error;
mod logging;
mod report;
mod status;

pub use board::{Board, Cell, Line, Player, MAX_GRID_SIZE};
pub use config::EngineConfig;
pub use engine::{GameEngine, GamePhase, MoveResult, Outcome, Rejection, TicTacToeGame, Verdict};
pub use error::EngineError;
pub use report::{EngineSnapshot, MoveReport};
pub use status::{PlayerNames, Status, DEFAULT_PLAYER_ONE_NAME, DEFAULT_PLAYER_TWO_NAME};

use wasm_bindgen::prelude::*;

/// Install a panic hook sending Rust panics to the browser console. The hook is only compiled in
/// when the `console_error_panic_hook` feature is enabled (default).
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route engine logs to the browser console at `level` (`"error"` … `"trace"`, default `"info"`).
/// Returns `false` when logging was already set up.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> bool {
    logging::install_console_subscriber(logging::parse_level(level.as_deref()))
}

/// Length of the line-sum table for a grid of `grid_size` (`2N + 2`).
#[wasm_bindgen(js_name = lineCount)]
pub fn line_count(grid_size: u32) -> u32 {
    grid_size.saturating_mul(2).saturating_add(2)
}
