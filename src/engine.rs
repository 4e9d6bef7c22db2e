use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use wasm_bindgen::prelude::*;

use crate::board::{Board, Cell, Line, LineSums, Player};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{EngineSnapshot, MoveReport};
use crate::status::{PlayerNames, Status};

/// Where the session stands. `Won` and `Draw` are terminal until [`GameEngine::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player", rename_all = "camelCase")]
pub enum GamePhase {
    AwaitingMove(Player),
    Won(Player),
    Draw,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::AwaitingMove(_))
    }
}

/// Consequence of an accepted move. Serialises as `{ kind: "continue" | "win" | "draw", .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    Continue { next: Player },
    Win { player: Player, line: Line },
    Draw,
}

/// Why a well-formed move was refused. None of these touch the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rejection {
    GameAlreadyOver,
    NotYourTurn { expected: Player },
    CellOccupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted(Outcome),
    Rejected(Rejection),
}

/// Answer to a single [`GameEngine::attempt_move`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub verdict: Verdict,
    pub status: Status,
    /// `status` rendered with the engine's player names.
    pub message: String,
}

impl MoveResult {
    pub fn accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.verdict {
            Verdict::Accepted(outcome) => Some(outcome),
            Verdict::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self.verdict {
            Verdict::Accepted(_) => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}

/// One Tic-Tac-Toe session on an N×N grid.
///
/// Victory is decided from a table of `2N + 2` line sums (every column, every row and both
/// diagonals). A move only changes the sums of the at most four lines through the new piece,
/// and a line is complete exactly when its sum reaches `±N`, so each move is judged in constant
/// time whatever the grid size.
#[derive(Debug, Clone)]
pub struct GameEngine {
    names: PlayerNames,
    board: Board,
    sums: LineSums,
    current: Player,
    phase: GamePhase,
    turn_count: usize,
    status: Status,
    winning_line: Option<Line>,
}

impl GameEngine {
    /// Fresh engine with default player names. Fails with [`EngineError::InvalidGridSize`] for
    /// zero, anything above [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE), or a grid that cannot be
    /// allocated.
    pub fn new(grid_size: usize) -> Result<Self, EngineError> {
        Self::with_config(&EngineConfig::with_grid_size(grid_size))
    }

    pub fn with_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let n = config.grid_size;
        let names = config.names()?;
        let board = Board::try_new(n)?;
        let sums = LineSums::try_new(n)?;
        debug!(grid_size = n, "creating engine");
        Ok(Self {
            names,
            board,
            sums,
            current: Player::PlayerOne,
            phase: GamePhase::AwaitingMove(Player::PlayerOne),
            turn_count: 0,
            status: Status::Started(Player::PlayerOne),
            winning_line: None,
        })
    }

    /// Start over on the same grid with the same names.
    pub fn reset(&mut self) {
        self.board.clear();
        self.sums.clear();
        self.current = Player::PlayerOne;
        self.phase = GamePhase::AwaitingMove(Player::PlayerOne);
        self.turn_count = 0;
        self.status = Status::Started(Player::PlayerOne);
        self.winning_line = None;
        debug!(grid_size = self.grid_size(), "engine reset");
    }

    /// Try to place a piece for `player` at `(x, y)`.
    ///
    /// Out-of-range coordinates are a caller bug and return [`EngineError::InvalidCoordinate`]
    /// before any game rule is consulted. Rule violations come back as a rejected
    /// [`MoveResult`] and leave the board, sums and turn untouched.
    #[instrument(level = "debug", skip(self), fields(turn = self.turn_count))]
    pub fn attempt_move(
        &mut self,
        player: Player,
        x: usize,
        y: usize,
    ) -> Result<MoveResult, EngineError> {
        if !self.board.contains(x, y) {
            warn!(x, y, grid_size = self.grid_size(), "move outside the grid");
            return Err(EngineError::InvalidCoordinate {
                x,
                y,
                grid_size: self.grid_size(),
            });
        }

        if self.phase.is_terminal() {
            return Ok(self.reject(Rejection::GameAlreadyOver, Status::AlreadyOver));
        }
        if player != self.current {
            let expected = self.current;
            return Ok(self.reject(
                Rejection::NotYourTurn { expected },
                Status::NotYourTurn(expected),
            ));
        }
        if !self.board.place(x, y, player) {
            return Ok(self.reject(Rejection::CellOccupied, Status::SpotTaken));
        }

        let completed = self.sums.record(x, y, player);
        self.turn_count += 1;

        let outcome = if let Some(line) = completed {
            self.phase = GamePhase::Won(player);
            self.status = Status::Won(player);
            self.winning_line = Some(line);
            info!(?player, ?line, turns = self.turn_count, "line completed");
            Outcome::Win { player, line }
        } else if self.turn_count == self.board.cell_count() {
            self.phase = GamePhase::Draw;
            self.status = Status::Draw;
            info!(turns = self.turn_count, "board full without a line");
            Outcome::Draw
        } else {
            let next = player.other();
            self.current = next;
            self.phase = GamePhase::AwaitingMove(next);
            self.status = Status::Turn(next);
            Outcome::Continue { next }
        };
        debug!(?player, x, y, ?outcome, "move accepted");

        Ok(MoveResult {
            verdict: Verdict::Accepted(outcome),
            status: self.status,
            message: self.status_text(),
        })
    }

    fn reject(&mut self, reason: Rejection, status: Status) -> MoveResult {
        debug!(?reason, "move rejected");
        self.status = status;
        MoveResult {
            verdict: Verdict::Rejected(reason),
            status,
            message: self.status_text(),
        }
    }

    pub fn grid_size(&self) -> usize {
        self.board.size()
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            GamePhase::Won(player) => Some(player),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, EngineError> {
        self.board.get(x, y).ok_or(EngineError::InvalidCoordinate {
            x,
            y,
            grid_size: self.grid_size(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Column sums, then row sums, then main diagonal and anti-diagonal.
    pub fn line_sums(&self) -> &[i32] {
        self.sums.as_slice()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_text(&self) -> String {
        self.status.render(&self.names)
    }

    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    pub fn set_player_names(
        &mut self,
        player_one: impl Into<String>,
        player_two: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.names = PlayerNames::try_new(player_one, player_two)?;
        Ok(())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }
}

/// JavaScript handle on a [`GameEngine`]. Players are passed as indices (0 or 1).
#[wasm_bindgen]
pub struct TicTacToeGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl TicTacToeGame {
    /// Accepts an optional `{ gridSize, playerOneName, playerTwoName }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TicTacToeGame, JsValue> {
        let cfg: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(EngineError::from)?
        };
        Ok(Self {
            engine: GameEngine::with_config(&cfg)?,
        })
    }

    #[wasm_bindgen(js_name = defaultConfig)]
    pub fn default_config() -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&EngineConfig::default()).map_err(JsValue::from)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Returns a `MoveReport` object; throws on an unknown player or off-grid cell.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, player: u8, x: u32, y: u32) -> Result<JsValue, JsValue> {
        let player = Player::from_index(player).ok_or(EngineError::UnknownPlayer { index: player })?;
        let result = self.engine.attempt_move(player, x as usize, y as usize)?;
        let report = MoveReport::from_result(&result, self.engine.grid_size());
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }

    #[wasm_bindgen(getter, js_name = gridSize)]
    pub fn grid_size(&self) -> u32 {
        self.engine.grid_size() as u32
    }

    #[wasm_bindgen(getter, js_name = turnCount)]
    pub fn turn_count(&self) -> u32 {
        self.engine.turn_count() as u32
    }

    #[wasm_bindgen(getter, js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.engine.current_player().index()
    }

    #[wasm_bindgen(getter, js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.engine.status_text()
    }

    /// Row-major `Int8Array`: 0 empty, 1 first player, 2 second player.
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> Vec<i8> {
        self.engine.board().to_codes()
    }

    #[wasm_bindgen(js_name = getLineSums)]
    pub fn get_line_sums(&self) -> Vec<i32> {
        self.engine.line_sums().to_vec()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.snapshot()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = setPlayerNames)]
    pub fn set_player_names(&mut self, player_one: String, player_two: String) -> Result<(), JsValue> {
        self.engine.set_player_names(player_one, player_two)?;
        Ok(())
    }
}

impl TicTacToeGame {
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }
}
