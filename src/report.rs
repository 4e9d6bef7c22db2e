use serde::{Deserialize, Serialize};

use crate::board::Line;
use crate::engine::{GameEngine, GamePhase, MoveResult, Outcome, Rejection, Verdict};

/// Object handed back to JavaScript after `attemptMove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub accepted: bool,
    /// Set for a refused move, tagged `gameAlreadyOver`, `notYourTurn` or `cellOccupied`.
    pub reason: Option<Rejection>,
    /// Index of the player whose turn it actually is, set alongside `notYourTurn`.
    pub expected_player: Option<u8>,
    /// Set for an accepted move, tagged `continue`, `win` or `draw`.
    pub outcome: Option<Outcome>,
    pub next_player: Option<u8>,
    pub winner: Option<u8>,
    /// `[x, y]` pairs of the completed line, for highlighting.
    pub winning_line: Option<Vec<[u32; 2]>>,
    pub status: String,
}

impl MoveReport {
    pub fn from_result(result: &MoveResult, grid_size: usize) -> Self {
        let mut report = Self {
            accepted: result.accepted(),
            reason: None,
            expected_player: None,
            outcome: None,
            next_player: None,
            winner: None,
            winning_line: None,
            status: result.message.clone(),
        };
        match result.verdict {
            Verdict::Rejected(reason) => {
                if let Rejection::NotYourTurn { expected } = reason {
                    report.expected_player = Some(expected.index());
                }
                report.reason = Some(reason);
            }
            Verdict::Accepted(outcome) => {
                match outcome {
                    Outcome::Continue { next } => report.next_player = Some(next.index()),
                    Outcome::Win { player, line } => {
                        report.winner = Some(player.index());
                        report.winning_line = Some(line_cells(line, grid_size));
                    }
                    Outcome::Draw => {}
                }
                report.outcome = Some(outcome);
            }
        }
        report
    }
}

/// Full engine state for re-rendering the board in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub grid_size: u32,
    /// Row-major cell codes: 0 empty, 1 first player, 2 second player.
    pub cells: Vec<i8>,
    pub line_sums: Vec<i32>,
    pub current_player: u8,
    pub turn_count: u32,
    pub game_over: bool,
    /// Tagged `awaitingMove`, `won` or `draw`.
    pub phase: GamePhase,
    pub winner: Option<u8>,
    pub winning_line: Option<Vec<[u32; 2]>>,
    pub status: String,
}

impl EngineSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        let n = engine.grid_size();
        Self {
            grid_size: n as u32,
            cells: engine.board().to_codes(),
            line_sums: engine.line_sums().to_vec(),
            current_player: engine.current_player().index(),
            turn_count: engine.turn_count() as u32,
            game_over: engine.is_game_over(),
            phase: engine.phase(),
            winner: engine.winner().map(|p| p.index()),
            winning_line: engine.winning_line().map(|line| line_cells(line, n)),
            status: engine.status_text(),
        }
    }
}

fn line_cells(line: Line, n: usize) -> Vec<[u32; 2]> {
    line.cells(n).map(|(x, y)| [x as u32, y as u32]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn win_report_lists_line_cells() {
        let mut engine = GameEngine::new(3).expect("valid size");
        for (player, x, y) in [
            (Player::PlayerOne, 2, 0),
            (Player::PlayerTwo, 0, 0),
            (Player::PlayerOne, 1, 1),
            (Player::PlayerTwo, 1, 0),
        ] {
            engine.attempt_move(player, x, y).expect("in bounds");
        }
        let result = engine.attempt_move(Player::PlayerOne, 0, 2).expect("in bounds");
        let report = MoveReport::from_result(&result, 3);
        assert!(report.accepted);
        assert_eq!(
            report.outcome,
            Some(Outcome::Win {
                player: Player::PlayerOne,
                line: Line::AntiDiagonal
            })
        );
        assert_eq!(report.winner, Some(0));
        assert_eq!(report.winning_line, Some(vec![[0, 2], [1, 1], [2, 0]]));
        assert_eq!(report.status, "Player 1 wins!");
    }

    #[test]
    fn rejection_report_names_expected_player() {
        let mut engine = GameEngine::new(3).expect("valid size");
        let result = engine.attempt_move(Player::PlayerTwo, 0, 0).expect("in bounds");
        let report = MoveReport::from_result(&result, 3);
        assert!(!report.accepted);
        assert_eq!(
            report.reason,
            Some(Rejection::NotYourTurn {
                expected: Player::PlayerOne
            })
        );
        assert_eq!(report.expected_player, Some(0));
        assert_eq!(report.outcome, None);

        let json = serde_json::to_value(&report).expect("serialises");
        assert_eq!(json["reason"]["kind"], "notYourTurn");
        assert_eq!(json["reason"]["expected"], "playerOne");
        assert!(json["outcome"].is_null());
    }

    #[test]
    fn outcome_serialises_as_tagged_object() {
        let mut engine = GameEngine::new(1).expect("valid size");
        let result = engine.attempt_move(Player::PlayerOne, 0, 0).expect("in bounds");
        let json = serde_json::to_value(MoveReport::from_result(&result, 1)).expect("serialises");
        assert_eq!(json["outcome"]["kind"], "win");
        assert_eq!(json["outcome"]["player"], "playerOne");
        assert_eq!(json["outcome"]["line"]["kind"], "column");
        assert_eq!(json["outcome"]["line"]["index"], 0);
        assert_eq!(json["winningLine"], serde_json::json!([[0, 0]]));
    }

    #[test]
    fn snapshot_serialises_camel_case() {
        let engine = GameEngine::new(2).expect("valid size");
        let json = serde_json::to_value(engine.snapshot()).expect("serialises");
        assert_eq!(json["gridSize"], 2);
        assert_eq!(json["lineSums"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["phase"]["kind"], "awaitingMove");
        assert_eq!(json["phase"]["player"], "playerOne");
        assert_eq!(json["status"], "Player 1 starts the game");
        assert!(json["winner"].is_null());
    }
}
