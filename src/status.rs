use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::error::EngineError;

pub const DEFAULT_PLAYER_ONE_NAME: &str = "Player 1";
pub const DEFAULT_PLAYER_TWO_NAME: &str = "Player 2";

/// Display names for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    pub player_one: String,
    pub player_two: String,
}

impl PlayerNames {
    /// Fails if either name is blank.
    pub fn try_new(
        player_one: impl Into<String>,
        player_two: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let names = Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
        };
        if names.player_one.trim().is_empty() || names.player_two.trim().is_empty() {
            return Err(EngineError::Config("player names must not be empty".to_owned()));
        }
        Ok(names)
    }

    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::PlayerOne => &self.player_one,
            Player::PlayerTwo => &self.player_two,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            player_one: DEFAULT_PLAYER_ONE_NAME.to_owned(),
            player_two: DEFAULT_PLAYER_TWO_NAME.to_owned(),
        }
    }
}

/// Structured result of the latest engine event, rendered to text with [`Status::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player", rename_all = "camelCase")]
pub enum Status {
    Started(Player),
    Turn(Player),
    Won(Player),
    Draw,
    AlreadyOver,
    NotYourTurn(Player),
    SpotTaken,
}

impl Status {
    pub fn render(self, names: &PlayerNames) -> String {
        StatusText { status: self, names }.to_string()
    }
}

struct StatusText<'a> {
    status: Status,
    names: &'a PlayerNames,
}

impl fmt::Display for StatusText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names;
        match self.status {
            Status::Started(p) => write!(f, "{} starts the game", names.name(p)),
            Status::Turn(p) => write!(f, "{}'s turn", names.name(p)),
            Status::Won(p) => write!(f, "{} wins!", names.name(p)),
            Status::Draw => f.write_str("Tie game... you both lose!"),
            Status::AlreadyOver => f.write_str("The game is already over!"),
            Status::NotYourTurn(p) => write!(f, "HEY! LISTEN! It's {}'s turn!", names.name(p)),
            Status::SpotTaken => f.write_str("That spot is already taken!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_message() {
        let names = PlayerNames::default();
        let cases = [
            (Status::Started(Player::PlayerOne), "Player 1 starts the game"),
            (Status::Turn(Player::PlayerTwo), "Player 2's turn"),
            (Status::Won(Player::PlayerOne), "Player 1 wins!"),
            (Status::Draw, "Tie game... you both lose!"),
            (Status::AlreadyOver, "The game is already over!"),
            (Status::NotYourTurn(Player::PlayerTwo), "HEY! LISTEN! It's Player 2's turn!"),
            (Status::SpotTaken, "That spot is already taken!"),
        ];
        for (status, expected) in cases {
            assert_eq!(status.render(&names), expected);
        }
    }

    #[test]
    fn uses_custom_names() {
        let names = PlayerNames::try_new("Link", "Ganon").expect("non-empty");
        assert_eq!(Status::Won(Player::PlayerTwo).render(&names), "Ganon wins!");
    }

    #[test]
    fn blank_names_are_refused() {
        for (one, two) in [("", "Ganon"), ("Link", " \t")] {
            assert!(matches!(
                PlayerNames::try_new(one, two),
                Err(EngineError::Config(_))
            ));
        }
    }
}
