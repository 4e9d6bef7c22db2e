use serde::{Deserialize, Serialize};

use crate::board::check_grid_size;
use crate::error::EngineError;
use crate::status::{PlayerNames, DEFAULT_PLAYER_ONE_NAME, DEFAULT_PLAYER_TWO_NAME};

/// Settings for a new game session. Deserialised from the optional object passed to the
/// JavaScript constructor, so every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Width and height of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Display name of the opening player.
    #[serde(default = "default_player_one_name")]
    pub player_one_name: String,
    /// Display name of the second player.
    #[serde(default = "default_player_two_name")]
    pub player_two_name: String,
}

fn default_grid_size() -> usize {
    3
}
fn default_player_one_name() -> String {
    DEFAULT_PLAYER_ONE_NAME.to_owned()
}
fn default_player_two_name() -> String {
    DEFAULT_PLAYER_TWO_NAME.to_owned()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            player_one_name: default_player_one_name(),
            player_two_name: default_player_two_name(),
        }
    }
}

impl EngineConfig {
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        check_grid_size(self.grid_size)?;
        self.names().map(drop)
    }

    pub fn names(&self) -> Result<PlayerNames, EngineError> {
        PlayerNames::try_new(self.player_one_name.clone(), self.player_two_name.clone())
    }
}
