use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every preset plays on the same 31×31 board, only the mine density changes.
pub const BOARD_SIZE: Coord2 = (31, 31);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub mines: CellCount,
    pub assist_uses: u8,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn profile(self) -> DifficultyProfile {
        use Difficulty::*;
        match self {
            Easy => DifficultyProfile {
                mines: 181,
                assist_uses: 2,
            },
            Medium => DifficultyProfile {
                mines: 254,
                assist_uses: 3,
            },
            Hard => DifficultyProfile {
                mines: 331,
                assist_uses: 4,
            },
        }
    }

    pub const fn key(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    pub const fn game_config(self) -> GameConfig {
        let profile = self.profile();
        GameConfig::new_unchecked(BOARD_SIZE, profile.mines, profile.assist_uses)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.key() == key)
            .ok_or_else(|| GameError::UnknownDifficulty(key.into()))
    }
}

/// Board shape plus the numbers a session needs to set itself up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    pub assist_uses: u8,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount, assist_uses: u8) -> Self {
        Self {
            size,
            mines,
            assist_uses,
        }
    }

    pub fn new(size: Coord2, mines: CellCount, assist_uses: u8) -> Result<Self> {
        let config = Self::new_unchecked(size, mines, assist_uses);
        config.validate()?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Checks the mine count against the largest safe zone this board can have, so placement cannot fail
    /// wherever the first move lands.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidCoords);
        }
        let widest_safe_zone = mult(rows.min(3), cols.min(3));
        let available = self.total_cells() - widest_safe_zone;
        if self.mines >= available {
            return Err(GameError::Configuration {
                mines: self.mines,
                available,
            });
        }
        Ok(())
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.game_config()
    }
}
