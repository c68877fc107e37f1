use std::{fmt, fs, path::Path};

use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{DEFAULT_SIZE, MAX_SIZE},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn mines(self) -> usize {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
        }
    }

    /// Reads an answer to the difficulty menu, either its number or its name. Anything that isn't
    /// recognized is Easy.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim().to_ascii_lowercase().as_str() {
            "2" | "medium" => Self::Medium,
            "3" | "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

/// Everything needed to set up a game. Missing fields in a settings file take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub size: usize,
    /// Asked for interactively when not set
    pub difficulty: Option<Difficulty>,
    /// Overrides the difficulty's mine count
    pub mines: Option<usize>,
    pub seed: Option<u64>,
    /// Refuse to reveal a flagged cell directly
    pub protect_flags: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            difficulty: None,
            mines: None,
            seed: None,
            protect_flags: false,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadSettings {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ParseSettings {
            path: path.to_owned(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::EmptyBoard);
        }
        if self.size > MAX_SIZE {
            return Err(Error::BoardTooLarge {
                size: self.size,
                max: MAX_SIZE,
            });
        }
        let cells = self.size * self.size;
        match self.mines {
            Some(mines) if mines >= cells => Err(Error::TooManyMines {
                requested: mines,
                cells,
            }),
            _ => Ok(()),
        }
    }

    pub fn mine_count(&self, difficulty: Difficulty) -> usize {
        self.mines.unwrap_or_else(|| difficulty.mines())
    }

    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
