#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use leaderboard::*;
pub use roster::*;
pub use sound::*;
pub use types::*;

mod card;
mod deck;
mod engine;
mod error;
mod event;
mod leaderboard;
mod roster;
mod sound;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new(size: Coord2) -> Result<Self> {
        let config = Self::new_unchecked(size);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.total_cells() % 2 != 0 {
            return Err(GameError::OddCellCount);
        }
        let available = SYMBOLS.len() as CellCount;
        if self.num_pairs() > available {
            return Err(GameError::TooManyPairs {
                requested: self.num_pairs(),
                available,
            });
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn num_pairs(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        index_to_coords(index, self.size).ok_or(GameError::InvalidIndex)
    }

    pub fn index_of(&self, coords: Coord2) -> Result<CellIndex> {
        coords_to_index(coords, self.size).ok_or(GameError::InvalidIndex)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn game_config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((2, 2)),
            Medium => GameConfig::new_unchecked((4, 4)),
            Hard => GameConfig::new_unchecked((6, 6)),
        }
    }

    /// Label stored alongside leaderboard records.
    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy (2x2)",
            Medium => "Medium (4x4)",
            Hard => "Hard (6x6)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Timing knobs of the engine, all expressed in host time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long a mismatched pair stays face up before flipping back.
    pub cooldown: Duration,
}

impl EngineConfig {
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1500);

    pub const fn with_cooldown(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    pub(crate) fn cooldown_millis(&self) -> Millis {
        self.cooldown.as_millis().try_into().unwrap_or(Millis::MAX)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_cooldown(Self::DEFAULT_COOLDOWN)
    }
}

/// Everything needed to deal a new game: board and who is playing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub config: GameConfig,
    pub roster: Roster,
}

impl GameSetup {
    pub fn new(config: GameConfig, roster: Roster) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, roster })
    }

    pub fn solo(difficulty: Difficulty, name: &str) -> Self {
        Self {
            config: difficulty.game_config(),
            roster: Roster::solo(name),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// First card of a pair turned face up.
    Revealed,
    Matched,
    Mismatched,
    /// The last pair was matched.
    Completed,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Revealed => true,
            Matched => true,
            Mismatched => true,
            Completed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CooldownOutcome {
    /// No mismatched pair is pending.
    NoChange,
    /// A mismatched pair is pending, `remaining` milliseconds to go.
    Pending { remaining: Millis },
    /// The mismatched pair was flipped back.
    Hidden {
        indices: [CellIndex; 2],
        next_player: PlayerId,
    },
}

impl CooldownOutcome {
    pub const fn has_update(self) -> bool {
        use CooldownOutcome::*;
        match self {
            NoChange => false,
            Pending { .. } => false,
            Hidden { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_rejects_bad_boards() {
        assert_eq!(GameConfig::new((0, 4)), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new((3, 3)), Err(GameError::OddCellCount));
        assert_eq!(
            GameConfig::new((8, 8)),
            Err(GameError::TooManyPairs {
                requested: 32,
                available: 18
            })
        );
        assert_eq!(GameConfig::new((2, 3)).map(|c| c.num_pairs()), Ok(3));
    }

    #[test]
    fn presets_fit_the_alphabet() {
        for difficulty in Difficulty::ALL {
            assert!(difficulty.game_config().validate().is_ok());
            assert_eq!(Difficulty::from_label(difficulty.label()), Some(difficulty));
        }
        assert_eq!(Difficulty::Hard.game_config().num_pairs(), 18);
    }

    #[test]
    fn default_cooldown_is_one_and_a_half_seconds() {
        assert_eq!(EngineConfig::default().cooldown_millis(), 1500);
    }
}
