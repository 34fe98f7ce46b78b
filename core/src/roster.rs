use alloc::format;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub const MAX_PLAYERS: usize = 4;

/// Player ids tied for the lead.
pub type Winners = SmallVec<[PlayerId; MAX_PLAYERS]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Solo,
    Multiplayer,
}

impl Mode {
    pub const fn player_range(self) -> (usize, usize) {
        match self {
            Self::Solo => (1, 1),
            Self::Multiplayer => (2, MAX_PLAYERS),
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Solo
    }
}

/// Who is playing, whose turn it is and how many pairs each player has found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    mode: Mode,
    names: SmallVec<[String; MAX_PLAYERS]>,
    scores: SmallVec<[CellCount; MAX_PLAYERS]>,
    current: PlayerId,
}

impl Roster {
    pub fn new<S: AsRef<str>>(mode: Mode, names: &[S]) -> Result<Self> {
        let (min, max) = mode.player_range();
        if names.len() < min || names.len() > max {
            return Err(GameError::InvalidPlayerCount {
                mode,
                count: names.len(),
            });
        }

        Ok(Self {
            mode,
            names: names.iter().map(|name| name.as_ref().to_string()).collect(),
            scores: SmallVec::from_elem(0, names.len()),
            current: 0,
        })
    }

    pub fn solo(name: &str) -> Self {
        Self {
            mode: Mode::Solo,
            names: smallvec::smallvec![name.to_string()],
            scores: smallvec::smallvec![0],
            current: 0,
        }
    }

    pub fn multiplayer<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        Self::new(Mode::Multiplayer, names)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn player_count(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(usize::from(player)).map(String::as_str)
    }

    /// Name to show for `player`, with a generic fallback for blank names.
    pub fn display_name(&self, player: PlayerId) -> String {
        match self.name(player).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => match self.mode {
                Mode::Solo => "Player".to_string(),
                Mode::Multiplayer => format!("Player {}", usize::from(player) + 1),
            },
        }
    }

    pub fn scores(&self) -> &[CellCount] {
        &self.scores
    }

    pub fn score(&self, player: PlayerId) -> CellCount {
        self.scores.get(usize::from(player)).copied().unwrap_or(0)
    }

    /// Meaningful only in multiplayer; always `0` in solo.
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Everyone sharing the highest score; in solo that is the lone player.
    pub fn winners(&self) -> Winners {
        if self.mode == Mode::Solo {
            return smallvec::smallvec![0];
        }
        let best = self.scores.iter().copied().max().unwrap_or(0);
        self.scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == best)
            .map(|(player, _)| player as PlayerId)
            .collect()
    }

    pub(crate) fn award_pair(&mut self) {
        if self.mode == Mode::Multiplayer {
            if let Some(score) = self.scores.get_mut(usize::from(self.current)) {
                *score += 1;
            }
        }
    }

    pub(crate) fn pass_turn(&mut self) -> PlayerId {
        if self.mode == Mode::Multiplayer {
            let count = self.names.len().max(1);
            self.current = ((usize::from(self.current) + 1) % count) as PlayerId;
        }
        self.current
    }

    /// Player count fits the mode, one score per player, and the turn points at a player.
    pub fn validate(&self) -> Result<()> {
        let count = self.names.len();
        let (min, max) = self.mode.player_range();
        if count < min || count > max {
            return Err(GameError::InvalidPlayerCount {
                mode: self.mode,
                count,
            });
        }
        if self.scores.len() != count || usize::from(self.current) >= count {
            return Err(GameError::InconsistentState);
        }
        Ok(())
    }

    /// Same players and mode, scores and turn pointer back at the start.
    pub(crate) fn reset(&mut self) {
        self.scores.iter_mut().for_each(|score| *score = 0);
        self.current = 0;
    }
}
