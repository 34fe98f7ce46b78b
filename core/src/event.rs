use serde::{Deserialize, Serialize};

use crate::*;

/// Things that happened during a move, for audio and visual feedback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardRevealed {
        index: CellIndex,
        /// `false` for the second card of a comparison.
        first_pick: bool,
    },
    Matched {
        indices: [CellIndex; 2],
        player: PlayerId,
    },
    Mismatched {
        indices: [CellIndex; 2],
    },
    /// A mismatched pair flipped back after its cooldown.
    CardsHidden {
        indices: [CellIndex; 2],
        next_player: PlayerId,
    },
    GameCompleted {
        moves: u32,
        winners: Winners,
    },
}

impl GameEvent {
    pub const fn is_completion(&self) -> bool {
        matches!(self, Self::GameCompleted { .. })
    }
}
