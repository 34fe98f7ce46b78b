use serde::{Deserialize, Serialize};

/// Canonical player-visible state of a single card stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    /// Face up as part of the current, unresolved selection.
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}
