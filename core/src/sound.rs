use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Short sine tones played as feedback for engine events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Flip,
    Match,
    Miss,
    Victory,
}

impl SoundCue {
    pub const AMPLITUDE: f32 = 0.3;

    pub const fn frequency_hz(self) -> f32 {
        use SoundCue::*;
        match self {
            Flip => 440.0,
            Match => 660.0,
            Miss => 220.0,
            Victory => 880.0,
        }
    }

    pub const fn duration(self) -> Duration {
        use SoundCue::*;
        match self {
            Flip => Duration::from_millis(100),
            Match => Duration::from_millis(300),
            Miss => Duration::from_millis(200),
            Victory => Duration::from_millis(500),
        }
    }

    /// Only the first card of a pair gets the flip tone, the second is covered by match or miss.
    pub const fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CardRevealed {
                first_pick: true, ..
            } => Some(Self::Flip),
            GameEvent::CardRevealed { .. } => None,
            GameEvent::Matched { .. } => Some(Self::Match),
            GameEvent::Mismatched { .. } => Some(Self::Miss),
            GameEvent::CardsHidden { .. } => None,
            GameEvent::GameCompleted { .. } => Some(Self::Victory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn final_pair_plays_match_then_victory() {
        let deck = Deck::from_symbols(
            GameConfig::new_unchecked((2, 2)),
            &[Symbol(0), Symbol(1), Symbol(1), Symbol(0)],
        )
        .unwrap();
        let setup = GameSetup::solo(Difficulty::Easy, "ana");
        let mut engine = MatchEngine::new(setup, deck, EngineConfig::default()).unwrap();

        engine.reveal(0, 0).unwrap();
        engine.reveal(1, 0).unwrap();
        engine.resolve_cooldown(2000);
        engine.reveal(0, 2000).unwrap();
        engine.reveal(3, 2000).unwrap();
        engine.reveal(1, 2000).unwrap();
        engine.reveal(2, 2000).unwrap();

        let cues: Vec<_> = engine
            .take_events()
            .iter()
            .filter_map(SoundCue::for_event)
            .collect();
        assert_eq!(
            cues,
            [
                SoundCue::Flip,
                SoundCue::Miss,
                SoundCue::Flip,
                SoundCue::Match,
                SoundCue::Flip,
                SoundCue::Match,
                SoundCue::Victory,
            ]
        );
    }
}
