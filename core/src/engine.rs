use alloc::vec::Vec;
use core::mem;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    OneSelected,
    /// A mismatched pair is face up until the cooldown runs out.
    Waiting,
    Completed,
}

impl EngineState {
    pub const fn accepts_reveal(self) -> bool {
        matches!(self, Self::Idle | Self::OneSelected)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Cards picked in the current turn that are not resolved yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    None,
    One(CellIndex),
    Mismatched {
        first: CellIndex,
        second: CellIndex,
        since: Millis,
    },
}

impl Default for Selection {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineData")]
pub struct MatchEngine {
    deck: Deck,
    board: Array2<CardState>,
    roster: Roster,
    timing: EngineConfig,
    selection: Selection,
    moves: u32,
    matched_pairs: CellCount,
    finished: bool,
    last_match: bool,
    started_at: Option<Millis>,
    finished_at: Option<Millis>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

/// Serialized shape of [`MatchEngine`], checked with [`MatchEngine::validate`] before use.
#[derive(Deserialize)]
struct EngineData {
    deck: Deck,
    board: Array2<CardState>,
    roster: Roster,
    timing: EngineConfig,
    selection: Selection,
    moves: u32,
    matched_pairs: CellCount,
    finished: bool,
    last_match: bool,
    started_at: Option<Millis>,
    finished_at: Option<Millis>,
}

impl TryFrom<EngineData> for MatchEngine {
    type Error = GameError;

    fn try_from(data: EngineData) -> Result<Self> {
        let engine = Self {
            deck: data.deck,
            board: data.board,
            roster: data.roster,
            timing: data.timing,
            selection: data.selection,
            moves: data.moves,
            matched_pairs: data.matched_pairs,
            finished: data.finished,
            last_match: data.last_match,
            started_at: data.started_at,
            finished_at: data.finished_at,
            events: Vec::new(),
        };
        engine.validate()?;
        Ok(engine)
    }
}

impl MatchEngine {
    pub fn new(setup: GameSetup, deck: Deck, timing: EngineConfig) -> Result<Self> {
        let GameSetup { config, mut roster } = setup;
        config.validate()?;
        if deck.game_config() != config {
            return Err(GameError::InvalidDeck);
        }
        roster.reset();

        log::debug!(
            "New {:?} game on {}x{} board for {} player(s)",
            roster.mode(),
            config.rows(),
            config.cols(),
            roster.player_count()
        );

        Ok(Self {
            board: Array2::default(config.size.to_nd_index()),
            deck,
            roster,
            timing,
            selection: Selection::None,
            moves: 0,
            matched_pairs: 0,
            finished: false,
            last_match: false,
            started_at: None,
            finished_at: None,
            events: Vec::new(),
        })
    }

    /// Deals a fresh deck for `setup` and builds an engine around it.
    pub fn deal<G: DeckGenerator>(setup: GameSetup, generator: G, timing: EngineConfig) -> Result<Self> {
        let deck = generator.generate(setup.config)?;
        Self::new(setup, deck, timing)
    }

    /// Throws away the current game, including any pending cooldown and queued events.
    pub fn new_game<G: DeckGenerator>(&mut self, setup: GameSetup, generator: G) -> Result<()> {
        *self = Self::deal(setup, generator, self.timing)?;
        Ok(())
    }

    /// Same board size and players, new deck.
    pub fn restart<G: DeckGenerator>(&mut self, generator: G) -> Result<()> {
        self.new_game(self.setup(), generator)
    }

    pub fn setup(&self) -> GameSetup {
        GameSetup {
            config: self.config(),
            roster: self.roster.clone(),
        }
    }

    /// Checks that an engine restored from storage could have been reached by playing.
    pub fn validate(&self) -> Result<()> {
        self.deck.validate()?;
        self.roster.validate()?;

        let config = self.config();
        if self.board.dim() != (usize::from(config.rows()), usize::from(config.cols())) {
            return Err(GameError::InconsistentState);
        }

        let matched = self
            .board
            .iter()
            .filter(|&&card| card == CardState::Matched)
            .count();
        if self.matched_pairs > config.num_pairs() || matched != 2 * usize::from(self.matched_pairs) {
            return Err(GameError::InconsistentState);
        }
        if self.finished != (self.matched_pairs == config.num_pairs()) {
            return Err(GameError::InconsistentState);
        }

        let face_up_pick = |index: CellIndex| self.card_at(index) == Some(CardState::Revealed);
        let selection_ok = match self.selection {
            Selection::None => true,
            Selection::One(index) => face_up_pick(index),
            Selection::Mismatched { first, second, .. } => {
                first != second && face_up_pick(first) && face_up_pick(second)
            }
        };
        if !selection_ok {
            return Err(GameError::InconsistentState);
        }
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        if self.finished {
            return EngineState::Completed;
        }
        match self.selection {
            Selection::None => EngineState::Idle,
            Selection::One(_) => EngineState::OneSelected,
            Selection::Mismatched { .. } => EngineState::Waiting,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.finished
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.selection, Selection::Mismatched { .. })
    }

    pub fn config(&self) -> GameConfig {
        self.deck.game_config()
    }

    pub fn timing(&self) -> EngineConfig {
        self.timing
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn board(&self) -> &Array2<CardState> {
        &self.board
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn card_at(&self, index: CellIndex) -> Option<CardState> {
        let coords = index_to_coords(index, self.deck.size())?;
        Some(self.board[coords.to_nd_index()])
    }

    /// The symbol on `index` if that card is currently face up.
    pub fn face_at(&self, index: CellIndex) -> Option<Symbol> {
        self.card_at(index)
            .filter(|card| card.is_face_up())
            .and_then(|_| self.deck.symbol_at(index))
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> CellCount {
        self.matched_pairs
    }

    pub fn num_pairs(&self) -> CellCount {
        self.config().num_pairs()
    }

    pub fn current_player(&self) -> PlayerId {
        self.roster.current_player()
    }

    pub fn winners(&self) -> Winners {
        self.roster.winners()
    }

    /// Whether the latest comparison found a pair.
    pub fn last_match(&self) -> bool {
        self.last_match
    }

    pub fn progress_percent(&self) -> f32 {
        match self.num_pairs() {
            0 => 0.0,
            pairs => 100.0 * f32::from(self.matched_pairs) / f32::from(pairs),
        }
    }

    /// Optimal move count over actual move count, as a percentage.
    pub fn efficiency(&self) -> Option<f32> {
        if self.moves == 0 {
            return None;
        }
        Some(f32::from(self.num_pairs()) / self.moves as f32 * 100.0)
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Millis> {
        self.finished_at
    }

    /// Play time so far, frozen once the game is completed.
    pub fn elapsed(&self, now: Millis) -> Millis {
        match self.started_at {
            Some(started_at) => self.finished_at.unwrap_or(now).saturating_sub(started_at),
            None => 0,
        }
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn reveal(&mut self, index: CellIndex, now: Millis) -> Result<RevealOutcome> {
        let index = self.config().validate_index(index)?;
        self.check_not_finished()?;

        let first = match self.selection {
            Selection::Mismatched { .. } => return Err(GameError::AwaitingCooldown),
            Selection::One(first) => Some(first),
            Selection::None => None,
        };

        if self.card_at(index) != Some(CardState::Hidden) {
            return Err(GameError::CardAlreadyOpen);
        }

        self.set_card(index, CardState::Revealed);
        self.mark_started(now);
        self.events.push(GameEvent::CardRevealed {
            index,
            first_pick: first.is_none(),
        });

        match first {
            None => {
                log::trace!("Revealed first card {}", index);
                self.selection = Selection::One(index);
                Ok(RevealOutcome::Revealed)
            }
            Some(first) => Ok(self.compare(first, index, now)),
        }
    }

    pub fn resolve_cooldown(&mut self, now: Millis) -> CooldownOutcome {
        let Selection::Mismatched {
            first,
            second,
            since,
        } = self.selection
        else {
            return CooldownOutcome::NoChange;
        };

        let elapsed = now.saturating_sub(since);
        let cooldown = self.timing.cooldown_millis();
        if elapsed < cooldown {
            log::trace!("Cooldown pending, {} ms left", cooldown - elapsed);
            return CooldownOutcome::Pending {
                remaining: cooldown - elapsed,
            };
        }

        let indices = [first, second];
        self.set_card(first, CardState::Hidden);
        self.set_card(second, CardState::Hidden);
        self.selection = Selection::None;
        self.last_match = false;
        let next_player = self.roster.pass_turn();

        log::debug!("Flipped back {:?}, player {} to move", indices, next_player);
        self.events.push(GameEvent::CardsHidden {
            indices,
            next_player,
        });
        CooldownOutcome::Hidden {
            indices,
            next_player,
        }
    }

    fn compare(&mut self, first: CellIndex, second: CellIndex, now: Millis) -> RevealOutcome {
        let indices = [first, second];
        self.moves += 1;

        if self.deck.symbol_at(first) != self.deck.symbol_at(second) {
            log::debug!("Mismatch at {:?} on move {}", indices, self.moves);
            self.selection = Selection::Mismatched {
                first,
                second,
                since: now,
            };
            self.last_match = false;
            self.events.push(GameEvent::Mismatched { indices });
            return RevealOutcome::Mismatched;
        }

        self.set_card(first, CardState::Matched);
        self.set_card(second, CardState::Matched);
        self.selection = Selection::None;
        self.matched_pairs += 1;
        self.last_match = true;
        self.roster.award_pair();

        let player = self.roster.current_player();
        log::debug!(
            "Match at {:?} by player {}, {}/{} pairs",
            indices,
            player,
            self.matched_pairs,
            self.num_pairs()
        );
        self.events.push(GameEvent::Matched { indices, player });

        if self.matched_pairs == self.num_pairs() {
            self.finish(now);
            RevealOutcome::Completed
        } else {
            RevealOutcome::Matched
        }
    }

    fn finish(&mut self, now: Millis) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.finished_at = Some(now);

        let winners = self.roster.winners();
        log::debug!("Game completed in {} moves, winners {:?}", self.moves, winners);
        self.events.push(GameEvent::GameCompleted {
            moves: self.moves,
            winners,
        });
    }

    fn mark_started(&mut self, now: Millis) {
        if self.started_at.is_none() {
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn set_card(&mut self, index: CellIndex, state: CardState) {
        if let Some(coords) = index_to_coords(index, self.deck.size()) {
            self.board[coords.to_nd_index()] = state;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.finished {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
