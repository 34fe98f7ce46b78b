use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Card faces, in the order they are dealt: a board with `n` pairs uses the first `n`.
pub const SYMBOLS: [&str; 18] = [
    "🐶", "🐱", "🐭", "🦊", "🐻", "🐼", "🐨", "🐯", "🐸", "🐵", "🐔", "🐧", "🐴", "🦄", "🐝", "🐢",
    "🐙", "🦋",
];

/// Index into [`SYMBOLS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    pub fn glyph(self) -> &'static str {
        SYMBOLS.get(usize::from(self.0)).copied().unwrap_or("?")
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self(0)
    }
}

/// The face of every card on the board, each symbol exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    symbols: Array2<Symbol>,
}

impl Deck {
    /// Builds a deck from an explicit row-major layout.
    pub fn from_symbols(config: GameConfig, symbols: &[Symbol]) -> Result<Self> {
        config.validate()?;

        let total = usize::from(config.total_cells());
        if symbols.len() != total {
            return Err(GameError::InvalidDeck);
        }

        check_pairs(config, symbols.iter().copied())?;

        let symbols = Array2::from_shape_vec(config.size.to_nd_index(), symbols.to_vec())
            .map_err(|_| GameError::InvalidDeck)?;
        Ok(Self { symbols })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size())
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.symbols.dim();
        (dim.0.try_into().unwrap_or(Coord::MAX), dim.1.try_into().unwrap_or(Coord::MAX))
    }

    pub fn symbol_at(&self, index: CellIndex) -> Option<Symbol> {
        let coords = index_to_coords(index, self.size())?;
        Some(self.symbols[coords.to_nd_index()])
    }

    /// Checks a deck that did not come through [`Deck::from_symbols`], e.g. one read back from storage.
    pub fn validate(&self) -> Result<()> {
        let config = self.game_config();
        config.validate()?;
        check_pairs(config, self.iter())
    }

    /// Row-major iteration over every card face.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}

impl Index<Coord2> for Deck {
    type Output = Symbol;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.symbols[(row as usize, col as usize)]
    }
}

/// Every one of the first `num_pairs` symbols must appear exactly twice, and nothing else.
fn check_pairs(config: GameConfig, symbols: impl Iterator<Item = Symbol>) -> Result<()> {
    let mut counts: Vec<u8> = alloc::vec![0; usize::from(config.num_pairs())];
    for symbol in symbols {
        let slot = counts
            .get_mut(usize::from(symbol.0))
            .ok_or(GameError::InvalidDeck)?;
        *slot = slot.saturating_add(1);
    }
    if counts.iter().any(|&count| count != 2) {
        return Err(GameError::InvalidDeck);
    }
    Ok(())
}

pub trait DeckGenerator {
    fn generate(self, config: GameConfig) -> Result<Deck>;
}

/// Deals the first `num_pairs` symbols twice and shuffles them, reproducibly for a given seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: GameConfig) -> Result<Deck> {
        use rand::prelude::*;

        config.validate()?;

        let num_pairs = config.num_pairs();
        let mut symbols: Vec<Symbol> = (0..num_pairs)
            .chain(0..num_pairs)
            .map(|pair| Symbol(pair as u8))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..symbols.len()).rev() {
            let j = rng.random_range(0..=i);
            symbols.swap(i, j);
        }

        log::debug!(
            "Dealt {}x{} deck with {} pairs (seed {})",
            config.rows(),
            config.cols(),
            num_pairs,
            self.seed
        );
        Deck::from_symbols(config, &symbols)
    }
}
