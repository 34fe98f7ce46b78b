use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// One finished solo game. `timestamp` is `YYYY-MM-DD HH:MM:SS`, so text order is time order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub difficulty: String,
    pub moves: u32,
    pub timestamp: String,
}

impl ScoreRecord {
    /// Record for a completed solo game, `None` for multiplayer, unfinished games or a blank name.
    pub fn from_engine(engine: &MatchEngine, difficulty: &str, timestamp: &str) -> Option<Self> {
        if !engine.is_game_over() || engine.roster().mode() != Mode::Solo {
            return None;
        }
        let name = engine.roster().name(0)?.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            difficulty: difficulty.to_string(),
            moves: engine.moves(),
            timestamp: timestamp.to_string(),
        })
    }

    fn rank_key(&self) -> (u32, &str) {
        (self.moves, self.timestamp.as_str())
    }
}

/// Append-only table of finished games; queries filter and sort on the fly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub const DEFAULT_TOP: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    /// Parses a stored table, falling back to an empty one if it is unreadable.
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Discarding unreadable leaderboard: {}", err);
            Self::default()
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn submit(&mut self, record: ScoreRecord) {
        log::debug!(
            "Leaderboard entry: {} on {} in {} moves",
            record.name,
            record.difficulty,
            record.moves
        );
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Fewest moves for this player on this difficulty, earliest first on ties.
    pub fn personal_best(&self, name: &str, difficulty: &str) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .filter(|record| record.name == name && record.difficulty == difficulty)
            .min_by(|a, b| a.rank_key().cmp(&b.rank_key()))
    }

    /// The best `n` games on `difficulty`, ranked by moves then timestamp.
    pub fn top(&self, difficulty: &str, n: usize) -> Vec<&ScoreRecord> {
        let mut ranked: Vec<&ScoreRecord> = self
            .records
            .iter()
            .filter(|record| record.difficulty == difficulty)
            .collect();
        ranked.sort_by(|a, b| a.rank_key().cmp(&b.rank_key()));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn record(name: &str, difficulty: &str, moves: u32, timestamp: &str) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            difficulty: difficulty.to_string(),
            moves,
            timestamp: timestamp.to_string(),
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::from_records(vec![
            record("ana", "Easy (2x2)", 4, "2025-01-02 10:00:00"),
            record("bo", "Easy (2x2)", 3, "2025-01-03 10:00:00"),
            record("ana", "Easy (2x2)", 3, "2025-01-04 10:00:00"),
            record("ana", "Medium (4x4)", 12, "2025-01-01 10:00:00"),
            record("cy", "Easy (2x2)", 2, "2025-01-05 10:00:00"),
        ])
    }

    #[test]
    fn top_filters_by_difficulty_and_ranks_ties_by_time() {
        let board = board();
        let top: Vec<_> = board
            .top("Easy (2x2)", 3)
            .into_iter()
            .map(|r| (r.name.as_str(), r.moves))
            .collect();

        assert_eq!(top, vec![("cy", 2), ("bo", 3), ("ana", 3)]);
        assert!(board.top("Hard (6x6)", 10).is_empty());
    }

    #[test]
    fn personal_best_matches_name_and_difficulty() {
        let board = board();

        let best = board.personal_best("ana", "Easy (2x2)").unwrap();
        assert_eq!(best.moves, 3);
        assert_eq!(best.timestamp, "2025-01-04 10:00:00");
        assert_eq!(board.personal_best("ana", "Medium (4x4)").map(|r| r.moves), Some(12));
        assert!(board.personal_best("dee", "Easy (2x2)").is_none());
    }

    #[test]
    fn stored_table_is_a_flat_list_of_rows() {
        let board = Leaderboard::from_records(vec![record("ana", "Easy (2x2)", 3, "2025-01-04 10:00:00")]);

        assert_eq!(
            board.to_json().unwrap(),
            r#"[{"name":"ana","difficulty":"Easy (2x2)","moves":3,"timestamp":"2025-01-04 10:00:00"}]"#
        );
        assert_eq!(Leaderboard::from_json_or_default("not json"), Leaderboard::new());
    }

    #[test]
    fn record_requires_finished_solo_game_with_a_name() {
        let deck = Deck::from_symbols(
            GameConfig::new_unchecked((2, 2)),
            &[Symbol(0), Symbol(0), Symbol(1), Symbol(1)],
        )
        .unwrap();
        let play = |name: &str| {
            let setup = GameSetup::solo(Difficulty::Easy, name);
            let mut engine = MatchEngine::new(setup, deck.clone(), EngineConfig::default()).unwrap();
            engine.reveal(0, 0).unwrap();
            engine.reveal(1, 0).unwrap();
            engine
        };

        let unfinished = play("ana");
        assert!(ScoreRecord::from_engine(&unfinished, "Easy (2x2)", "t").is_none());

        let mut finished = play(" ana ");
        finished.reveal(2, 0).unwrap();
        finished.reveal(3, 0).unwrap();
        let record = ScoreRecord::from_engine(&finished, "Easy (2x2)", "t").unwrap();
        assert_eq!(record.name, "ana");
        assert_eq!(record.moves, 2);

        let mut anonymous = play("  ");
        anonymous.reveal(2, 0).unwrap();
        anonymous.reveal(3, 0).unwrap();
        assert!(ScoreRecord::from_engine(&anonymous, "Easy (2x2)", "t").is_none());
    }
}
