use concentration_core::*;

fn deck(size: Coord2, raw: &[u8]) -> Deck {
    let symbols: Vec<Symbol> = raw.iter().copied().map(Symbol).collect();
    Deck::from_symbols(GameConfig::new_unchecked(size), &symbols).unwrap()
}

#[test]
fn solo_two_by_two_walkthrough() {
    // A B / A B
    let setup = GameSetup::solo(Difficulty::Easy, "ana");
    let mut engine = MatchEngine::new(setup, deck((2, 2), &[0, 1, 0, 1]), EngineConfig::default()).unwrap();

    engine.reveal(0, 0).unwrap();
    assert_eq!(engine.reveal(1, 100).unwrap(), RevealOutcome::Mismatched);
    assert!(engine.is_waiting());
    assert_eq!(engine.moves(), 1);

    assert!(!engine.resolve_cooldown(1000).has_update());
    assert!(engine.resolve_cooldown(1600).has_update());
    assert_eq!(engine.card_at(0), Some(CardState::Hidden));
    assert_eq!(engine.card_at(1), Some(CardState::Hidden));

    engine.reveal(0, 2000).unwrap();
    assert_eq!(engine.reveal(2, 2100).unwrap(), RevealOutcome::Matched);
    assert_eq!(engine.matched_pairs(), 1);
    assert_eq!(engine.moves(), 2);

    engine.reveal(1, 2200).unwrap();
    assert_eq!(engine.reveal(3, 2300).unwrap(), RevealOutcome::Completed);
    assert_eq!(engine.matched_pairs(), engine.num_pairs());
    assert_eq!(engine.state(), EngineState::Completed);
    assert_eq!(engine.moves(), 3);

    let efficiency = engine.efficiency().unwrap();
    assert!((efficiency - 66.666_67).abs() < 0.01);
    assert_eq!(engine.progress_percent(), 100.0);
    assert_eq!(engine.winners().as_slice(), &[0]);
    assert_eq!(engine.elapsed(99_999), 2300);

    let mut board = Leaderboard::new();
    let label = Difficulty::Easy.label();
    board.submit(ScoreRecord::from_engine(&engine, label, "2025-06-01 12:00:00").unwrap());
    assert_eq!(board.personal_best("ana", label).map(|r| r.moves), Some(3));
}

#[test]
fn multiplayer_tie_returns_both_leaders() {
    // four pairs: players alternate, each scoring two
    let roster = Roster::multiplayer(&["ana", "bo"]).unwrap();
    let setup = GameSetup::new(GameConfig::new((2, 4)).unwrap(), roster).unwrap();
    let mut engine =
        MatchEngine::new(setup, deck((2, 4), &[0, 0, 1, 1, 2, 2, 3, 3]), EngineConfig::default()).unwrap();

    let mut now = 0;
    let mut pair = |engine: &mut MatchEngine, a: CellIndex, b: CellIndex| {
        now += 2000;
        engine.resolve_cooldown(now);
        engine.reveal(a, now).unwrap();
        engine.reveal(b, now).unwrap()
    };

    assert_eq!(pair(&mut engine, 0, 1), RevealOutcome::Matched);
    assert_eq!(pair(&mut engine, 2, 3), RevealOutcome::Matched);
    assert_eq!(pair(&mut engine, 4, 6), RevealOutcome::Mismatched);
    assert_eq!(pair(&mut engine, 4, 5), RevealOutcome::Matched);
    assert_eq!(engine.current_player(), 1);
    assert_eq!(pair(&mut engine, 6, 7), RevealOutcome::Completed);

    assert_eq!(engine.roster().scores(), &[2, 2]);
    assert_eq!(engine.winners().as_slice(), &[0, 1]);

    let events = engine.take_events();
    assert!(events.contains(&GameEvent::CardsHidden {
        indices: [4, 6],
        next_player: 1
    }));
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameCompleted { moves: 5, winners }) if winners.as_slice() == [0, 1]
    ));
    assert!(ScoreRecord::from_engine(&engine, "Medium (4x4)", "t").is_none());
}

#[test]
fn seeded_games_cover_every_preset() {
    for difficulty in Difficulty::ALL {
        let setup = GameSetup::solo(difficulty, "ana");
        let engine = MatchEngine::deal(setup, RandomDeckGenerator::new(11), EngineConfig::default()).unwrap();
        let config = difficulty.game_config();

        assert_eq!(engine.config(), config);
        assert_eq!(engine.deck().iter().count(), usize::from(config.total_cells()));
        for symbol in 0..config.num_pairs() {
            let copies = engine.deck().iter().filter(|s| s.0 as u16 == symbol).count();
            assert_eq!(copies, 2, "{difficulty:?} symbol {symbol}");
        }
    }
}

#[test]
fn engine_survives_storage_round_trip_mid_cooldown() {
    let setup = GameSetup::solo(Difficulty::Easy, "ana");
    let mut engine = MatchEngine::new(setup, deck((2, 2), &[0, 1, 0, 1]), EngineConfig::default()).unwrap();
    engine.reveal(0, 0).unwrap();
    engine.reveal(1, 0).unwrap();

    let stored = serde_json::to_string(&engine).unwrap();
    let mut restored: MatchEngine = serde_json::from_str(&stored).unwrap();

    assert!(restored.take_events().is_empty());
    assert_eq!(restored.state(), EngineState::Waiting);
    assert!(restored.resolve_cooldown(1500).has_update());
}

fn stored_mid_turn() -> serde_json::Value {
    let setup = GameSetup::solo(Difficulty::Easy, "ana");
    let mut engine = MatchEngine::new(setup, deck((2, 2), &[0, 1, 0, 1]), EngineConfig::default()).unwrap();
    engine.reveal(0, 0).unwrap();
    serde_json::to_value(&engine).unwrap()
}

#[test]
fn tampered_storage_is_rejected() {
    assert!(serde_json::from_value::<MatchEngine>(stored_mid_turn()).is_ok());

    let mut board_shape = stored_mid_turn();
    board_shape["board"]["dim"] = serde_json::json!([1, 2]);
    board_shape["board"]["data"] = serde_json::json!(["Revealed", "Hidden"]);
    assert!(serde_json::from_value::<MatchEngine>(board_shape).is_err());

    let mut unpaired = stored_mid_turn();
    unpaired["deck"]["symbols"]["data"] = serde_json::json!([0, 0, 0, 1]);
    assert!(serde_json::from_value::<MatchEngine>(unpaired).is_err());

    let mut hidden_pick = stored_mid_turn();
    hidden_pick["selection"] = serde_json::json!({ "One": 3 });
    assert!(serde_json::from_value::<MatchEngine>(hidden_pick).is_err());

    let mut lost_turn = stored_mid_turn();
    lost_turn["roster"]["current"] = serde_json::json!(1);
    assert!(serde_json::from_value::<MatchEngine>(lost_turn).is_err());
}
