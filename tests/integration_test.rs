use footbot_game_engine::{
    GameEngine, GameEngineError, GameOptions, HintKind, HintSchedule, Player, SqliteStore,
    StaticCatalog, MAX_REVEALS,
};
use std::sync::Arc;

fn mbappe() -> Player {
    let mut player = Player::new("231747", "Kylian", "Mbappé");
    player.position = "ST".to_string();
    player.nationality = "France".to_string();
    player.club = "Real Madrid".to_string();
    player.overall = 91;
    player.preferred_foot = "Right".to_string();
    player
}

fn single_player_catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog::new(vec![mbappe()]))
}

async fn engine_with(catalog: Arc<StaticCatalog>) -> GameEngine {
    GameEngine::with_sqlite(catalog, ":memory:").await.unwrap()
}

#[tokio::test]
async fn test_full_winning_game() {
    let engine = engine_with(single_player_catalog()).await;

    let started = engine.start_game("user-1").await.unwrap();
    assert_eq!(started.hint.kind, HintKind::Position);
    assert_eq!(started.hint.value, "ST");

    // Wrong guess keeps the session open
    let miss = engine.submit_guess("user-1", "Lewandowski").await.unwrap();
    assert!(!miss.is_correct);
    assert!(miss.hints_remaining);

    // Reveal one hint, then win: 2 hints used -> 4 points
    let clue = engine.reveal_next_clue("user-1").await.unwrap();
    assert_eq!(clue.hints_revealed, 2);
    assert_eq!(clue.hint.as_ref().unwrap().kind, HintKind::Nationality);
    assert_eq!(clue.hint.as_ref().unwrap().value, "France");

    let win = engine.submit_guess("user-1", "mbappe").await.unwrap();
    assert!(win.is_correct);
    assert_eq!(win.score, Some(4));
    assert_eq!(win.player.as_ref().unwrap().id, "231747");

    // History carries the miss, the reveal event and the winning guess
    assert_eq!(win.guesses.len(), 3);
    assert!(win.guesses[2].is_correct);

    // Session is closed: a further guess has no game to act on
    let err = engine.submit_guess("user-1", "mbappe").await.unwrap_err();
    assert!(matches!(err, GameEngineError::NoActiveGame));

    let stats = engine.stats("user-1").await.unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.correct_guesses, 1);
    assert_eq!(stats.total_score, 4);
    assert_eq!(stats.avg_hints_used, 2.0);
    assert_eq!(stats.current_streak, 1);
}

#[tokio::test]
async fn test_guess_tolerates_normalization_noise() {
    let engine = engine_with(single_player_catalog()).await;
    engine.start_game("user-1").await.unwrap();

    // Exact display name with casing, accent and punctuation noise
    let win = engine.submit_guess("user-1", "KYLIAN MBAPPÉ!!").await.unwrap();
    assert!(win.is_correct);
    assert_eq!(win.score, Some(5));
}

#[tokio::test]
async fn test_surname_only_guess_wins() {
    let engine = engine_with(single_player_catalog()).await;
    engine.start_game("user-1").await.unwrap();

    let win = engine.submit_guess("user-1", "mbappe").await.unwrap();
    assert!(win.is_correct);
}

#[tokio::test]
async fn test_multi_word_surname_fragment_wins() {
    let mut keeper = Player::new("252070", "Michele", "Di Gregorio");
    keeper.position = "GK".to_string();
    keeper.nationality = "Italy".to_string();
    keeper.club = "Juventus".to_string();
    keeper.overall = 84;
    let engine = engine_with(Arc::new(StaticCatalog::new(vec![keeper]))).await;

    engine.start_game("user-1").await.unwrap();
    let win = engine.submit_guess("user-1", "di gregorio").await.unwrap();
    assert!(win.is_correct);
}

#[tokio::test]
async fn test_hint_progression_and_cap() {
    let engine = engine_with(single_player_catalog()).await;
    engine.start_game("user-1").await.unwrap();

    let expected = [
        (2, Some(HintKind::Nationality)),
        (3, Some(HintKind::Club)),
        (4, Some(HintKind::OverallRating)),
        (5, Some(HintKind::PreferredFoot)),
        // Schedule exhausted, counter still advances to the cap
        (6, None),
    ];

    for (count, kind) in expected {
        let clue = engine.reveal_next_clue("user-1").await.unwrap();
        assert_eq!(clue.hints_revealed, count);
        assert_eq!(clue.hint.as_ref().map(|h| h.kind), kind);
        assert_eq!(clue.hints_remaining, count < MAX_REVEALS);
    }

    // Idempotent rejection at the cap, counter untouched
    for _ in 0..2 {
        let err = engine.reveal_next_clue("user-1").await.unwrap_err();
        assert!(matches!(
            err,
            GameEngineError::AllHintsRevealed { hints_revealed: 6 }
        ));
    }

    // Winning after every hint still scores the floor of 1
    let win = engine.submit_guess("user-1", "mbappe").await.unwrap();
    assert_eq!(win.score, Some(1));
}

#[tokio::test]
async fn test_give_up_reveals_player_and_resets_streak() {
    let engine = engine_with(single_player_catalog()).await;

    // Build a streak of two
    for _ in 0..2 {
        engine.start_game("user-1").await.unwrap();
        engine.submit_guess("user-1", "mbappe").await.unwrap();
    }

    engine.start_game("user-1").await.unwrap();
    let gave_up = engine.give_up("user-1").await.unwrap();
    assert_eq!(gave_up.player.id, "231747");
    assert_eq!(gave_up.guesses.last().unwrap().guess_text, "[gave up]");

    let stats = engine.stats("user-1").await.unwrap();
    assert_eq!(stats.games_played, 3);
    assert_eq!(stats.correct_guesses, 2);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 2);

    // Resolved, not abandoned: a new start finds nothing to abandon
    engine.start_game("user-1").await.unwrap();
    let stats = engine.stats("user-1").await.unwrap();
    assert_eq!(stats.games_played, 3);
}

#[tokio::test]
async fn test_restart_abandons_open_session() {
    let catalog = single_player_catalog();
    let store = Arc::new(SqliteStore::new(":memory:").await.unwrap());
    let engine = GameEngine::new(catalog, store.clone(), store.clone());

    let first = engine.start_game("user-1").await.unwrap();
    engine.reveal_next_clue("user-1").await.unwrap();

    let second = engine.start_game("user-1").await.unwrap();
    assert_ne!(first.session_id, second.session_id);

    // Abandonment is logged, never counted as a concluded game
    let stats = engine.stats("user-1").await.unwrap();
    assert_eq!(stats.games_played, 0);

    // Only the new session is open
    use footbot_game_engine::GameStore;
    let open = store.get_open_session("user-1").await.unwrap().unwrap();
    assert_eq!(open.session_id, second.session_id);
}

#[tokio::test]
async fn test_users_are_independent() {
    let engine = engine_with(single_player_catalog()).await;

    engine.start_game("alice").await.unwrap();
    engine.start_game("bob").await.unwrap();

    engine.submit_guess("alice", "mbappe").await.unwrap();

    // Alice's win resolves nothing of Bob's
    let bob_clue = engine.reveal_next_clue("bob").await.unwrap();
    assert_eq!(bob_clue.hints_revealed, 2);

    let alice = engine.stats("alice").await.unwrap();
    let bob = engine.stats("bob").await.unwrap();
    assert_eq!(alice.games_played, 1);
    assert_eq!(bob.games_played, 0);
}

#[tokio::test]
async fn test_custom_hint_schedule() {
    let engine = engine_with(single_player_catalog())
        .await
        .with_options(GameOptions {
            min_rating: None,
            hint_schedule: HintSchedule::new(vec![HintKind::Club, HintKind::Position]),
        });

    let started = engine.start_game("user-1").await.unwrap();
    assert_eq!(started.hint.kind, HintKind::Club);
    assert_eq!(started.hint.value, "Real Madrid");

    let clue = engine.reveal_next_clue("user-1").await.unwrap();
    assert_eq!(clue.hint.as_ref().unwrap().kind, HintKind::Position);

    // Two-entry schedule: third reveal unlocks nothing new
    let clue = engine.reveal_next_clue("user-1").await.unwrap();
    assert!(clue.hint.is_none());
}

#[tokio::test]
async fn test_stats_for_unknown_user_are_zeroed() {
    let engine = engine_with(single_player_catalog()).await;
    let stats = engine.stats("nobody").await.unwrap();
    assert_eq!(stats.games_played, 0);
    assert_eq!(stats.best_streak, 0);
    assert_eq!(stats.avg_hints_used, 0.0);
}
