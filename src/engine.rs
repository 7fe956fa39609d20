use std::sync::Arc;

use crate::catalog::PlayerCatalog;
use crate::core::{
    GameOutcome, GameSession, GiveUpResult, GuessRecord, GuessResult, Hint, HintSchedule,
    RevealedClue, SessionState, StartedGame, UserStats, ABANDONED_SENTINEL, GAVE_UP_SENTINEL,
    MAX_REVEALS,
};
use crate::error::{GameEngineError, Result};
use crate::matching::is_compound_match;
use crate::store::{GameStore, SqliteStore, StatsStore};

/// Main game orchestrator
///
/// Stateless: every operation is a read-modify-write through the injected
/// catalog and stores. One open session per user is an invariant enforced
/// here, not by the stores.
pub struct GameEngine {
    catalog: Arc<dyn PlayerCatalog>,
    games: Arc<dyn GameStore>,
    stats: Arc<dyn StatsStore>,
    options: GameOptions,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct GameOptions {
    /// Restrict random draws to players at or above this overall rating
    pub min_rating: Option<u8>,

    /// Which attribute each reveal unlocks
    pub hint_schedule: HintSchedule,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            min_rating: None,
            hint_schedule: HintSchedule::default(),
        }
    }
}

/// Points for a correct guess after `hints_revealed` hints: 5/4/3/2/1 for
/// 1/2/3/4/≥5, never below 1
pub fn score_for_hints(hints_revealed: u32) -> u32 {
    5u32.saturating_sub(hints_revealed.saturating_sub(1)).max(1)
}

impl GameEngine {
    /// Create an engine over explicit collaborators
    pub fn new(
        catalog: Arc<dyn PlayerCatalog>,
        games: Arc<dyn GameStore>,
        stats: Arc<dyn StatsStore>,
    ) -> Self {
        Self {
            catalog,
            games,
            stats,
            options: GameOptions::default(),
        }
    }

    /// Create an engine with a SQLite store backing both sessions and stats
    pub async fn with_sqlite(catalog: Arc<dyn PlayerCatalog>, db_path: &str) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(db_path).await?);
        Ok(Self::new(catalog, store.clone(), store))
    }

    pub fn with_options(mut self, options: GameOptions) -> Self {
        self.options = options;
        self
    }

    /// Start a new game for the user
    ///
    /// An open session is first resolved as abandoned (logged, never
    /// silently dropped); this is a normal transition, not an error.
    pub async fn start_game(&self, user_id: &str) -> Result<StartedGame> {
        if let Some(open) = self.games.get_open_session(user_id).await? {
            self.abandon_session(&open).await;
        }

        let player = self.catalog.random(self.options.min_rating).await?;
        let session = self.games.create_session(user_id, &player.id).await?;

        let kind = self
            .options
            .hint_schedule
            .kind_for(1)
            .ok_or_else(|| GameEngineError::Other("Hint schedule is empty".to_string()))?;
        let hint = Hint::new(1, kind, &player);

        tracing::info!("Started game {} for user {}", session.session_id, user_id);
        tracing::debug!("Selected player {} ({})", player.display_name(), player.id);

        Ok(StartedGame {
            session_id: session.session_id,
            hint,
            player,
        })
    }

    /// Reveal the next hint for the user's open game
    ///
    /// Rejected without any state change when no game is open or the counter
    /// is already at the cap.
    pub async fn reveal_next_clue(&self, user_id: &str) -> Result<RevealedClue> {
        let session = self
            .games
            .get_open_session(user_id)
            .await?
            .ok_or(GameEngineError::NoActiveGame)?;

        if session.hints_revealed >= MAX_REVEALS {
            return Err(GameEngineError::AllHintsRevealed {
                hints_revealed: session.hints_revealed,
            });
        }

        let player = self.catalog.get_by_id(&session.player_id).await?;
        let new_count = session.hints_revealed + 1;

        self.games.update_hints(session.session_id, new_count).await?;

        // Reveal events are part of the session log: empty guess text,
        // the counter value they unlocked, score 0
        if let Err(e) = self
            .games
            .append_guess_log(session.session_id, &GuessRecord::reveal(new_count))
            .await
        {
            tracing::warn!("Failed to log reveal for {}: {}", session.session_id, e);
        }

        let hint = self
            .options
            .hint_schedule
            .kind_for(new_count)
            .map(|kind| Hint::new(new_count, kind, &player));

        tracing::debug!(
            "Revealed hint {}/{} for user {}",
            new_count,
            MAX_REVEALS,
            user_id
        );

        Ok(RevealedClue {
            hints_revealed: new_count,
            hint,
            hints_remaining: new_count < MAX_REVEALS,
        })
    }

    /// Evaluate a free-text guess against the open game's player
    ///
    /// A correct guess closes the session and scores it; a miss leaves the
    /// session open (wrong guesses are unlimited). Once correctness is
    /// decided, storage failures no longer overturn the answer: they are
    /// logged and the decided result is still returned.
    pub async fn submit_guess(&self, user_id: &str, text: &str) -> Result<GuessResult> {
        let session = self
            .games
            .get_open_session(user_id)
            .await?
            .ok_or(GameEngineError::NoActiveGame)?;

        let player = self.catalog.get_by_id(&session.player_id).await?;
        let is_correct = is_compound_match(text, &player.display_name());

        tracing::debug!(
            "Guess '{}' vs '{}' for user {}: {}",
            text,
            player.display_name(),
            user_id,
            is_correct
        );

        if !is_correct {
            self.games
                .append_guess_log(session.session_id, &GuessRecord::new(text, session.hints_revealed))
                .await?;

            return Ok(GuessResult::incorrect(session.hints_revealed < MAX_REVEALS));
        }

        let score = score_for_hints(session.hints_revealed);
        let record = GuessRecord::correct(text, session.hints_revealed, score);

        if let Err(e) = self.games.append_guess_log(session.session_id, &record).await {
            tracing::warn!("Failed to log winning guess for {}: {}", session.session_id, e);
        }
        if let Err(e) = self
            .games
            .close_session(session.session_id, SessionState::Won)
            .await
        {
            tracing::warn!("Failed to close session {}: {}", session.session_id, e);
        }
        self.record_outcome(user_id, GameOutcome::won(session.hints_revealed, score))
            .await;

        tracing::info!(
            "User {} guessed {} with {} hints, score {}",
            user_id,
            player.display_name(),
            session.hints_revealed,
            score
        );

        let mut guesses = session.guesses;
        guesses.push(record);

        Ok(GuessResult::correct(score, player, guesses))
    }

    /// Resolve the user's open game as a loss and reveal the player
    pub async fn give_up(&self, user_id: &str) -> Result<GiveUpResult> {
        let session = self
            .games
            .get_open_session(user_id)
            .await?
            .ok_or(GameEngineError::NoActiveGame)?;

        let player = self.catalog.get_by_id(&session.player_id).await?;

        let record = GuessRecord::new(GAVE_UP_SENTINEL, session.hints_revealed);
        if let Err(e) = self.games.append_guess_log(session.session_id, &record).await {
            tracing::warn!("Failed to log give-up for {}: {}", session.session_id, e);
        }
        if let Err(e) = self
            .games
            .close_session(session.session_id, SessionState::Lost)
            .await
        {
            tracing::warn!("Failed to close session {}: {}", session.session_id, e);
        }
        self.record_outcome(user_id, GameOutcome::lost(session.hints_revealed))
            .await;

        tracing::info!(
            "User {} gave up after {} hints, answer was {}",
            user_id,
            session.hints_revealed,
            player.display_name()
        );

        let mut guesses = session.guesses;
        guesses.push(record);

        Ok(GiveUpResult { player, guesses })
    }

    /// Fetch the user's lifetime aggregates (zeroed for a new user)
    pub async fn stats(&self, user_id: &str) -> Result<UserStats> {
        Ok(self
            .stats
            .get_stats(user_id)
            .await?
            .unwrap_or_default())
    }

    /// Resolve a stale open session as abandoned before starting a new one
    async fn abandon_session(&self, session: &GameSession) {
        let record = GuessRecord::new(ABANDONED_SENTINEL, session.hints_revealed);
        if let Err(e) = self.games.append_guess_log(session.session_id, &record).await {
            tracing::warn!("Failed to log abandonment for {}: {}", session.session_id, e);
        }
        if let Err(e) = self
            .games
            .close_session(session.session_id, SessionState::Abandoned)
            .await
        {
            tracing::warn!("Failed to abandon session {}: {}", session.session_id, e);
        }

        tracing::info!(
            "Abandoned session {} for user {} at {} hints",
            session.session_id,
            session.user_id,
            session.hints_revealed
        );
    }

    /// Fold a concluded game into the user's aggregates
    ///
    /// Read-modify-write with no lock; see the concurrency note on
    /// [`GameStore`]. Failures here never overturn an already-decided game
    /// outcome, they only cost durability.
    async fn record_outcome(&self, user_id: &str, outcome: GameOutcome) {
        let result: Result<()> = async {
            let mut stats = self
                .stats
                .get_stats(user_id)
                .await?
                .unwrap_or_else(UserStats::new);
            stats.apply(&outcome);
            self.stats.save_stats(user_id, &stats).await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!("Failed to record outcome for user {}: {}", user_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::core::Player;

    fn fixture_catalog() -> Arc<StaticCatalog> {
        let mut player = Player::new("231747", "Kylian", "Mbappé");
        player.position = "ST".to_string();
        player.nationality = "France".to_string();
        player.club = "Real Madrid".to_string();
        player.overall = 91;
        Arc::new(StaticCatalog::new(vec![player]))
    }

    async fn fixture_engine() -> GameEngine {
        GameEngine::with_sqlite(fixture_catalog(), ":memory:")
            .await
            .unwrap()
    }

    #[test]
    fn test_scoring_law() {
        assert_eq!(score_for_hints(1), 5);
        assert_eq!(score_for_hints(2), 4);
        assert_eq!(score_for_hints(3), 3);
        assert_eq!(score_for_hints(4), 2);
        assert_eq!(score_for_hints(5), 1);
        assert_eq!(score_for_hints(6), 1);
    }

    #[tokio::test]
    async fn test_engine_creation() {
        let result = GameEngine::with_sqlite(fixture_catalog(), ":memory:").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_start_game_returns_first_hint() {
        let engine = fixture_engine().await;
        let started = engine.start_game("user-1").await.unwrap();

        assert_eq!(started.hint.index, 1);
        assert_eq!(started.hint.value, "ST");
        assert_eq!(started.player.id, "231747");
    }

    #[tokio::test]
    async fn test_reveal_requires_open_game() {
        let engine = fixture_engine().await;
        let err = engine.reveal_next_clue("user-1").await.unwrap_err();
        assert!(matches!(err, GameEngineError::NoActiveGame));
    }

    #[tokio::test]
    async fn test_guess_requires_open_game() {
        let engine = fixture_engine().await;
        let err = engine.submit_guess("user-1", "mbappe").await.unwrap_err();
        assert!(matches!(err, GameEngineError::NoActiveGame));
    }

    #[tokio::test]
    async fn test_give_up_requires_open_game() {
        let engine = fixture_engine().await;
        let err = engine.give_up("user-1").await.unwrap_err();
        assert!(matches!(err, GameEngineError::NoActiveGame));
    }

    #[tokio::test]
    async fn test_min_rating_filter_propagates_empty_catalog() {
        let engine = fixture_engine().await.with_options(GameOptions {
            min_rating: Some(95),
            hint_schedule: HintSchedule::default(),
        });

        let err = engine.start_game("user-1").await.unwrap_err();
        assert!(matches!(err, GameEngineError::EmptyCatalog));
    }
}
