//! # FootBot Game Engine
//!
//! Guess-the-footballer game engine with:
//! - Fuzzy name matching (accent/punctuation tolerant, surname fragments)
//! - Progressive hint reveals with inverse scoring
//! - One open session per user, lifetime statistics and streaks
//! - Pluggable catalog and storage collaborators (SQLite shipped)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use footbot_game_engine::{GameEngine, StaticCatalog};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let players = std::fs::read_to_string("players.json")?;
//!     let catalog = Arc::new(StaticCatalog::from_json(&players)?);
//!     let engine = GameEngine::with_sqlite(catalog, "footbot.db").await?;
//!
//!     let started = engine.start_game("user-42").await?;
//!     println!("First hint: {:?} = {}", started.hint.kind, started.hint.value);
//!
//!     let result = engine.submit_guess("user-42", "mbappe").await?;
//!     if result.is_correct {
//!         println!("Correct! +{} points", result.score.unwrap_or(0));
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod matching;
pub mod store;

// Re-export primary types
pub use catalog::{PlayerCatalog, StaticCatalog};
pub use self::core::{
    GameOutcome, GameSession, GiveUpResult, GuessRecord, GuessResult, Hint, HintKind,
    HintSchedule, Player, RevealedClue, SessionState, StartedGame, UserStats, MAX_REVEALS,
};
pub use engine::{score_for_hints, GameEngine, GameOptions};
pub use error::{GameEngineError, Result};
pub use matching::{edit_distance, is_compound_match, is_match, similarity, MATCH_THRESHOLD};
pub use store::{GameStore, SqliteStore, StatsStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
