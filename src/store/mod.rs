pub mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::{GameSession, GuessRecord, SessionState, UserStats};
use crate::error::Result;

pub use sqlite::SqliteStore;

/// Trait for game session storage backends
///
/// The engine performs plain read-modify-write against this trait and holds
/// no lock of its own: two concurrent operations for the same user can race.
/// Callers that cannot rely on per-user serialization (chat platforms
/// naturally provide it) should implement conditional updates here.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fetch the user's open session with its guess log, if any
    async fn get_open_session(&self, user_id: &str) -> Result<Option<GameSession>>;

    /// Create a fresh open session for the user
    async fn create_session(&self, user_id: &str, player_id: &str) -> Result<GameSession>;

    /// Append one entry to a session's guess log
    async fn append_guess_log(&self, session_id: Uuid, record: &GuessRecord) -> Result<()>;

    /// Persist a new hints-revealed counter value
    async fn update_hints(&self, session_id: Uuid, hints_revealed: u32) -> Result<()>;

    /// Attach the presentation layer's message handle to a session
    async fn set_message_ref(&self, session_id: Uuid, message_ref: &str) -> Result<()>;

    /// Move a session out of the open state
    async fn close_session(&self, session_id: Uuid, state: SessionState) -> Result<()>;
}

/// Trait for per-user statistics storage backends
///
/// Dumb row storage: the aggregation law lives in [`UserStats::apply`], not
/// here.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Fetch the user's aggregates, if the user has concluded a game before
    async fn get_stats(&self, user_id: &str) -> Result<Option<UserStats>>;

    /// Write back the full aggregate row
    async fn save_stats(&self, user_id: &str, stats: &UserStats) -> Result<()>;
}
