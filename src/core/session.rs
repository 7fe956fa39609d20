use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Guess text logged when a session is abandoned by starting a new game
pub const ABANDONED_SENTINEL: &str = "[abandoned]";

/// Guess text logged when the user gives up
pub const GAVE_UP_SENTINEL: &str = "[gave up]";

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Awaiting a correct guess or a give-up
    Open,
    /// Resolved by a correct guess
    Won,
    /// Resolved by a give-up
    Lost,
    /// Implicitly closed because the user started a new game
    Abandoned,
}

impl SessionState {
    pub fn is_open(&self) -> bool {
        matches!(self, SessionState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Open => "open",
            SessionState::Won => "won",
            SessionState::Lost => "lost",
            SessionState::Abandoned => "abandoned",
        }
    }
}

impl std::str::FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(SessionState::Open),
            "won" => Ok(SessionState::Won),
            "lost" => Ok(SessionState::Lost),
            "abandoned" => Ok(SessionState::Abandoned),
            other => Err(format!("Unknown session state: {}", other)),
        }
    }
}

/// One entry in a session's log: a guess, a reveal event, or a resolution
/// sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Free text as submitted; empty for reveal events, sentinel for
    /// abandonment/give-up
    pub guess_text: String,

    /// Hint counter at the time the entry was logged
    pub hints_revealed: u32,

    /// Whether this guess won the game
    pub is_correct: bool,

    /// Points awarded (0 unless correct)
    pub score: u32,

    /// When the entry was logged
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

impl GuessRecord {
    pub fn new(guess_text: impl Into<String>, hints_revealed: u32) -> Self {
        Self {
            guess_text: guess_text.into(),
            hints_revealed,
            is_correct: false,
            score: 0,
            submitted_at: Utc::now(),
        }
    }

    /// Entry for a winning guess
    pub fn correct(guess_text: impl Into<String>, hints_revealed: u32, score: u32) -> Self {
        Self {
            guess_text: guess_text.into(),
            hints_revealed,
            is_correct: true,
            score,
            submitted_at: Utc::now(),
        }
    }

    /// Entry for a hint-reveal event (empty guess text)
    pub fn reveal(hints_revealed: u32) -> Self {
        Self::new("", hints_revealed)
    }

    /// True for reveal events rather than actual guesses
    pub fn is_reveal(&self) -> bool {
        self.guess_text.is_empty()
    }
}

/// One game instance for a single user
///
/// Pure data: all transitions are applied by the engine and persisted through
/// the game store, never by the session itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Unique session id
    pub session_id: Uuid,

    /// Owning user (chat id)
    pub user_id: String,

    /// Catalog id of the player to guess
    pub player_id: String,

    /// Hints unlocked so far; 1 on creation, never decreases
    pub hints_revealed: u32,

    /// Ordered log of guesses, reveals and resolution sentinels
    #[serde(default)]
    pub guesses: Vec<GuessRecord>,

    /// Opaque handle to the chat message the presentation layer renders into
    #[serde(default)]
    pub message_ref: Option<String>,

    /// Lifecycle state
    pub state: SessionState,

    /// When the session was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the session left the open state
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Create a fresh open session; the first hint is visible immediately
    pub fn new(user_id: impl Into<String>, player_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id: user_id.into(),
            player_id: player_id.into(),
            hints_revealed: 1,
            guesses: Vec::new(),
            message_ref: None,
            state: SessionState::Open,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Number of actual guesses submitted (reveal events excluded)
    pub fn guess_count(&self) -> usize {
        self.guesses.iter().filter(|g| !g.is_reveal()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_with_one_hint() {
        let session = GameSession::new("user-1", "158023");
        assert_eq!(session.hints_revealed, 1);
        assert!(session.state.is_open());
        assert!(session.guesses.is_empty());
        assert!(session.resolved_at.is_none());
    }

    #[test]
    fn test_guess_count_skips_reveals() {
        let mut session = GameSession::new("user-1", "158023");
        session.guesses.push(GuessRecord::new("ronaldo", 1));
        session.guesses.push(GuessRecord::reveal(2));
        session.guesses.push(GuessRecord::correct("messi", 2, 4));
        assert_eq!(session.guess_count(), 2);
    }

    #[test]
    fn test_state_round_trip() {
        for state in [
            SessionState::Open,
            SessionState::Won,
            SessionState::Lost,
            SessionState::Abandoned,
        ] {
            let parsed: SessionState = state.as_str().parse().unwrap();
            assert_eq!(parsed, state);
        }
        assert!("resolved".parse::<SessionState>().is_err());
    }
}
