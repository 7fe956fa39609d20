use thiserror::Error;

/// Main error type for the game engine
#[derive(Error, Debug)]
pub enum GameEngineError {
    /// Operation requires an open session that does not exist
    #[error("No active game for this user")]
    NoActiveGame,

    /// Reveal requested past the cap
    #[error("All hints already revealed ({hints_revealed})")]
    AllHintsRevealed { hints_revealed: u32 },

    /// Catalog inconsistency: a session references a player the catalog
    /// no longer knows about
    #[error("Player not found in catalog: {0}")]
    PlayerNotFound(String),

    /// Catalog has no players matching the requested filter
    #[error("Catalog has no players matching the filter")]
    EmptyCatalog,

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog errors
    #[error("Catalog '{catalog}' error: {message}")]
    Catalog { catalog: String, message: String },

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for GameEngineError {
    fn from(s: String) -> Self {
        GameEngineError::Other(s)
    }
}

impl From<&str> for GameEngineError {
    fn from(s: &str) -> Self {
        GameEngineError::Other(s.to_string())
    }
}

impl GameEngineError {
    /// Domain errors are recoverable at the caller and leave engine state
    /// untouched; infrastructure errors may not.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            GameEngineError::NoActiveGame
                | GameEngineError::AllHintsRevealed { .. }
                | GameEngineError::PlayerNotFound(_)
                | GameEngineError::EmptyCatalog
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GameEngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_classification() {
        assert!(GameEngineError::NoActiveGame.is_domain());
        assert!(GameEngineError::AllHintsRevealed { hints_revealed: 6 }.is_domain());
        assert!(GameEngineError::PlayerNotFound("231747".to_string()).is_domain());
        assert!(!GameEngineError::Other("boom".to_string()).is_domain());
    }

    #[test]
    fn test_from_string() {
        let err: GameEngineError = "something broke".into();
        assert_eq!(err.to_string(), "something broke");
    }
}
