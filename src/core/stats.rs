use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a concluded game, fed into the per-user aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Whether the game ended with a correct guess
    pub is_correct: bool,

    /// Hints revealed when the game concluded
    pub hints_used: u32,

    /// Points awarded (0 on a loss)
    pub score: u32,
}

impl GameOutcome {
    pub fn won(hints_used: u32, score: u32) -> Self {
        Self {
            is_correct: true,
            hints_used,
            score,
        }
    }

    pub fn lost(hints_used: u32) -> Self {
        Self {
            is_correct: false,
            hints_used,
            score: 0,
        }
    }
}

/// Lifetime aggregates for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Games concluded (won, lost or given up)
    pub games_played: u32,

    /// Games ended by a correct guess
    pub correct_guesses: u32,

    /// Sum of scores over all wins
    pub total_score: u32,

    /// Running mean of hints used, over correct guesses only
    pub avg_hints_used: f64,

    /// Consecutive correct outcomes, reset to 0 on any loss
    pub current_streak: u32,

    /// High-water mark of current_streak
    pub best_streak: u32,

    /// When the row was first created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            games_played: 0,
            correct_guesses: 0,
            total_score: 0,
            avg_hints_used: 0.0,
            current_streak: 0,
            best_streak: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fold one concluded game into the aggregates
    ///
    /// Loss path only touches games_played and the streak; all
    /// correct-guess-derived aggregates keep their value.
    pub fn apply(&mut self, outcome: &GameOutcome) {
        self.games_played += 1;

        if outcome.is_correct {
            let prev_correct = self.correct_guesses as f64;
            self.correct_guesses += 1;
            self.total_score += outcome.score;
            self.avg_hints_used = (self.avg_hints_used * prev_correct
                + outcome.hints_used as f64)
                / self.correct_guesses as f64;
            self.current_streak += 1;
            if self.current_streak > self.best_streak {
                self.best_streak = self.current_streak;
            }
        } else {
            self.current_streak = 0;
        }

        self.updated_at = Utc::now();
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::new()
    }
}
