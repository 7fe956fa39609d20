use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{GuessRecord, Player};

/// Hard cap on the reveal counter
pub const MAX_REVEALS: u32 = 6;

/// One revealable player attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Position,
    Nationality,
    Club,
    OverallRating,
    PreferredFoot,
}

impl HintKind {
    /// Extract this attribute's value from a player record
    pub fn value_for(&self, player: &Player) -> String {
        match self {
            HintKind::Position => player.position.clone(),
            HintKind::Nationality => player.nationality.clone(),
            HintKind::Club => player.club.clone(),
            HintKind::OverallRating => player.overall.to_string(),
            HintKind::PreferredFoot => player.preferred_foot.clone(),
        }
    }
}

/// Order in which attributes are disclosed, reveal by reveal
///
/// A value type so callers can swap in their own ordering; the engine only
/// asks it what the n-th reveal unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSchedule {
    kinds: Vec<HintKind>,
}

impl HintSchedule {
    pub fn new(kinds: Vec<HintKind>) -> Self {
        Self { kinds }
    }

    /// Attribute unlocked by the n-th reveal (1-based); None once the
    /// schedule is exhausted (the counter may still advance up to the cap)
    pub fn kind_for(&self, hints_revealed: u32) -> Option<HintKind> {
        if hints_revealed == 0 {
            return None;
        }
        self.kinds.get(hints_revealed as usize - 1).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for HintSchedule {
    fn default() -> Self {
        Self::new(vec![
            HintKind::Position,
            HintKind::Nationality,
            HintKind::Club,
            HintKind::OverallRating,
            HintKind::PreferredFoot,
        ])
    }
}

/// A disclosed attribute: which reveal unlocked it, what it is, its value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    /// 1-based reveal index
    pub index: u32,

    /// Which attribute this is
    pub kind: HintKind,

    /// The attribute's value for the selected player
    pub value: String,
}

impl Hint {
    pub fn new(index: u32, kind: HintKind, player: &Player) -> Self {
        Self {
            index,
            kind,
            value: kind.value_for(player),
        }
    }
}

/// Response of a successful start operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedGame {
    /// Id of the freshly created session
    pub session_id: Uuid,

    /// The first hint, visible immediately
    pub hint: Hint,

    /// The selected player; for caller-side notification/analytics, never
    /// shown to the guessing user
    pub player: Player,
}

/// Response of a successful reveal operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealedClue {
    /// Counter value after the increment
    pub hints_revealed: u32,

    /// Newly unlocked attribute; None when the schedule is exhausted but the
    /// counter still advanced
    pub hint: Option<Hint>,

    /// Whether another reveal is still possible
    pub hints_remaining: bool,
}

/// Response of a guess submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessResult {
    /// Whether the guess matched the player's name
    pub is_correct: bool,

    /// Points awarded; set only on a correct guess
    #[serde(default)]
    pub score: Option<u32>,

    /// Full player record; revealed only on a correct guess
    #[serde(default)]
    pub player: Option<Player>,

    /// Complete session log; populated only on a correct guess
    #[serde(default)]
    pub guesses: Vec<GuessRecord>,

    /// Whether further hints are still available (relevant after a miss)
    pub hints_remaining: bool,
}

impl GuessResult {
    /// Winning guess: full disclosure
    pub fn correct(score: u32, player: Player, guesses: Vec<GuessRecord>) -> Self {
        Self {
            is_correct: true,
            score: Some(score),
            player: Some(player),
            guesses,
            hints_remaining: false,
        }
    }

    /// Miss: session stays open
    pub fn incorrect(hints_remaining: bool) -> Self {
        Self {
            is_correct: false,
            score: None,
            player: None,
            guesses: Vec::new(),
            hints_remaining,
        }
    }
}

/// Response of a give-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveUpResult {
    /// The player the user failed to guess
    pub player: Player,

    /// Complete session log
    #[serde(default)]
    pub guesses: Vec<GuessRecord>,
}
