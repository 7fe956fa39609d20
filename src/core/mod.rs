pub mod player;
pub mod response;
pub mod session;
pub mod stats;

pub use player::Player;
pub use response::{
    GiveUpResult, GuessResult, Hint, HintKind, HintSchedule, RevealedClue, StartedGame,
    MAX_REVEALS,
};
pub use session::{
    GameSession, GuessRecord, SessionState, ABANDONED_SENTINEL, GAVE_UP_SENTINEL,
};
pub use stats::{GameOutcome, UserStats};
