use thiserror::Error;

/// Caller-side validation failures, reported before any pairing is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("need at least {min} teams to generate a round, got {got}")]
    NotEnoughTeams { min: usize, got: usize },

    #[error("duplicate team ID: {0}")]
    DuplicateTeam(i64),

    #[error("invalid round number {0}: rounds are numbered from 1")]
    InvalidRound(u32),

    #[error("round {round} is past the last round ({total_rounds})")]
    RoundOutOfRange { round: u32, total_rounds: u32 },

    #[error("unknown pairing method \"{0}\" (expected \"round-robin\" or \"swiss\")")]
    UnknownMethod(String),
}
