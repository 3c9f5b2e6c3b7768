//! bowlpair-core: Pure-computation pairing and result engine for judged team tournaments.
//!
//! Judge scores → per-match votes → ranked standings → next round's pairings.
//! No IO, no persistence, no clock. Bring your own store.
//!
//! Teams, judges, and matches are identified by caller-provided `i64` IDs.
//! Every call takes the full current snapshot and returns fresh values; nothing
//! is cached between calls.
//!
//! # Quick start
//!
//! ```rust
//! use bowlpair_core::{
//!     calculate_standings, generate_round, EngineConfig, JudgeAssignment, Match,
//!     MatchStatus, Pairing, PairingMethod, Score, Team,
//! };
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let teams = vec![
//!     Team::new(1, "Owls", "North High"),
//!     Team::new(2, "Foxes", "South High"),
//!     Team::new(3, "Hawks", "East High"),
//! ];
//!
//! let config = EngineConfig { method: PairingMethod::Swiss, total_rounds: Some(3) };
//! let mut rng = SmallRng::seed_from_u64(2024);
//! let round_one = generate_round(&config, &teams, &[], 1, &mut rng).unwrap();
//! assert_eq!(round_one.iter().filter(|p| p.is_bye()).count(), 1);
//!
//! // Two judges scored Owls vs Foxes; a virtual third judge averages them.
//! let played = Match {
//!     id: 100,
//!     round_number: 1,
//!     team_a_id: 1,
//!     team_b_id: 2,
//!     status: MatchStatus::Completed,
//!     assignments: vec![
//!         JudgeAssignment { judge_id: 7, match_id: 100 },
//!         JudgeAssignment { judge_id: 8, match_id: 100 },
//!     ],
//!     scores: vec![
//!         Score::submitted(7, 1, &[("clarity", 40.0), ("moral", 40.0)], &[]),
//!         Score::submitted(7, 2, &[("clarity", 40.0), ("moral", 35.0)], &[]),
//!         Score::submitted(8, 1, &[("clarity", 38.0), ("moral", 40.0)], &[]),
//!         Score::submitted(8, 2, &[("clarity", 42.0), ("moral", 40.0)], &[]),
//!     ],
//!     winner_id: None,
//! };
//!
//! let standings = calculate_standings(&teams, &[played.clone()]);
//! assert_eq!(standings[0].team, 1);
//! assert_eq!(standings[0].votes, 2.0);
//!
//! let round_two = generate_round(&config, &teams, &[played], 2, &mut rng).unwrap();
//! assert_eq!(round_two[0], Pairing::Match { team_a: 1, team_b: 3 });
//! ```

pub mod constants;
pub mod engine;
pub mod error;
#[cfg(feature = "serde")]
mod lenient;
pub mod pairing;
pub mod scoring;
pub mod standings;
pub mod tally;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{
    generate_round, to_match_drafts, validate_roster, validate_round, EngineConfig, PairingMethod,
};
pub use error::EngineError;
pub use pairing::{find_rematches, round_robin, round_robin_rounds, swiss};
pub use scoring::total;
pub use standings::calculate_standings;
pub use tally::{match_result, tally, tally_match, Outcome, Side, TeamTally};
pub use types::{
    JudgeAssignment, Match, MatchDraft, MatchResult, MatchStatus, Pairing, Score, ScoreValue,
    Standing, TallyResult, Team, Winner,
};
