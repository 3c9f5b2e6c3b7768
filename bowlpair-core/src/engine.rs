/// Round generation front door.
///
/// Validates what the pairing functions assume (enough teams, unique IDs, a sane
/// round number), then dispatches to the configured method. Holds no state
/// between calls: every request passes the full team and match snapshot.
use std::collections::HashSet;
use std::str::FromStr;

use rand::Rng;
use tracing::debug;

use crate::constants::{FIRST_ROUND, MIN_TEAMS_FOR_PAIRING};
use crate::error::EngineError;
use crate::pairing::{round_robin, swiss};
use crate::types::{Match, MatchDraft, MatchStatus, Pairing, Team};

/// How a round's pairings are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PairingMethod {
    RoundRobin,
    #[default]
    Swiss,
}

impl FromStr for PairingMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round-robin" | "round_robin" | "roundrobin" => Ok(PairingMethod::RoundRobin),
            "swiss" => Ok(PairingMethod::Swiss),
            other => Err(EngineError::UnknownMethod(other.to_string())),
        }
    }
}

/// Configuration for round generation.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub method: PairingMethod,
    /// Last round of the event, if the event caps it.
    pub total_rounds: Option<u32>,
}

/// Reject rosters the pairing functions cannot handle.
pub fn validate_roster(teams: &[Team]) -> Result<(), EngineError> {
    if teams.len() < MIN_TEAMS_FOR_PAIRING {
        return Err(EngineError::NotEnoughTeams {
            min: MIN_TEAMS_FOR_PAIRING,
            got: teams.len(),
        });
    }
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team.id) {
            return Err(EngineError::DuplicateTeam(team.id));
        }
    }
    Ok(())
}

/// Reject round 0 and rounds past the configured last round.
pub fn validate_round(round_number: u32, total_rounds: Option<u32>) -> Result<(), EngineError> {
    if round_number < FIRST_ROUND {
        return Err(EngineError::InvalidRound(round_number));
    }
    match total_rounds {
        Some(total_rounds) if round_number > total_rounds => Err(EngineError::RoundOutOfRange {
            round: round_number,
            total_rounds,
        }),
        _ => Ok(()),
    }
}

/// Generate the pairings for `round_number`.
///
/// Round-robin ignores `prior_matches` and `rng` and returns the complete
/// schedule, all of it destined for this one round. Swiss uses `rng` for round 1
/// and standings from `prior_matches` afterwards.
pub fn generate_round<R: Rng + ?Sized>(
    config: &EngineConfig,
    teams: &[Team],
    prior_matches: &[Match],
    round_number: u32,
    rng: &mut R,
) -> Result<Vec<Pairing>, EngineError> {
    validate_roster(teams)?;
    validate_round(round_number, config.total_rounds)?;

    let pairings = match config.method {
        PairingMethod::RoundRobin => round_robin(teams),
        PairingMethod::Swiss => swiss(teams, prior_matches, round_number, rng),
    };

    debug!(
        method = ?config.method,
        round = round_number,
        teams = teams.len(),
        matches = pairings.iter().filter(|p| !p.is_bye()).count(),
        byes = pairings.iter().filter(|p| p.is_bye()).count(),
        "generated round"
    );
    Ok(pairings)
}

/// Draft match records for `pairings`, one per match. Byes produce no record.
pub fn to_match_drafts(pairings: &[Pairing], round_number: u32) -> Vec<MatchDraft> {
    pairings
        .iter()
        .filter_map(|p| match *p {
            Pairing::Match { team_a, team_b } => Some(MatchDraft {
                round_number,
                team_a_id: team_a,
                team_b_id: team_b,
                status: MatchStatus::Draft,
            }),
            Pairing::Bye { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster(ids: &[i64]) -> Vec<Team> {
        ids.iter().map(|&id| Team::new(id, format!("Team {id}"), "School")).collect()
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("swiss".parse::<PairingMethod>(), Ok(PairingMethod::Swiss));
        assert_eq!("Round-Robin".parse::<PairingMethod>(), Ok(PairingMethod::RoundRobin));
        assert_eq!("round_robin".parse::<PairingMethod>(), Ok(PairingMethod::RoundRobin));
        assert_eq!(
            "knockout".parse::<PairingMethod>(),
            Err(EngineError::UnknownMethod("knockout".to_string()))
        );
    }

    #[test]
    fn test_validate_roster() {
        assert_eq!(
            validate_roster(&roster(&[1])),
            Err(EngineError::NotEnoughTeams { min: 2, got: 1 })
        );
        assert_eq!(validate_roster(&roster(&[1, 2, 1])), Err(EngineError::DuplicateTeam(1)));
        assert!(validate_roster(&roster(&[1, 2])).is_ok());
    }

    #[test]
    fn test_validate_round() {
        assert_eq!(validate_round(0, None), Err(EngineError::InvalidRound(0)));
        assert_eq!(
            validate_round(5, Some(4)),
            Err(EngineError::RoundOutOfRange { round: 5, total_rounds: 4 })
        );
        assert!(validate_round(4, Some(4)).is_ok());
        assert!(validate_round(9, None).is_ok());
    }

    #[test]
    fn test_generate_round_rejects_invalid_input() {
        let config = EngineConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(generate_round(&config, &roster(&[]), &[], 1, &mut rng).is_err());
        assert!(generate_round(&config, &roster(&[1, 2]), &[], 0, &mut rng).is_err());
    }

    #[test]
    fn test_generate_round_round_robin_full_schedule() {
        let config = EngineConfig {
            method: PairingMethod::RoundRobin,
            total_rounds: Some(3),
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let pairings = generate_round(&config, &roster(&[1, 2, 3, 4]), &[], 2, &mut rng).unwrap();
        assert_eq!(pairings.len(), 6);
    }

    #[test]
    fn test_generate_round_swiss_first_round() {
        let config = EngineConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let pairings = generate_round(&config, &roster(&[1, 2, 3, 4, 5]), &[], 1, &mut rng).unwrap();
        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings.iter().filter(|p| p.is_bye()).count(), 1);
    }

    #[test]
    fn test_match_drafts_skip_byes() {
        let pairings = vec![
            Pairing::Match { team_a: 1, team_b: 2 },
            Pairing::Bye { team: 3 },
            Pairing::Match { team_a: 4, team_b: 5 },
        ];
        let drafts = to_match_drafts(&pairings, 3);
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(|d| d.round_number == 3 && d.status == MatchStatus::Draft));
        assert_eq!((drafts[1].team_a_id, drafts[1].team_b_id), (4, 5));
    }
}
