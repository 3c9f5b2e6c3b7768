/// Pairing strategies for tournament rounds.
///
/// Public functions accept `&[Team]` and return `Pairing` values keyed by team ID.
/// Nothing here fails: the worst case for a valid roster is a bye.
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::constants::FIRST_ROUND;
use crate::standings::calculate_standings;
use crate::types::{Match, Pairing, Team};

/// Unordered pair of team IDs, smaller ID first.
type PairKey = (i64, i64);

fn pair_key(a: i64, b: i64) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}

// ---------------------------------------------------------------------------
// Round-robin (circle method)
// ---------------------------------------------------------------------------

/// Full single round-robin schedule, one inner `Vec` per rotation.
///
/// An odd roster gets a synthetic bye slot, so every team sits out exactly once.
/// Index 0 stays fixed; every other slot rotates one step per round.
pub fn round_robin_rounds(teams: &[Team]) -> Vec<Vec<Pairing>> {
    let mut slots: Vec<Option<i64>> = teams.iter().map(|t| Some(t.id)).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    if n < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round: Vec<Pairing> = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(team_a), Some(team_b)) => Some(Pairing::Match { team_a, team_b }),
                (Some(team), None) | (None, Some(team)) => Some(Pairing::Bye { team }),
                (None, None) => None,
            })
            .collect();
        rounds.push(round);
        slots[1..].rotate_right(1);
    }
    rounds
}

/// The whole round-robin schedule flattened into one list.
///
/// Contains `n * (n - 1) / 2` matches for `n` teams, plus one bye per team when
/// `n` is odd. Callers currently assign all of it to a single tournament round.
pub fn round_robin(teams: &[Team]) -> Vec<Pairing> {
    round_robin_rounds(teams).into_iter().flatten().collect()
}

// ---------------------------------------------------------------------------
// Swiss
// ---------------------------------------------------------------------------

/// Swiss pairings for `round_number`.
///
/// Round 1 is a random draw using `rng`. Later rounds pair teams with similar win
/// counts from `prior_matches`, avoiding rematches while a fresh opponent exists.
pub fn swiss<R: Rng + ?Sized>(
    teams: &[Team],
    prior_matches: &[Match],
    round_number: u32,
    rng: &mut R,
) -> Vec<Pairing> {
    if round_number <= FIRST_ROUND {
        swiss_first_round(teams, rng)
    } else {
        swiss_by_standings(teams, prior_matches)
    }
}

fn swiss_first_round<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<Pairing> {
    let mut ids: Vec<i64> = teams.iter().map(|t| t.id).collect();
    ids.shuffle(rng);
    ids.chunks(2)
        .map(|chunk| match *chunk {
            [team_a, team_b] => Pairing::Match { team_a, team_b },
            _ => Pairing::Bye { team: chunk[0] },
        })
        .collect()
}

fn swiss_by_standings(teams: &[Team], prior_matches: &[Match]) -> Vec<Pairing> {
    let standings = calculate_standings(teams, prior_matches);

    // Wins in roster order; the stable sort below keeps roster order among equal wins.
    let mut order: Vec<(i64, f64)> = teams
        .iter()
        .map(|t| {
            let wins = standings.iter().find(|s| s.team == t.id).map_or(0.0, |s| s.wins);
            (t.id, wins)
        })
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let played = played_pairs(prior_matches);
    let n = order.len();
    let mut paired = vec![false; n];
    let mut pairings = Vec::with_capacity(n / 2 + 1);

    for i in 0..n {
        if paired[i] {
            continue;
        }
        paired[i] = true;
        let (team, wins) = order[i];

        let open = |j: &usize| !paired[*j] && order[*j].0 != team;
        let fresh = (i + 1..n)
            .filter(open)
            .filter(|&j| !played.contains(&pair_key(team, order[j].0)))
            .min_by(|&x, &y| (order[x].1 - wins).abs().total_cmp(&(order[y].1 - wins).abs()));

        let opponent = match fresh {
            Some(j) => Some(j),
            None => {
                let fallback = (i + 1..n).find(open);
                if let Some(j) = fallback {
                    debug!(team, opponent = order[j].0, "no fresh opponent left, pairing a rematch");
                }
                fallback
            }
        };

        match opponent {
            Some(j) => {
                paired[j] = true;
                pairings.push(Pairing::Match { team_a: team, team_b: order[j].0 });
            }
            None => {
                debug!(team, "no unpaired team left, assigning bye");
                pairings.push(Pairing::Bye { team });
            }
        }
    }

    pairings
}

/// Every unordered team pair that has met in `matches`, whatever the match status.
fn played_pairs(matches: &[Match]) -> HashSet<PairKey> {
    matches.iter().map(|m| pair_key(m.team_a_id, m.team_b_id)).collect()
}

/// Match pairings that repeat a matchup already present in `prior_matches`.
///
/// Swiss pairing may fall back to a rematch without marking it; this lets callers
/// flag those pairings.
pub fn find_rematches(pairings: &[Pairing], prior_matches: &[Match]) -> Vec<Pairing> {
    let played = played_pairs(prior_matches);
    pairings
        .iter()
        .filter(|p| match **p {
            Pairing::Match { team_a, team_b } => played.contains(&pair_key(team_a, team_b)),
            Pairing::Bye { .. } => false,
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JudgeAssignment, MatchStatus, Score};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn roster(ids: &[i64]) -> Vec<Team> {
        ids.iter().map(|&id| Team::new(id, format!("Team {id}"), "School")).collect()
    }

    /// Completed single-judge match won by `winner` (or tied when `None`).
    fn played(id: i64, team_a: i64, team_b: i64, winner: Option<i64>) -> Match {
        let (a, b) = match winner {
            Some(w) if w == team_a => (80.0, 70.0),
            Some(_) => (70.0, 80.0),
            None => (75.0, 75.0),
        };
        Match {
            id,
            round_number: 1,
            team_a_id: team_a,
            team_b_id: team_b,
            status: MatchStatus::Completed,
            assignments: vec![
                JudgeAssignment { judge_id: 1, match_id: id },
                JudgeAssignment { judge_id: 2, match_id: id },
                JudgeAssignment { judge_id: 3, match_id: id },
            ],
            scores: (1..=3)
                .flat_map(|j| {
                    [
                        Score::submitted(j, team_a, &[("total", a)], &[]),
                        Score::submitted(j, team_b, &[("total", b)], &[]),
                    ]
                })
                .collect(),
            winner_id: winner,
        }
    }

    fn match_keys(pairings: &[Pairing]) -> Vec<PairKey> {
        pairings
            .iter()
            .filter_map(|p| match *p {
                Pairing::Match { team_a, team_b } => Some(pair_key(team_a, team_b)),
                Pairing::Bye { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_round_robin_covers_every_pair_once() {
        for n in 2..=11 {
            let teams = roster(&(1..=n).collect::<Vec<_>>());
            let pairings = round_robin(&teams);
            let keys = match_keys(&pairings);

            let expected = (n * (n - 1) / 2) as usize;
            assert_eq!(keys.len(), expected, "n = {n}");

            let unique: HashSet<PairKey> = keys.iter().copied().collect();
            assert_eq!(unique.len(), expected, "duplicate pair for n = {n}");
            assert!(keys.iter().all(|(a, b)| a != b), "self pairing for n = {n}");
        }
    }

    #[test]
    fn test_round_robin_odd_one_bye_per_team() {
        let teams = roster(&[1, 2, 3, 4, 5, 6, 7]);
        let pairings = round_robin(&teams);
        let mut byes: HashMap<i64, usize> = HashMap::new();
        for p in &pairings {
            if let Pairing::Bye { team } = p {
                *byes.entry(*team).or_insert(0) += 1;
            }
        }
        assert_eq!(byes.len(), 7);
        assert!(byes.values().all(|&count| count == 1));
    }

    #[test]
    fn test_round_robin_even_has_no_byes() {
        let pairings = round_robin(&roster(&[1, 2, 3, 4, 5, 6]));
        assert!(pairings.iter().all(|p| !p.is_bye()));
    }

    #[test]
    fn test_round_robin_rounds_each_team_once_per_round() {
        let teams = roster(&[10, 20, 30, 40, 50]);
        let rounds = round_robin_rounds(&teams);
        assert_eq!(rounds.len(), 5); // 5 teams padded to 6 slots

        for round in &rounds {
            let mut seen: Vec<i64> = round.iter().flat_map(|p| p.teams()).collect();
            seen.sort_unstable();
            assert_eq!(seen, vec![10, 20, 30, 40, 50]);
        }
    }

    #[test]
    fn test_round_robin_first_round_is_circle_layout() {
        let rounds = round_robin_rounds(&roster(&[1, 2, 3, 4]));
        assert_eq!(
            rounds[0],
            vec![
                Pairing::Match { team_a: 1, team_b: 4 },
                Pairing::Match { team_a: 2, team_b: 3 },
            ]
        );
    }

    #[test]
    fn test_swiss_first_round_partitions_roster() {
        let teams = roster(&[1, 2, 3, 4, 5, 6, 7]);
        let mut rng = SmallRng::seed_from_u64(42);
        let pairings = swiss(&teams, &[], 1, &mut rng);

        assert_eq!(pairings.len(), 4);
        assert_eq!(pairings.iter().filter(|p| p.is_bye()).count(), 1);
        assert!(pairings.last().unwrap().is_bye());

        let mut seen: Vec<i64> = pairings.iter().flat_map(|p| p.teams()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_swiss_first_round_reproducible_with_seed() {
        let teams = roster(&(1..=12).collect::<Vec<_>>());
        let first = swiss(&teams, &[], 1, &mut SmallRng::seed_from_u64(7));
        let second = swiss(&teams, &[], 1, &mut SmallRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_swiss_avoids_rematch_when_winners_differ() {
        let teams = roster(&[1, 2, 3, 4]);
        let prior = vec![played(1, 1, 2, Some(1)), played(2, 3, 4, Some(3))];
        let pairings = swiss(&teams, &prior, 2, &mut SmallRng::seed_from_u64(0));

        assert_eq!(
            pairings,
            vec![
                Pairing::Match { team_a: 1, team_b: 3 },
                Pairing::Match { team_a: 2, team_b: 4 },
            ]
        );
        assert!(find_rematches(&pairings, &prior).is_empty());
    }

    #[test]
    fn test_swiss_avoids_rematch_when_all_tied() {
        let teams = roster(&[1, 2, 3, 4]);
        let prior = vec![played(1, 1, 2, None), played(2, 3, 4, None)];
        let pairings = swiss(&teams, &prior, 2, &mut SmallRng::seed_from_u64(0));

        let keys: HashSet<PairKey> = match_keys(&pairings).into_iter().collect();
        assert!(!keys.contains(&(1, 2)));
        assert!(!keys.contains(&(3, 4)));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_swiss_prefers_closest_win_count() {
        // Wins after two rounds: 1 -> 2, 2 -> 1, 3 -> 1, 4 -> 0. Team 1 has played 2 and 4.
        let teams = roster(&[1, 2, 3, 4]);
        let prior = vec![
            played(1, 1, 2, Some(1)),
            played(2, 3, 4, Some(3)),
            played(3, 1, 4, Some(1)),
            played(4, 2, 3, Some(2)),
        ];
        let pairings = swiss(&teams, &prior, 3, &mut SmallRng::seed_from_u64(0));
        assert_eq!(pairings[0], Pairing::Match { team_a: 1, team_b: 3 });
        assert_eq!(pairings[1], Pairing::Match { team_a: 2, team_b: 4 });
    }

    #[test]
    fn test_swiss_falls_back_to_rematch() {
        let teams = roster(&[1, 2]);
        let prior = vec![played(1, 1, 2, Some(2))];
        let pairings = swiss(&teams, &prior, 2, &mut SmallRng::seed_from_u64(0));

        assert_eq!(pairings, vec![Pairing::Match { team_a: 2, team_b: 1 }]);
        assert_eq!(find_rematches(&pairings, &prior), pairings);
    }

    #[test]
    fn test_swiss_odd_roster_gives_last_team_bye() {
        let teams = roster(&[1, 2, 3]);
        let prior = vec![played(1, 1, 2, Some(1))];
        let pairings = swiss(&teams, &prior, 2, &mut SmallRng::seed_from_u64(0));

        // Team 1 (1 win) takes team 3 (fresh), team 2 is left with a bye.
        assert_eq!(
            pairings,
            vec![Pairing::Match { team_a: 1, team_b: 3 }, Pairing::Bye { team: 2 }]
        );
    }

    #[test]
    fn test_swiss_later_round_without_history_keeps_roster_order() {
        let teams = roster(&[5, 6, 7, 8]);
        let pairings = swiss(&teams, &[], 2, &mut SmallRng::seed_from_u64(0));
        assert_eq!(
            pairings,
            vec![
                Pairing::Match { team_a: 5, team_b: 6 },
                Pairing::Match { team_a: 7, team_b: 8 },
            ]
        );
    }

    #[test]
    fn test_swiss_never_pairs_team_with_itself() {
        let teams = roster(&[1, 1, 2]);
        let pairings = swiss(&teams, &[], 2, &mut SmallRng::seed_from_u64(0));
        for p in &pairings {
            if let Pairing::Match { team_a, team_b } = p {
                assert_ne!(team_a, team_b);
            }
        }
    }

    #[test]
    fn test_find_rematches_ignores_order_and_byes() {
        let prior = vec![played(1, 1, 2, Some(1))];
        let pairings = vec![
            Pairing::Match { team_a: 2, team_b: 1 },
            Pairing::Match { team_a: 3, team_b: 4 },
            Pairing::Bye { team: 5 },
        ];
        assert_eq!(
            find_rematches(&pairings, &prior),
            vec![Pairing::Match { team_a: 2, team_b: 1 }]
        );
    }
}
