/// Ranked standings folded from completed matches.
///
/// Recomputed from scratch on every call, so the result always matches the
/// match list passed in.
use std::cmp::Ordering;

use tracing::debug;

use crate::constants::TIE_WIN;
use crate::tally::{tally_match, Outcome, Side, TeamTally};
use crate::types::{IdMap, Match, MatchStatus, Standing, Team};

impl Standing {
    fn empty(team: i64) -> Self {
        Standing {
            team,
            wins: 0.0,
            votes: 0.0,
            score_differential: 0.0,
            total_matches: 0,
            rank: 0,
        }
    }

    fn record(&mut self, result: &TeamTally) {
        self.wins += match result.outcome {
            Outcome::Win => 1.0,
            Outcome::Tie => TIE_WIN,
            Outcome::Loss => 0.0,
        };
        self.votes += result.votes;
        self.score_differential += result.total - result.opponent_total;
        self.total_matches += 1;
    }
}

/// Descending by wins, then votes, then score differential.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .total_cmp(&a.wins)
        .then_with(|| b.votes.total_cmp(&a.votes))
        .then_with(|| b.score_differential.total_cmp(&a.score_differential))
}

/// Compute standings for `teams` from every completed match in `matches`.
///
/// Every team appears, including teams with no completed matches. Teams equal on
/// all three sort keys keep their roster order.
pub fn calculate_standings(teams: &[Team], matches: &[Match]) -> Vec<Standing> {
    let id_map = IdMap::from_teams(teams);
    let mut standings: Vec<Standing> = teams.iter().map(|t| Standing::empty(t.id)).collect();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        if m.team_a_id == m.team_b_id {
            debug!(match_id = m.id, team = m.team_a_id, "ignoring match of a team against itself");
            continue;
        }
        let tally = tally_match(m);
        for (team_id, side) in [(m.team_a_id, Side::A), (m.team_b_id, Side::B)] {
            if let Some(idx) = id_map.get(team_id) {
                standings[idx].record(&tally.for_side(side));
            }
        }
    }

    standings.sort_by(compare_standings);
    for (i, s) in standings.iter_mut().enumerate() {
        s.rank = i + 1;
    }
    standings
}
