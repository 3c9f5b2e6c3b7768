/// Per-judge vote tally for a single match, including the two-judge protocol.
///
/// A judge votes only when they have submitted scores for both teams. When
/// exactly two judges are assigned, a virtual third judge is synthesized from the
/// mean of the real judges' totals.
use tracing::debug;

use crate::constants::{TIE_VOTE, TWO_JUDGE_PANEL};
use crate::scoring::total;
use crate::types::{JudgeAssignment, Match, MatchResult, Score, TallyResult, Winner};

/// Side of a match, used to read a tally from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Outcome of a match for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

/// A tally read from one team's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamTally {
    pub votes: f64,
    pub opponent_votes: f64,
    pub total: f64,
    pub opponent_total: f64,
    pub outcome: Outcome,
}

impl TallyResult {
    fn record_judge(&mut self, a_total: f64, b_total: f64) {
        if a_total > b_total {
            self.team_a_votes += 1.0;
        } else if b_total > a_total {
            self.team_b_votes += 1.0;
        } else {
            self.team_a_votes += TIE_VOTE;
            self.team_b_votes += TIE_VOTE;
        }
        self.team_a_total += a_total;
        self.team_b_total += b_total;
    }

    /// This tally from the given side's point of view.
    pub fn for_side(&self, side: Side) -> TeamTally {
        let (votes, opponent_votes, total, opponent_total) = match side {
            Side::A => (self.team_a_votes, self.team_b_votes, self.team_a_total, self.team_b_total),
            Side::B => (self.team_b_votes, self.team_a_votes, self.team_b_total, self.team_a_total),
        };
        let outcome = match (self.winner, side) {
            (Winner::Tie, _) => Outcome::Tie,
            (Winner::TeamA, Side::A) | (Winner::TeamB, Side::B) => Outcome::Win,
            _ => Outcome::Loss,
        };
        TeamTally {
            votes,
            opponent_votes,
            total,
            opponent_total,
            outcome,
        }
    }
}

/// Tally votes for a match from each team's score records and the judge panel.
pub fn tally(
    team_a_scores: &[Score],
    team_b_scores: &[Score],
    assignments: &[JudgeAssignment],
) -> TallyResult {
    let mut judges: Vec<i64> = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        if !judges.contains(&assignment.judge_id) {
            judges.push(assignment.judge_id);
        }
    }

    let mut result = TallyResult::default();
    let mut real_totals: Vec<(f64, f64)> = Vec::with_capacity(judges.len());

    for &judge_id in &judges {
        let (Some(a), Some(b)) = (
            submitted_by(team_a_scores, judge_id),
            submitted_by(team_b_scores, judge_id),
        ) else {
            continue;
        };
        let (a_total, b_total) = (total(a), total(b));
        result.record_judge(a_total, b_total);
        real_totals.push((a_total, b_total));
    }
    result.judges_counted = real_totals.len();

    if judges.len() == TWO_JUDGE_PANEL && !real_totals.is_empty() {
        let n = real_totals.len() as f64;
        let virtual_a = real_totals.iter().map(|t| t.0).sum::<f64>() / n;
        let virtual_b = real_totals.iter().map(|t| t.1).sum::<f64>() / n;
        debug!(virtual_a, virtual_b, "synthesized virtual third judge");
        result.record_judge(virtual_a, virtual_b);
        result.virtual_judge = true;
    }

    result.winner = if result.team_a_votes > result.team_b_votes {
        Winner::TeamA
    } else if result.team_b_votes > result.team_a_votes {
        Winner::TeamB
    } else {
        Winner::Tie
    };
    result
}

/// Tally a match, splitting its scores by team.
pub fn tally_match(m: &Match) -> TallyResult {
    let (team_a_scores, team_b_scores): (Vec<Score>, Vec<Score>) = m
        .scores
        .iter()
        .filter(|s| s.team_id == m.team_a_id || s.team_id == m.team_b_id)
        .cloned()
        .partition(|s| s.team_id == m.team_a_id);
    tally(&team_a_scores, &team_b_scores, &m.assignments)
}

/// Completion record for a match: winner ID (none on a tie) plus votes and totals.
pub fn match_result(m: &Match) -> MatchResult {
    let t = tally_match(m);
    let winner_id = match t.winner {
        Winner::TeamA => Some(m.team_a_id),
        Winner::TeamB => Some(m.team_b_id),
        Winner::Tie => None,
    };
    MatchResult {
        match_id: m.id,
        winner_id,
        team_a_votes: t.team_a_votes,
        team_b_votes: t.team_b_votes,
        team_a_total: t.team_a_total,
        team_b_total: t.team_b_total,
    }
}

fn submitted_by(scores: &[Score], judge_id: i64) -> Option<&Score> {
    scores.iter().find(|s| s.judge_id == judge_id && s.is_submitted)
}
