use std::collections::{BTreeMap, HashMap};

/// A team on the tournament roster.
///
/// Teams are identified by caller-provided `i64` IDs. The engine never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: String,
}

impl Team {
    pub fn new(id: i64, name: impl Into<String>, school: impl Into<String>) -> Self {
        Team {
            id,
            name: name.into(),
            school: school.into(),
        }
    }
}

/// A judge assigned to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct JudgeAssignment {
    pub judge_id: i64,
    pub match_id: i64,
}

/// One numeric field of a judge's score payload.
///
/// The upstream store does not guarantee numbers: values may arrive as text or
/// be missing entirely. `value()` resolves every variant to a finite number.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
    Missing,
}

impl ScoreValue {
    /// Numeric contribution of this field. Unparseable or non-finite values count as 0.
    pub fn value(&self) -> f64 {
        let v = match self {
            ScoreValue::Number(n) => *n,
            ScoreValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            ScoreValue::Missing => 0.0,
        };
        if v.is_finite() { v } else { 0.0 }
    }
}

impl From<f64> for ScoreValue {
    fn from(v: f64) -> Self {
        ScoreValue::Number(v)
    }
}

impl From<&str> for ScoreValue {
    fn from(v: &str) -> Self {
        ScoreValue::Text(v.to_string())
    }
}

/// One judge's score record for one team in one match.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Score {
    pub judge_id: i64,
    pub team_id: i64,
    /// Per-criterion scores. Summed.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::criteria_scores"))]
    pub criteria_scores: BTreeMap<String, ScoreValue>,
    /// Judge-question (comment) scores. Averaged, not summed.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::comment_scores"))]
    pub comment_scores: Vec<ScoreValue>,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "crate::lenient::is_submitted"))]
    pub is_submitted: bool,
}

impl Score {
    /// A submitted score from numeric criteria and comment values.
    pub fn submitted(judge_id: i64, team_id: i64, criteria: &[(&str, f64)], comments: &[f64]) -> Self {
        Score {
            judge_id,
            team_id,
            criteria_scores: criteria
                .iter()
                .map(|&(name, v)| (name.to_string(), ScoreValue::Number(v)))
                .collect(),
            comment_scores: comments.iter().map(|&v| ScoreValue::Number(v)).collect(),
            is_submitted: true,
        }
    }
}

/// Lifecycle state of a persisted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

/// A match as supplied by the persistence layer, with its judges and scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Match {
    pub id: i64,
    pub round_number: u32,
    pub team_a_id: i64,
    pub team_b_id: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: MatchStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assignments: Vec<JudgeAssignment>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: Vec<Score>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub winner_id: Option<i64>,
}

impl Match {
    pub fn involves(&self, team_id: i64) -> bool {
        self.team_a_id == team_id || self.team_b_id == team_id
    }
}

/// Engine output for one slot of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Pairing {
    Match { team_a: i64, team_b: i64 },
    Bye { team: i64 },
}

impl Pairing {
    /// Teams occupying this slot.
    pub fn teams(&self) -> Vec<i64> {
        match *self {
            Pairing::Match { team_a, team_b } => vec![team_a, team_b],
            Pairing::Bye { team } => vec![team],
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Pairing::Bye { .. })
    }
}

/// A persisted-match shape for a generated pairing, handed to the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchDraft {
    pub round_number: u32,
    pub team_a_id: i64,
    pub team_b_id: i64,
    pub status: MatchStatus,
}

/// Which side of a match won on votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    TeamA,
    #[cfg_attr(feature = "serde", serde(rename = "B"))]
    TeamB,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "tie"))]
    Tie,
}

/// Vote and score totals for one match.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TallyResult {
    pub team_a_votes: f64,
    pub team_b_votes: f64,
    /// Sum of per-judge totals for team A, virtual judge included.
    pub team_a_total: f64,
    pub team_b_total: f64,
    pub winner: Winner,
    /// Real judges that scored both teams.
    pub judges_counted: usize,
    /// Whether a virtual third judge was synthesized.
    pub virtual_judge: bool,
}

/// Per-match record for match completion and export.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchResult {
    pub match_id: i64,
    /// `None` on a tie.
    pub winner_id: Option<i64>,
    pub team_a_votes: f64,
    pub team_b_votes: f64,
    pub team_a_total: f64,
    pub team_b_total: f64,
}

/// A team's position in the standings. Recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Standing {
    /// Team ID.
    pub team: i64,
    /// Strict wins count 1, ties 0.5.
    pub wins: f64,
    pub votes: f64,
    pub score_differential: f64,
    pub total_matches: u32,
    /// 1-based position after sorting.
    pub rank: usize,
}

/// Maps caller-provided team IDs to roster positions.
///
/// Duplicate IDs keep their first position; roster validation is the caller's job.
pub(crate) struct IdMap {
    id_to_idx: HashMap<i64, usize>,
}

impl IdMap {
    pub fn from_teams(teams: &[Team]) -> Self {
        let mut id_to_idx = HashMap::with_capacity(teams.len());
        for (idx, team) in teams.iter().enumerate() {
            id_to_idx.entry(team.id).or_insert(idx);
        }
        IdMap { id_to_idx }
    }

    pub fn get(&self, id: i64) -> Option<usize> {
        self.id_to_idx.get(&id).copied()
    }
}
