/// Tournament snapshot loading.
///
/// A snapshot is the roster plus every match the store knows about, read once per
/// command: `{ "teams": [...], "matches": [...] }`.
use bowlpair_core::{Match, Team};
use serde::Deserialize;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use crate::bail;

#[derive(Deserialize, Debug, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Snapshot {
    /// Display label for a team: "Name (School)", or the bare ID if unknown.
    pub fn team_label(&self, id: i64) -> String {
        match self.teams.iter().find(|t| t.id == id) {
            Some(t) if t.school.is_empty() => t.name.clone(),
            Some(t) => format!("{} ({})", t.name, t.school),
            None => format!("#{id}"),
        }
    }

    /// Matches from rounds before `round_number`.
    pub fn matches_before(&self, round_number: u32) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| m.round_number < round_number)
            .cloned()
            .collect()
    }
}

pub fn parse_snapshot(content: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(content.trim())
}

/// Load a snapshot from `path`, or from stdin when no path is given.
pub fn load_snapshot(path: Option<&Path>) -> Snapshot {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read snapshot {}: {e}", path.display()))),
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail("No snapshot provided. Use --snapshot <file> or pipe JSON via stdin.");
            }
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")));
            buf
        }
    };

    parse_snapshot(&content).unwrap_or_else(|e| bail(format!("Failed to parse snapshot: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bowlpair_core::MatchStatus;

    const SAMPLE: &str = r#"{
        "teams": [
            {"id": 1, "name": "Owls", "school": "North High"},
            {"id": 2, "name": "Foxes"}
        ],
        "matches": [
            {"id": 10, "roundNumber": 1, "teamAId": 1, "teamBId": 2, "status": "completed",
             "assignments": [{"judgeId": 5, "matchId": 10}],
             "scores": [
                {"judgeId": 5, "teamId": 1, "criteriaScores": {"clarity": 4}, "commentScores": [10], "isSubmitted": true},
                {"judgeId": 5, "teamId": 2, "criteriaScores": "{\"clarity\": 3}", "isSubmitted": true}
             ]},
            {"id": 11, "roundNumber": 2, "teamAId": 2, "teamBId": 1}
        ]
    }"#;

    #[test]
    fn test_parse_sample_snapshot() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(snapshot.teams.len(), 2);
        assert_eq!(snapshot.matches.len(), 2);
        assert_eq!(snapshot.matches[0].status, MatchStatus::Completed);
        assert_eq!(snapshot.matches[1].status, MatchStatus::Draft);
        assert_eq!(snapshot.matches[0].scores.len(), 2);
    }

    #[test]
    fn test_team_label() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(snapshot.team_label(1), "Owls (North High)");
        assert_eq!(snapshot.team_label(2), "Foxes");
        assert_eq!(snapshot.team_label(9), "#9");
    }

    #[test]
    fn test_matches_before_round() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(snapshot.matches_before(1).len(), 0);
        assert_eq!(snapshot.matches_before(2).len(), 1);
        assert_eq!(snapshot.matches_before(3).len(), 2);
    }

    #[test]
    fn test_matches_optional() {
        let snapshot = parse_snapshot(r#"{"teams": [{"id": 1, "name": "A"}]}"#).unwrap();
        assert!(snapshot.matches.is_empty());
    }

    #[test]
    fn test_rejects_missing_teams() {
        assert!(parse_snapshot(r#"{"matches": []}"#).is_err());
    }
}
