/// Output formatting: terminal tables and JSON.
use bowlpair_core::{MatchDraft, MatchResult, Pairing, Standing};
use serde::Serialize;

use crate::bail;
use crate::snapshot::Snapshot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRound<'a> {
    round_number: u32,
    method: &'a str,
    pairings: &'a [Pairing],
    drafts: &'a [MatchDraft],
    /// Match pairings that repeat an earlier matchup.
    rematches: &'a [Pairing],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonStanding<'a> {
    rank: usize,
    team_id: i64,
    name: &'a str,
    wins: f64,
    votes: f64,
    score_differential: f64,
    total_matches: u32,
}

fn print_pretty<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| bail(format!("Failed to serialize output: {e}")));
    println!("{json}");
}

fn label_width(labels: &[String], header: &str) -> usize {
    labels.iter().map(|l| l.len()).max().unwrap_or(0).max(header.len())
}

/// Print a generated round as a table.
pub fn print_round_table(snapshot: &Snapshot, round_number: u32, pairings: &[Pairing], rematches: &[Pairing]) {
    let labels: Vec<String> = pairings
        .iter()
        .flat_map(|p| p.teams())
        .map(|id| snapshot.team_label(id))
        .collect();
    let w = label_width(&labels, "Team A");

    println!("Round {round_number}");
    println!("  # | {:<w$} | {:<w$} | Note", "Team A", "Team B");
    println!("----|-{}-|-{}-|------", "-".repeat(w), "-".repeat(w));

    for (i, p) in pairings.iter().enumerate() {
        match *p {
            Pairing::Match { team_a, team_b } => {
                let note = if rematches.contains(p) { "rematch" } else { "" };
                println!(
                    "{:>3} | {:<w$} | {:<w$} | {}",
                    i + 1,
                    snapshot.team_label(team_a),
                    snapshot.team_label(team_b),
                    note,
                );
            }
            Pairing::Bye { team } => {
                println!("{:>3} | {:<w$} | {:<w$} | bye", i + 1, snapshot.team_label(team), "-");
            }
        }
    }

    let matches = pairings.iter().filter(|p| !p.is_bye()).count();
    println!("\n{} matches, {} byes", matches, pairings.len() - matches);
}

/// Print a generated round as JSON.
pub fn print_round_json(
    round_number: u32,
    method: &str,
    pairings: &[Pairing],
    drafts: &[MatchDraft],
    rematches: &[Pairing],
) {
    print_pretty(&JsonRound {
        round_number,
        method,
        pairings,
        drafts,
        rematches,
    });
}

/// Print standings as a table.
pub fn print_standings_table(snapshot: &Snapshot, standings: &[Standing]) {
    let labels: Vec<String> = standings.iter().map(|s| snapshot.team_label(s.team)).collect();
    let w = label_width(&labels, "Team");

    println!(" # | {:<w$} |  Wins | Votes |   Diff | Matches", "Team");
    println!("---|-{}-|-------|-------|--------|--------", "-".repeat(w));

    for (s, label) in standings.iter().zip(&labels) {
        println!(
            "{:>2} | {:<w$} | {:>5.1} | {:>5.1} | {:>6.1} | {:>7}",
            s.rank, label, s.wins, s.votes, s.score_differential, s.total_matches,
        );
    }
}

/// Print standings as JSON.
pub fn print_standings_json(snapshot: &Snapshot, standings: &[Standing]) {
    let labels: Vec<String> = standings.iter().map(|s| snapshot.team_label(s.team)).collect();
    let rows: Vec<JsonStanding> = standings
        .iter()
        .zip(&labels)
        .map(|(s, name)| JsonStanding {
            rank: s.rank,
            team_id: s.team,
            name,
            wins: s.wins,
            votes: s.votes,
            score_differential: s.score_differential,
            total_matches: s.total_matches,
        })
        .collect();
    print_pretty(&rows);
}

/// Print per-match results as a table. `results` pairs each match with its round.
pub fn print_results_table(snapshot: &Snapshot, results: &[(u32, i64, i64, MatchResult)]) {
    let labels: Vec<String> = results
        .iter()
        .flat_map(|&(_, a, b, _)| [snapshot.team_label(a), snapshot.team_label(b)])
        .collect();
    let w = label_width(&labels, "Team A");

    println!(
        "Round | Match | {:<w$} | {:<w$} | Votes     | Totals          | Winner",
        "Team A", "Team B"
    );
    println!(
        "------|-------|-{}-|-{}-|-----------|-----------------|-------",
        "-".repeat(w),
        "-".repeat(w)
    );

    for &(round, team_a, team_b, ref r) in results {
        let winner = match r.winner_id {
            Some(id) => snapshot.team_label(id),
            None => "tie".to_string(),
        };
        println!(
            "{:>5} | {:>5} | {:<w$} | {:<w$} | {:>4.1}-{:<4.1} | {:>7.2}-{:<7.2} | {}",
            round,
            r.match_id,
            snapshot.team_label(team_a),
            snapshot.team_label(team_b),
            r.team_a_votes,
            r.team_b_votes,
            r.team_a_total,
            r.team_b_total,
            winner,
        );
    }
}

/// Print per-match results as JSON.
pub fn print_results_json(results: &[(u32, i64, i64, MatchResult)]) {
    let rows: Vec<&MatchResult> = results.iter().map(|(_, _, _, r)| r).collect();
    print_pretty(&rows);
}
