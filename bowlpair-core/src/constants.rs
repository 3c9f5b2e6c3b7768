/// Vote awarded to each side when a judge's totals are equal.
pub const TIE_VOTE: f64 = 0.5;

/// Standings credit for a match tied on votes.
pub const TIE_WIN: f64 = 0.5;

/// Panel size that triggers the virtual third judge.
///
/// A two-judge panel is scored as if a third judge had returned the mean of the
/// real judges' totals. Larger or smaller panels are tallied as-is.
pub const TWO_JUDGE_PANEL: usize = 2;

/// Fewest teams a round can be generated for.
pub const MIN_TEAMS_FOR_PAIRING: usize = 2;

/// Rounds are numbered from 1. Swiss round 1 is a random draw.
pub const FIRST_ROUND: u32 = 1;
