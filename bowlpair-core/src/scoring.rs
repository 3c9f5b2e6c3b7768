/// Reduces one judge's score record for one team to a single total.
///
/// Pure function. No IO, no state.
use crate::types::{Score, ScoreValue};

/// Total for one score record: sum of criteria scores plus the mean of comment scores.
///
/// Comment (judge-question) scores are averaged, not summed, so events that ask
/// different numbers of questions stay comparable. An empty comment list adds 0.
/// Malformed values contribute 0.
pub fn total(score: &Score) -> f64 {
    criteria_sum(score) + comment_mean(&score.comment_scores)
}

pub fn criteria_sum(score: &Score) -> f64 {
    score.criteria_scores.values().map(ScoreValue::value).sum()
}

/// Mean of comment scores. Malformed entries count as 0 but stay in the denominator.
pub fn comment_mean(comments: &[ScoreValue]) -> f64 {
    if comments.is_empty() {
        return 0.0;
    }
    comments.iter().map(ScoreValue::value).sum::<f64>() / comments.len() as f64
}
