use serde::Deserialize;
use serde::Serialize;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub name: String,
    pub high_score: i64,
}

/// Highest scores first, at most `limit` rows. Ties keep their input order.
pub fn rank(mut scores: Vec<Score>, limit: usize) -> Vec<Score> {
    scores.sort_by(|a, b| b.high_score.cmp(&a.high_score));
    scores.truncate(limit);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, high_score: i64) -> Score {
        Score {
            name: name.to_string(),
            high_score,
        }
    }

    #[test]
    fn ranks_descending_and_caps() {
        let scores = (0..15).map(|i| score(&format!("p{}", i), i * 7 % 15)).collect();
        let ranked = rank(scores, lds_core::LEADERBOARD_SIZE);
        assert_eq!(ranked.len(), lds_core::LEADERBOARD_SIZE);
        assert!(ranked.windows(2).all(|w| w[0].high_score >= w[1].high_score));
        assert_eq!(ranked[0].high_score, 14);
    }
    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(score("ada", 42)).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "ada", "highScore": 42 }));
    }
}
