use serde::{Deserialize, Serialize};

/// One customer's rating of one tour, keyed by `(tour_id, customer_id)`.
///
/// `score` is expected to be in 0..=5; the range is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourRating {
    tour_id: i64,
    customer_id: i64,
    score: i32,
    comment: Option<String>,
}

impl TourRating {
    pub fn new(tour_id: i64, customer_id: i64, score: i32, comment: Option<String>) -> Self {
        Self {
            tour_id,
            customer_id,
            score,
            comment,
        }
    }

    /// Rating whose comment is derived from the score.
    pub fn with_default_comment(tour_id: i64, customer_id: i64, score: i32) -> Self {
        Self::new(tour_id, customer_id, score, Some(default_comment(score)))
    }

    pub fn tour_id(&self) -> i64 {
        self.tour_id
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn key(&self) -> (i64, i64) {
        (self.tour_id, self.customer_id)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

pub fn default_comment(score: i32) -> String {
    match score {
        1 => "Terrible".to_string(),
        2 => "Poor".to_string(),
        3 => "Fair".to_string(),
        4 => "Good".to_string(),
        5 => "Great".to_string(),
        other => other.to_string(),
    }
}

/// Arithmetic mean of the scores, `0.0` for no ratings.
pub fn average_score(ratings: &[TourRating]) -> f64 {
    if ratings.is_empty() {
        0.0
    } else {
        let total: i64 = ratings.iter().map(|r| r.score as i64).sum();
        total as f64 / ratings.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_creation() {
        let rating = TourRating::new(1, 456, 2, Some("it was fair".to_string()));

        assert_eq!(rating.key(), (1, 456));
        assert_eq!(rating.score(), 2);
        assert_eq!(rating.comment(), Some("it was fair"));
    }

    #[test]
    fn test_default_comment() {
        assert_eq!(TourRating::with_default_comment(1, 2, 5).comment(), Some("Great"));
        assert_eq!(default_comment(1), "Terrible");
        assert_eq!(default_comment(3), "Fair");
        assert_eq!(default_comment(0), "0");
        assert_eq!(default_comment(9), "9");
    }

    #[test]
    fn test_average_score() {
        let ratings = vec![
            TourRating::new(1, 1, 3, None),
            TourRating::new(1, 2, 4, None),
            TourRating::new(1, 3, 5, None),
        ];

        assert_eq!(average_score(&ratings), 4.0);
    }

    #[test]
    fn test_empty_average() {
        assert_eq!(average_score(&[]), 0.0);
    }
}
