//! Rating aggregation, review validation, and review authorization.
//!
//! Everything in this module is a pure, synchronous function over plain
//! data: the aggregator that keeps a professor's denormalized
//! `average_rating`/`review_count` in step with its review set, the
//! validator that gates a submission before it reaches the aggregator, and
//! the gate that decides whether a viewer may submit a review or cast a
//! vote. Persistence happens elsewhere; callers hand these functions a
//! consistent snapshot and store what comes back.

use profrate_common::{AppError, AppResult};
use profrate_db::entities::review;
use serde::{Deserialize, Serialize};

pub use profrate_db::entities::review_vote::VoteKind;

/// The five fixed category scores composing a single review.
///
/// A score of 0 means "unset"; valid scores are 1-5 inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewScores {
    pub teaching_quality: u8,
    pub clarity: u8,
    pub helpfulness: u8,
    pub fairness: u8,
    pub workload: u8,
}

impl ReviewScores {
    /// The scores in category order.
    #[must_use]
    pub const fn as_array(&self) -> [u8; 5] {
        [
            self.teaching_quality,
            self.clarity,
            self.helpfulness,
            self.fairness,
            self.workload,
        ]
    }

    /// Whether every category has a score in 1..=5.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.as_array().iter().all(|s| (1..=5).contains(s))
    }

    /// Arithmetic mean of the five category scores.
    ///
    /// Plain floating-point division; no rounding is applied here.
    /// Rounding to one decimal is a presentation concern.
    #[must_use]
    pub fn average(&self) -> f64 {
        let sum: u32 = self.as_array().iter().map(|&s| u32::from(s)).sum();
        f64::from(sum) / 5.0
    }
}

/// A professor's denormalized rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean of `average_rating` over the professor's reviews.
    pub average_rating: f64,
    /// Number of reviews.
    pub review_count: i32,
}

impl RatingSummary {
    /// The aggregate of a professor with no reviews.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            average_rating: 0.0,
            review_count: 0,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Aggregate after adding a review.
///
/// `existing` holds the per-review average ratings currently referencing
/// the professor (order irrelevant); `new_average` is the average of the
/// review being added. Deterministic and side-effect free. Scores are not
/// validated here; a NaN in the input propagates into the result.
#[must_use]
pub fn aggregate_with(existing: &[f64], new_average: f64) -> RatingSummary {
    let count = existing.len() + 1;
    let sum = existing.iter().sum::<f64>() + new_average;
    RatingSummary {
        average_rating: sum / count as f64,
        review_count: count as i32,
    }
}

/// Aggregate after removing a review, recomputed over the remaining set.
///
/// An empty remainder yields the zero aggregate.
#[must_use]
pub fn aggregate_remaining(remaining: &[f64]) -> RatingSummary {
    RatingSummary {
        average_rating: mean(remaining),
        review_count: remaining.len() as i32,
    }
}

/// A review submission as it arrives from the client form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    /// Course the reviewer took.
    pub course: String,
    /// The five category scores (0 = unset).
    pub ratings: ReviewScores,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: String,
}

/// A validated, trimmed review ready for aggregation and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedReview {
    pub course: String,
    pub scores: ReviewScores,
    pub comment: String,
    /// Mean of the five category scores.
    pub average_rating: f64,
}

impl ReviewSubmission {
    /// Validate the submission.
    ///
    /// Rejects with [`AppError::IncompleteRatings`] when any category score
    /// is unset or out of range, and with [`AppError::MissingCourse`] when
    /// the course field is empty after trimming. On success the course and
    /// comment are trimmed and the five scores pass through unchanged.
    pub fn validate(self) -> AppResult<SanitizedReview> {
        if !self.ratings.is_complete() {
            return Err(AppError::IncompleteRatings);
        }

        let course = self.course.trim().to_string();
        if course.is_empty() {
            return Err(AppError::MissingCourse);
        }

        let average_rating = self.ratings.average();

        Ok(SanitizedReview {
            course,
            scores: self.ratings,
            comment: self.comment.trim().to_string(),
            average_rating,
        })
    }
}

/// Whether a viewer may submit a review for a professor.
///
/// True iff a viewer identity is present and no review in `existing`
/// carries the same `(user_id, professor_id)` pair.
#[must_use]
pub fn can_submit_review(
    viewer_id: Option<&str>,
    professor_id: &str,
    existing: &[review::Model],
) -> bool {
    let Some(viewer_id) = viewer_id else {
        return false;
    };
    !existing
        .iter()
        .any(|r| r.user_id == viewer_id && r.professor_id == professor_id)
}

/// Whether a viewer may cast a vote on a review.
///
/// True iff a viewer identity is present and they have not already voted on
/// this review. The `has_voted` flag comes from the durable per-(viewer,
/// review) vote record; once a vote is cast the transition is terminal, so
/// there is no path back to eligibility.
#[must_use]
pub fn can_vote(viewer_id: Option<&str>, has_voted: bool) -> bool {
    viewer_id.is_some() && !has_voted
}

/// Apply a vote to a review, incrementing exactly one counter by one.
#[must_use]
pub fn apply_vote(mut review: review::Model, kind: VoteKind) -> review::Model {
    match kind {
        VoteKind::Up => review.upvotes += 1,
        VoteKind::Down => review.downvotes += 1,
    }
    review
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    const TOLERANCE: f64 = 1e-9;

    fn scores(t: u8, c: u8, h: u8, f: u8, w: u8) -> ReviewScores {
        ReviewScores {
            teaching_quality: t,
            clarity: c,
            helpfulness: h,
            fairness: f,
            workload: w,
        }
    }

    fn test_review(id: &str, user_id: &str, professor_id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            professor_id: professor_id.to_string(),
            user_id: user_id.to_string(),
            user_name: "Student".to_string(),
            course: "CS 101".to_string(),
            teaching_quality: 4,
            clarity: 4,
            helpfulness: 4,
            fairness: 4,
            workload: 4,
            average_rating: 4.0,
            comment: String::new(),
            upvotes: 2,
            downvotes: 1,
            created_at: Utc::now().into(),
        }
    }

    // === Aggregator ===

    #[test]
    fn test_scores_average() {
        assert!((scores(5, 5, 4, 5, 4).average() - 4.6).abs() < TOLERANCE);
        assert!((scores(3, 3, 3, 3, 3).average() - 3.0).abs() < TOLERANCE);
        assert!((scores(1, 2, 3, 4, 5).average() - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_aggregate_with_matches_full_mean() {
        let existing = [4.2, 3.8, 5.0, 2.6];
        let result = aggregate_with(&existing, 4.0);

        let expected = (4.2 + 3.8 + 5.0 + 2.6 + 4.0) / 5.0;
        assert!((result.average_rating - expected).abs() < TOLERANCE);
        assert_eq!(result.review_count, 5);
    }

    #[test]
    fn test_aggregate_with_first_review() {
        let result = aggregate_with(&[], 4.6);
        assert!((result.average_rating - 4.6).abs() < TOLERANCE);
        assert_eq!(result.review_count, 1);
    }

    #[test]
    fn test_aggregate_remaining_empty_set_is_zero() {
        let result = aggregate_remaining(&[]);
        assert_eq!(result, RatingSummary::empty());
    }

    #[test]
    fn test_removal_matches_recomputation_from_scratch() {
        // Removing one element and recomputing over the remainder must agree
        // with computing the reduced set directly.
        let full = [4.2, 3.8, 5.0, 2.6, 4.0];
        for removed in 0..full.len() {
            let remaining: Vec<f64> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != removed)
                .map(|(_, &v)| v)
                .collect();

            let incremental = aggregate_remaining(&remaining);
            let from_scratch = RatingSummary {
                average_rating: remaining.iter().sum::<f64>() / remaining.len() as f64,
                review_count: remaining.len() as i32,
            };

            assert!(
                (incremental.average_rating - from_scratch.average_rating).abs() < TOLERANCE
            );
            assert_eq!(incremental.review_count, from_scratch.review_count);
        }
    }

    #[test]
    fn test_nan_propagates_through_aggregation() {
        let result = aggregate_with(&[4.0, f64::NAN], 3.0);
        assert!(result.average_rating.is_nan());
        assert_eq!(result.review_count, 3);
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Professor with zero reviews; review A {5,5,4,5,4} then B {3,3,3,3,3}.
        let a = scores(5, 5, 4, 5, 4).average();
        let first = aggregate_with(&[], a);
        assert!((first.average_rating - 4.6).abs() < TOLERANCE);
        assert_eq!(first.review_count, 1);

        let b = scores(3, 3, 3, 3, 3).average();
        let second = aggregate_with(&[a], b);
        assert!((second.average_rating - 3.8).abs() < TOLERANCE);
        assert_eq!(second.review_count, 2);
    }

    // === Validator ===

    #[test]
    fn test_validate_accepts_complete_submission() {
        let submission = ReviewSubmission {
            course: "  CS 101 - Introduction to Computer Science  ".to_string(),
            ratings: scores(5, 5, 4, 5, 4),
            comment: "  Great lectures.  ".to_string(),
        };

        let sanitized = submission.validate().unwrap();
        assert_eq!(sanitized.course, "CS 101 - Introduction to Computer Science");
        assert_eq!(sanitized.comment, "Great lectures.");
        assert_eq!(sanitized.scores, scores(5, 5, 4, 5, 4));
        assert!((sanitized.average_rating - 4.6).abs() < TOLERANCE);
    }

    #[test]
    fn test_validate_rejects_unset_category() {
        for unset in 0..5 {
            let mut s = [4u8; 5];
            s[unset] = 0;
            let submission = ReviewSubmission {
                course: "CS 101".to_string(),
                ratings: scores(s[0], s[1], s[2], s[3], s[4]),
                comment: String::new(),
            };

            assert!(matches!(
                submission.validate(),
                Err(AppError::IncompleteRatings)
            ));
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let submission = ReviewSubmission {
            course: "CS 101".to_string(),
            ratings: scores(6, 4, 4, 4, 4),
            comment: String::new(),
        };

        assert!(matches!(
            submission.validate(),
            Err(AppError::IncompleteRatings)
        ));
    }

    #[test]
    fn test_validate_rejects_blank_course() {
        let submission = ReviewSubmission {
            course: "   ".to_string(),
            ratings: scores(4, 4, 4, 4, 4),
            comment: String::new(),
        };

        assert!(matches!(submission.validate(), Err(AppError::MissingCourse)));
    }

    #[test]
    fn test_validate_accepts_empty_comment() {
        let submission = ReviewSubmission {
            course: "MATH 201".to_string(),
            ratings: scores(1, 1, 1, 1, 1),
            comment: String::new(),
        };

        let sanitized = submission.validate().unwrap();
        assert!(sanitized.comment.is_empty());
        assert!((sanitized.average_rating - 1.0).abs() < TOLERANCE);
    }

    // === Authorization gate ===

    #[test]
    fn test_can_submit_review_requires_viewer() {
        assert!(!can_submit_review(None, "p1", &[]));
        assert!(can_submit_review(Some("u1"), "p1", &[]));
    }

    #[test]
    fn test_can_submit_review_rejects_duplicate() {
        let existing = vec![test_review("r1", "u1", "p1")];

        assert!(!can_submit_review(Some("u1"), "p1", &existing));
        // A different viewer, or the same viewer on a different professor,
        // is still eligible.
        assert!(can_submit_review(Some("u2"), "p1", &existing));
        assert!(can_submit_review(Some("u1"), "p2", &existing));
    }

    #[test]
    fn test_can_vote() {
        assert!(can_vote(Some("u1"), false));
        assert!(!can_vote(Some("u1"), true));
        assert!(!can_vote(None, false));
    }

    #[test]
    fn test_apply_vote_increments_exactly_one_counter() {
        let review = test_review("r1", "u1", "p1");
        let before = review.clone();

        let upvoted = apply_vote(review.clone(), VoteKind::Up);
        assert_eq!(upvoted.upvotes, before.upvotes + 1);
        assert_eq!(upvoted.downvotes, before.downvotes);

        let downvoted = apply_vote(review, VoteKind::Down);
        assert_eq!(downvoted.downvotes, before.downvotes + 1);
        assert_eq!(downvoted.upvotes, before.upvotes);

        // Every other field is untouched.
        assert_eq!(upvoted.id, before.id);
        assert_eq!(upvoted.average_rating, before.average_rating);
        assert_eq!(upvoted.comment, before.comment);
    }
}
