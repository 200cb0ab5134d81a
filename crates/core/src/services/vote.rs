//! Vote service.

use profrate_common::{AppError, AppResult, IdGenerator};
use profrate_db::{
    entities::{review_vote, review_vote::VoteKind},
    repositories::{ReviewRepository, ReviewVoteRepository},
};
use sea_orm::Set;

use crate::rating;

/// Vote service for business logic.
///
/// Vote eligibility is tracked durably per (viewer, review): once a vote is
/// cast it cannot be retracted, and a page reload does not reset
/// eligibility.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: ReviewVoteRepository,
    review_repo: ReviewRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: ReviewVoteRepository, review_repo: ReviewRepository) -> Self {
        Self {
            vote_repo,
            review_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a vote on a review, incrementing exactly one of its counters.
    pub async fn cast(
        &self,
        user_id: &str,
        review_id: &str,
        kind: VoteKind,
    ) -> AppResult<review_vote::Model> {
        // Check the review exists
        self.review_repo.get_by_id(review_id).await?;

        let has_voted = self.vote_repo.has_voted(user_id, review_id).await?;
        if !rating::can_vote(Some(user_id), has_voted) {
            return Err(AppError::AlreadyVoted);
        }

        let model = review_vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            review_id: Set(review_id.to_string()),
            user_id: Set(user_id.to_string()),
            kind: Set(kind),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.vote_repo.cast(model).await
    }

    /// Check whether a user has voted on a review.
    pub async fn has_voted(&self, user_id: &str, review_id: &str) -> AppResult<bool> {
        self.vote_repo.has_voted(user_id, review_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use profrate_db::entities::review;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_review(id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            professor_id: "p1".to_string(),
            user_id: "author".to_string(),
            user_name: "Author".to_string(),
            course: "CS 101".to_string(),
            teaching_quality: 4,
            clarity: 4,
            helpfulness: 4,
            fairness: 4,
            workload: 4,
            average_rating: 4.0,
            comment: String::new(),
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now().into(),
        }
    }

    fn test_vote(id: &str, user_id: &str, review_id: &str) -> review_vote::Model {
        review_vote::Model {
            id: id.to_string(),
            review_id: review_id.to_string(),
            user_id: user_id.to_string(),
            kind: VoteKind::Up,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_cast_rejects_second_vote() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // review lookup
                .append_query_results([[test_review("r1")]])
                // existing vote by this viewer
                .append_query_results([[test_vote("v1", "u1", "r1")]])
                .into_connection(),
        );

        let service = VoteService::new(
            ReviewVoteRepository::new(Arc::clone(&db)),
            ReviewRepository::new(db),
        );

        let result = service.cast("u1", "r1", VoteKind::Down).await;

        assert!(matches!(result, Err(AppError::AlreadyVoted)));
    }

    #[tokio::test]
    async fn test_cast_unknown_review() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<review::Model>::new()])
                .into_connection(),
        );

        let service = VoteService::new(
            ReviewVoteRepository::new(Arc::clone(&db)),
            ReviewRepository::new(db),
        );

        let result = service.cast("u1", "missing", VoteKind::Up).await;

        assert!(matches!(result, Err(AppError::ReviewNotFound(_))));
    }
}
