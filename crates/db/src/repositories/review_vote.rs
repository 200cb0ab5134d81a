//! Review vote repository.

use std::sync::Arc;

use crate::entities::{Review, ReviewVote, review, review_vote};
use profrate_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionTrait,
    sea_query::Expr,
};

/// Review vote repository for database operations.
#[derive(Clone)]
pub struct ReviewVoteRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewVoteRepository {
    /// Create a new review vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a vote by user and review.
    pub async fn find_by_user_and_review(
        &self,
        user_id: &str,
        review_id: &str,
    ) -> AppResult<Option<review_vote::Model>> {
        ReviewVote::find()
            .filter(review_vote::Column::UserId.eq(user_id))
            .filter(review_vote::Column::ReviewId.eq(review_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has voted on a review.
    pub async fn has_voted(&self, user_id: &str, review_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_review(user_id, review_id)
            .await?
            .is_some())
    }

    /// Record a vote and bump the matching counter on the review in one
    /// transaction. The vote row's unique `(user_id, review_id)` index makes
    /// a racing duplicate cast fail the insert instead of double-counting.
    pub async fn cast(&self, model: review_vote::ActiveModel) -> AppResult<review_vote::Model> {
        let (review_id, kind) = match (&model.review_id, &model.kind) {
            (sea_orm::ActiveValue::Set(id), sea_orm::ActiveValue::Set(kind)) => {
                (id.clone(), *kind)
            }
            _ => return Err(AppError::Internal("vote without review id or kind".to_string())),
        };

        let counter = match kind {
            review_vote::VoteKind::Up => review::Column::Upvotes,
            review_vote::VoteKind::Down => review::Column::Downvotes,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Review::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .filter(review::Column::Id.eq(&review_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Count all votes.
    pub async fn count(&self) -> AppResult<u64> {
        ReviewVote::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_vote(
        id: &str,
        user_id: &str,
        review_id: &str,
        kind: review_vote::VoteKind,
    ) -> review_vote::Model {
        review_vote::Model {
            id: id.to_string(),
            review_id: review_id.to_string(),
            user_id: user_id.to_string(),
            kind,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_has_voted_true() {
        let vote = create_test_vote("v1", "u1", "r1", review_vote::VoteKind::Up);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vote.clone()]])
                .into_connection(),
        );

        let repo = ReviewVoteRepository::new(db);
        assert!(repo.has_voted("u1", "r1").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_voted_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<review_vote::Model>::new()])
                .into_connection(),
        );

        let repo = ReviewVoteRepository::new(db);
        assert!(!repo.has_voted("u1", "r1").await.unwrap());
    }
}
