//! Review repository.

use std::sync::Arc;

use crate::entities::{Professor, Review, professor, review};
use profrate_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::Expr,
};

/// Review repository for database operations.
///
/// A review insert or delete always changes the parent professor's
/// denormalized aggregate; the paired writes run in a single transaction.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a review by ID, failing if it does not exist.
    pub async fn get_by_id(&self, id: &str) -> AppResult<review::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(id.to_string()))
    }

    /// Find a review by author and professor.
    pub async fn find_by_user_and_professor(
        &self,
        user_id: &str,
        professor_id: &str,
    ) -> AppResult<Option<review::Model>> {
        Review::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::ProfessorId.eq(professor_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has already reviewed a professor.
    pub async fn has_reviewed(&self, user_id: &str, professor_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_professor(user_id, professor_id)
            .await?
            .is_some())
    }

    /// Get reviews of a professor, newest first (paginated).
    pub async fn find_by_professor(
        &self,
        professor_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<review::Model>> {
        let mut query = Review::find()
            .filter(review::Column::ProfessorId.eq(professor_id))
            .order_by_desc(review::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(review::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reviews written by a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the stored `average_rating` of every review of a professor.
    ///
    /// This is the snapshot the rating aggregator recomputes over.
    pub async fn averages_by_professor(&self, professor_id: &str) -> AppResult<Vec<f64>> {
        Review::find()
            .select_only()
            .column(review::Column::AverageRating)
            .filter(review::Column::ProfessorId.eq(professor_id))
            .into_tuple::<f64>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the stored `average_rating` of every review of a professor except
    /// one, used when recomputing the aggregate for a pending removal.
    pub async fn averages_by_professor_excluding(
        &self,
        professor_id: &str,
        review_id: &str,
    ) -> AppResult<Vec<f64>> {
        Review::find()
            .select_only()
            .column(review::Column::AverageRating)
            .filter(review::Column::ProfessorId.eq(professor_id))
            .filter(review::Column::Id.ne(review_id))
            .into_tuple::<f64>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a review and overwrite the parent professor's aggregate in one
    /// transaction.
    pub async fn create_with_aggregate(
        &self,
        model: review::ActiveModel,
        average_rating: f64,
        review_count: i32,
    ) -> AppResult<review::Model> {
        let professor_id = match &model.professor_id {
            sea_orm::ActiveValue::Set(id) => id.clone(),
            _ => return Err(AppError::Internal("review without professor id".to_string())),
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

        Professor::update_many()
            .col_expr(professor::Column::AverageRating, Expr::value(average_rating))
            .col_expr(professor::Column::ReviewCount, Expr::value(review_count))
            .filter(professor::Column::Id.eq(&professor_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Delete a review and overwrite the parent professor's aggregate in one
    /// transaction.
    pub async fn delete_with_aggregate(
        &self,
        review: review::Model,
        average_rating: f64,
        review_count: i32,
    ) -> AppResult<()> {
        let professor_id = review.professor_id.clone();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        review
            .delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Professor::update_many()
            .col_expr(professor::Column::AverageRating, Expr::value(average_rating))
            .col_expr(professor::Column::ReviewCount, Expr::value(review_count))
            .filter(professor::Column::Id.eq(&professor_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Get the most recent reviews across all professors.
    pub async fn find_recent(&self, limit: u64) -> AppResult<Vec<review::Model>> {
        Review::find()
            .order_by_desc(review::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all reviews.
    pub async fn count(&self) -> AppResult<u64> {
        Review::find()
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

    pub(crate) fn create_test_review(
        id: &str,
        user_id: &str,
        professor_id: &str,
        average_rating: f64,
    ) -> review::Model {
        review::Model {
            id: id.to_string(),
            professor_id: professor_id.to_string(),
            user_id: user_id.to_string(),
            user_name: "Test Student".to_string(),
            course: "CS 101 - Introduction to Programming".to_string(),
            teaching_quality: 5,
            clarity: 5,
            helpfulness: 4,
            fairness: 5,
            workload: 4,
            average_rating,
            comment: String::new(),
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_and_professor() {
        let review = create_test_review("r1", "u1", "p1", 4.6);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[review.clone()]])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo.find_by_user_and_professor("u1", "p1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().average_rating, 4.6);
    }

    #[tokio::test]
    async fn test_has_reviewed_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<review::Model>::new()])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        assert!(!repo.has_reviewed("u1", "p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<review::Model>::new()])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::ReviewNotFound(_))));
    }
}
