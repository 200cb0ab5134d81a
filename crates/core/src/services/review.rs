//! Review service.

use profrate_common::{AppError, AppResult, IdGenerator};
use profrate_db::{
    entities::{professor, review, user},
    repositories::{ProfessorRepository, ReviewRepository},
};
use sea_orm::Set;

use crate::rating::{self, ReviewSubmission};

/// Review service for business logic.
///
/// Submission runs the whole pipeline: validate the form state, gate on
/// one-review-per-(user, professor), recompute the professor aggregate, and
/// persist review + aggregate as one atomic unit.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    professor_repo: ProfessorRepository,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(review_repo: ReviewRepository, professor_repo: ProfessorRepository) -> Self {
        Self {
            review_repo,
            professor_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a review for a professor.
    pub async fn submit(
        &self,
        author: &user::Model,
        professor_id: &str,
        submission: ReviewSubmission,
    ) -> AppResult<review::Model> {
        // Check the professor exists before validating the form
        self.professor_repo.get_by_id(professor_id).await?;

        let sanitized = submission.validate()?;

        // One review per (user, professor)
        let existing: Vec<review::Model> = self
            .review_repo
            .find_by_user_and_professor(&author.id, professor_id)
            .await?
            .into_iter()
            .collect();
        if !rating::can_submit_review(Some(&author.id), professor_id, &existing) {
            return Err(AppError::DuplicateReview);
        }

        // Recompute the professor aggregate over the current snapshot
        let averages = self.review_repo.averages_by_professor(professor_id).await?;
        let summary = rating::aggregate_with(&averages, sanitized.average_rating);

        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            professor_id: Set(professor_id.to_string()),
            user_id: Set(author.id.clone()),
            user_name: Set(author.name.clone()),
            course: Set(sanitized.course),
            teaching_quality: Set(i16::from(sanitized.scores.teaching_quality)),
            clarity: Set(i16::from(sanitized.scores.clarity)),
            helpfulness: Set(i16::from(sanitized.scores.helpfulness)),
            fairness: Set(i16::from(sanitized.scores.fairness)),
            workload: Set(i16::from(sanitized.scores.workload)),
            average_rating: Set(sanitized.average_rating),
            comment: Set(sanitized.comment),
            upvotes: Set(0),
            downvotes: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = self
            .review_repo
            .create_with_aggregate(model, summary.average_rating, summary.review_count)
            .await?;

        tracing::info!(
            review_id = %created.id,
            professor_id = %professor_id,
            average_rating = summary.average_rating,
            review_count = summary.review_count,
            "Review submitted"
        );

        Ok(created)
    }

    /// Delete a review. Allowed for the author and for administrators; the
    /// parent professor's aggregate is recomputed over the remaining set.
    pub async fn delete(&self, actor: &user::Model, review_id: &str) -> AppResult<()> {
        let review = self.review_repo.get_by_id(review_id).await?;

        if review.user_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author or an administrator can delete a review".to_string(),
            ));
        }

        let remaining = self
            .review_repo
            .averages_by_professor_excluding(&review.professor_id, review_id)
            .await?;
        let summary = rating::aggregate_remaining(&remaining);

        let professor_id = review.professor_id.clone();
        self.review_repo
            .delete_with_aggregate(review, summary.average_rating, summary.review_count)
            .await?;

        tracing::info!(
            review_id = %review_id,
            professor_id = %professor_id,
            review_count = summary.review_count,
            "Review deleted"
        );

        Ok(())
    }

    /// Get a review by ID.
    pub async fn get(&self, id: &str) -> AppResult<review::Model> {
        self.review_repo.get_by_id(id).await
    }

    /// Get reviews of a professor, newest first (paginated).
    pub async fn list_for_professor(
        &self,
        professor_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<review::Model>> {
        self.review_repo
            .find_by_professor(professor_id, limit, until_id)
            .await
    }

    /// Get a user's reviews together with the professors they reference.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<(review::Model, professor::Model)>> {
        let reviews = self.review_repo.find_by_user(user_id).await?;

        let professor_ids: Vec<String> = reviews.iter().map(|r| r.professor_id.clone()).collect();
        let professors = self.professor_repo.find_by_ids(&professor_ids).await?;

        Ok(reviews
            .into_iter()
            .filter_map(|review| {
                professors
                    .iter()
                    .find(|p| p.id == review.professor_id)
                    .cloned()
                    .map(|professor| (review, professor))
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rating::ReviewScores;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn test_user(id: &str, role: user::Role) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.edu"),
            email_lower: format!("{id}@example.edu"),
            password_hash: "$argon2id$test".to_string(),
            token: None,
            name: "Test Student".to_string(),
            role,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_professor(id: &str) -> professor::Model {
        professor::Model {
            id: id.to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            department: "Computer Science".to_string(),
            courses: json!(["CS 101"]),
            email: None,
            average_rating: 0.0,
            review_count: 0,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_review(id: &str, user_id: &str, professor_id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            professor_id: professor_id.to_string(),
            user_id: user_id.to_string(),
            user_name: "Test Student".to_string(),
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

    fn submission() -> ReviewSubmission {
        ReviewSubmission {
            course: "CS 101".to_string(),
            ratings: ReviewScores {
                teaching_quality: 5,
                clarity: 5,
                helpfulness: 4,
                fairness: 5,
                workload: 4,
            },
            comment: String::new(),
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_duplicate_review() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // professor lookup
                .append_query_results([[test_professor("p1")]])
                // existing review by this author
                .append_query_results([[test_review("r1", "u1", "p1")]])
                .into_connection(),
        );

        let service = ReviewService::new(
            ReviewRepository::new(Arc::clone(&db)),
            ProfessorRepository::new(db),
        );

        let result = service
            .submit(&test_user("u1", user::Role::Student), "p1", submission())
            .await;

        assert!(matches!(result, Err(AppError::DuplicateReview)));
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_ratings() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_professor("p1")]])
                .into_connection(),
        );

        let service = ReviewService::new(
            ReviewRepository::new(Arc::clone(&db)),
            ProfessorRepository::new(db),
        );

        let mut incomplete = submission();
        incomplete.ratings.clarity = 0;

        let result = service
            .submit(&test_user("u1", user::Role::Student), "p1", incomplete)
            .await;

        assert!(matches!(result, Err(AppError::IncompleteRatings)));
    }

    #[tokio::test]
    async fn test_submit_unknown_professor() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<professor::Model>::new()])
                .into_connection(),
        );

        let service = ReviewService::new(
            ReviewRepository::new(Arc::clone(&db)),
            ProfessorRepository::new(db),
        );

        let result = service
            .submit(&test_user("u1", user::Role::Student), "missing", submission())
            .await;

        assert!(matches!(result, Err(AppError::ProfessorNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_author_or_admin() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_review("r1", "u1", "p1")]])
                .into_connection(),
        );

        let service = ReviewService::new(
            ReviewRepository::new(Arc::clone(&db)),
            ProfessorRepository::new(db),
        );

        let result = service
            .delete(&test_user("u2", user::Role::Student), "r1")
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
