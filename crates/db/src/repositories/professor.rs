//! Professor repository.

use std::sync::Arc;

use crate::entities::{Professor, professor};
use profrate_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
    sea_query::Expr,
};

/// Professor repository for database operations.
#[derive(Clone)]
pub struct ProfessorRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfessorRepository {
    /// Create a new professor repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a professor by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<professor::Model>> {
        Professor::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a professor by ID, failing if it does not exist.
    pub async fn get_by_id(&self, id: &str) -> AppResult<professor::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ProfessorNotFound(id.to_string()))
    }

    /// Find professors by a set of IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<professor::Model>> {
        Professor::find()
            .filter(professor::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all professors, ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<professor::Model>> {
        Professor::find()
            .order_by_asc(professor::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List professors in a department, ordered by name.
    pub async fn find_by_department(&self, department: &str) -> AppResult<Vec<professor::Model>> {
        Professor::find()
            .filter(professor::Column::Department.eq(department))
            .order_by_asc(professor::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new professor.
    pub async fn create(&self, model: professor::ActiveModel) -> AppResult<professor::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a professor.
    pub async fn update(&self, model: professor::ActiveModel) -> AppResult<professor::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a professor. Referencing reviews and favorites are removed by
    /// the cascade on their foreign keys.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let professor = self.get_by_id(id).await?;
        professor
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Overwrite a professor's denormalized rating aggregate.
    pub async fn update_aggregate(
        &self,
        id: &str,
        average_rating: f64,
        review_count: i32,
    ) -> AppResult<()> {
        Professor::update_many()
            .col_expr(professor::Column::AverageRating, Expr::value(average_rating))
            .col_expr(professor::Column::ReviewCount, Expr::value(review_count))
            .filter(professor::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all professors.
    pub async fn count(&self) -> AppResult<u64> {
        Professor::find()
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
    use serde_json::json;

    fn create_test_professor(id: &str, name: &str, department: &str) -> professor::Model {
        professor::Model {
            id: id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            courses: json!(["CS 101 - Introduction to Programming"]),
            email: None,
            average_rating: 0.0,
            review_count: 0,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let professor = create_test_professor("p1", "Dr. Sarah Johnson", "Computer Science");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[professor.clone()]])
                .into_connection(),
        );

        let repo = ProfessorRepository::new(db);
        let result = repo.get_by_id("p1").await.unwrap();

        assert_eq!(result.name, "Dr. Sarah Johnson");
        assert_eq!(result.course_list().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<professor::Model>::new()])
                .into_connection(),
        );

        let repo = ProfessorRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::ProfessorNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_ordered() {
        let professors = vec![
            create_test_professor("p1", "Dr. Emily Rodriguez", "Physics"),
            create_test_professor("p2", "Prof. Michael Chen", "Mathematics"),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([professors.clone()])
                .into_connection(),
        );

        let repo = ProfessorRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
