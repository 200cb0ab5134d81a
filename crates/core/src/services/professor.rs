//! Professor service.

use profrate_common::{AppError, AppResult, IdGenerator};
use profrate_db::{
    entities::professor,
    repositories::ProfessorRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum number of professors in a single comparison.
const MAX_COMPARED: usize = 3;

/// Maximum number of course labels on a professor profile.
const MAX_COURSES: usize = 20;

/// Professor service for business logic.
#[derive(Clone)]
pub struct ProfessorService {
    professor_repo: ProfessorRepository,
    id_gen: IdGenerator,
}

/// Input for creating a professor profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfessorInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub department: String,

    #[validate(length(max = 20))]
    pub courses: Vec<String>,

    #[validate(email)]
    pub email: Option<String>,
}

/// Input for updating a professor profile. Administrator action.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfessorInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 20))]
    pub courses: Option<Vec<String>>,

    #[validate(email)]
    pub email: Option<String>,
}

/// Sort orders for professor listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessorSort {
    #[default]
    Name,
    Rating,
    Reviews,
}

/// Aggregated view of one department.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub name: String,
    pub professor_count: usize,
    pub review_count: i64,
    pub course_count: usize,
    /// Mean of professor average ratings in the department.
    pub average_rating: f64,
}

impl ProfessorService {
    /// Create a new professor service.
    #[must_use]
    pub const fn new(professor_repo: ProfessorRepository) -> Self {
        Self {
            professor_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a professor profile with zeroed rating aggregates.
    pub async fn create(
        &self,
        created_by: &str,
        input: CreateProfessorInput,
    ) -> AppResult<professor::Model> {
        input.validate()?;

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Professor name is required".to_string()));
        }

        let department = input.department.trim().to_string();
        if department.is_empty() {
            return Err(AppError::Validation("Department is required".to_string()));
        }

        let courses = normalize_courses(input.courses)?;

        let model = professor::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name),
            department: Set(department),
            courses: Set(serde_json::json!(courses)),
            email: Set(input.email.map(|e| e.trim().to_string())),
            average_rating: Set(0.0),
            review_count: Set(0),
            created_by: Set(Some(created_by.to_string())),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.professor_repo.create(model).await
    }

    /// Get a professor by ID.
    pub async fn get(&self, id: &str) -> AppResult<professor::Model> {
        self.professor_repo.get_by_id(id).await
    }

    /// Update a professor profile.
    pub async fn update(&self, id: &str, input: UpdateProfessorInput) -> AppResult<professor::Model> {
        input.validate()?;

        let professor = self.professor_repo.get_by_id(id).await?;
        let mut model: professor::ActiveModel = professor.into();

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Professor name is required".to_string()));
            }
            model.name = Set(name);
        }
        if let Some(department) = input.department {
            let department = department.trim().to_string();
            if department.is_empty() {
                return Err(AppError::Validation("Department is required".to_string()));
            }
            model.department = Set(department);
        }
        if let Some(courses) = input.courses {
            model.courses = Set(serde_json::json!(normalize_courses(courses)?));
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email.trim().to_string()));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.professor_repo.update(model).await
    }

    /// Delete a professor and, through the cascade, all referencing reviews
    /// and favorites. Administrator action.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.professor_repo.delete(id).await
    }

    /// List professors with optional search, department filter, and sort.
    ///
    /// Search matches case-insensitively over name, department, and course
    /// labels, the way the browse page filters the fetched snapshot.
    pub async fn list(
        &self,
        search: Option<&str>,
        department: Option<&str>,
        sort: ProfessorSort,
    ) -> AppResult<Vec<professor::Model>> {
        let mut professors = match department {
            Some(department) => self.professor_repo.find_by_department(department).await?,
            None => self.professor_repo.find_all().await?,
        };

        if let Some(query) = search {
            let query = query.to_lowercase();
            professors.retain(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.department.to_lowercase().contains(&query)
                    || p.course_list()
                        .iter()
                        .any(|c| c.to_lowercase().contains(&query))
            });
        }

        match sort {
            ProfessorSort::Name => {
                professors.sort_by(|a, b| a.name.cmp(&b.name));
            }
            ProfessorSort::Rating => {
                professors.sort_by(|a, b| {
                    b.average_rating
                        .partial_cmp(&a.average_rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            ProfessorSort::Reviews => {
                professors.sort_by(|a, b| b.review_count.cmp(&a.review_count));
            }
        }

        Ok(professors)
    }

    /// Group all professors by department.
    pub async fn departments(&self) -> AppResult<Vec<DepartmentSummary>> {
        let professors = self.professor_repo.find_all().await?;

        let mut departments: Vec<DepartmentSummary> = Vec::new();
        for professor in &professors {
            let idx = departments
                .iter()
                .position(|d| d.name == professor.department)
                .unwrap_or_else(|| {
                    departments.push(DepartmentSummary {
                        name: professor.department.clone(),
                        professor_count: 0,
                        review_count: 0,
                        course_count: 0,
                        average_rating: 0.0,
                    });
                    departments.len() - 1
                });
            let summary = &mut departments[idx];

            summary.professor_count += 1;
            summary.review_count += i64::from(professor.review_count);
            summary.course_count += professor.course_list().len();
            // Accumulate the sum; divided once all professors are grouped.
            summary.average_rating += professor.average_rating;
        }

        for summary in &mut departments {
            if summary.professor_count > 0 {
                summary.average_rating /= summary.professor_count as f64;
            }
        }

        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    /// Fetch professors for side-by-side comparison, in the requested order.
    pub async fn compare(&self, ids: &[String]) -> AppResult<Vec<professor::Model>> {
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "At least one professor is required".to_string(),
            ));
        }
        if ids.len() > MAX_COMPARED {
            return Err(AppError::BadRequest(format!(
                "Up to {MAX_COMPARED} professors can be compared at a time"
            )));
        }

        let mut deduped = ids.to_vec();
        deduped.dedup();
        if deduped.len() != ids.len() {
            return Err(AppError::BadRequest(
                "A professor can only appear once in a comparison".to_string(),
            ));
        }

        let found = self.professor_repo.find_by_ids(ids).await?;

        // Preserve the requested order and fail on unknown IDs.
        ids.iter()
            .map(|id| {
                found
                    .iter()
                    .find(|p| &p.id == id)
                    .cloned()
                    .ok_or_else(|| AppError::ProfessorNotFound(id.clone()))
            })
            .collect()
    }

    /// Count all professors.
    pub async fn count(&self) -> AppResult<u64> {
        self.professor_repo.count().await
    }
}

/// Trim course labels and drop empties, preserving order.
fn normalize_courses(courses: Vec<String>) -> AppResult<Vec<String>> {
    let courses: Vec<String> = courses
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if courses.len() > MAX_COURSES {
        return Err(AppError::Validation("Too many courses".to_string()));
    }
    if courses.iter().any(|c| c.len() > 200) {
        return Err(AppError::Validation("Course label too long".to_string()));
    }

    Ok(courses)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_professor(
        id: &str,
        name: &str,
        department: &str,
        average_rating: f64,
        review_count: i32,
    ) -> professor::Model {
        professor::Model {
            id: id.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            courses: json!(["CS 101 - Introduction to Programming", "CS 201 - Data Structures"]),
            email: None,
            average_rating,
            review_count,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(professors: Vec<professor::Model>) -> ProfessorService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([professors])
                .into_connection(),
        );
        ProfessorService::new(ProfessorRepository::new(db))
    }

    #[test]
    fn test_normalize_courses_trims_and_drops_empties() {
        let courses = normalize_courses(vec![
            "  CS 101  ".to_string(),
            String::new(),
            "   ".to_string(),
            "CS 201".to_string(),
        ])
        .unwrap();

        assert_eq!(courses, vec!["CS 101".to_string(), "CS 201".to_string()]);
    }

    #[tokio::test]
    async fn test_list_search_matches_courses() {
        let service = service_with(vec![
            create_test_professor("p1", "Dr. Sarah Johnson", "Computer Science", 4.8, 45),
            create_test_professor("p2", "Prof. Michael Chen", "Mathematics", 4.6, 38),
        ]);

        let result = service
            .list(Some("data structures"), None, ProfessorSort::Name)
            .await
            .unwrap();

        assert_eq!(result.len(), 2); // Both carry CS 201 - Data Structures
    }

    #[tokio::test]
    async fn test_list_sort_by_rating() {
        let service = service_with(vec![
            create_test_professor("p1", "Dr. A", "Physics", 3.2, 10),
            create_test_professor("p2", "Dr. B", "Physics", 4.9, 52),
            create_test_professor("p3", "Dr. C", "Physics", 4.1, 20),
        ]);

        let result = service.list(None, None, ProfessorSort::Rating).await.unwrap();

        assert_eq!(result[0].id, "p2");
        assert_eq!(result[1].id, "p3");
        assert_eq!(result[2].id, "p1");
    }

    #[tokio::test]
    async fn test_departments_grouping() {
        let service = service_with(vec![
            create_test_professor("p1", "Dr. A", "Physics", 4.0, 10),
            create_test_professor("p2", "Dr. B", "Physics", 5.0, 20),
            create_test_professor("p3", "Dr. C", "Mathematics", 3.0, 5),
        ]);

        let departments = service.departments().await.unwrap();

        assert_eq!(departments.len(), 2);
        let physics = departments.iter().find(|d| d.name == "Physics").unwrap();
        assert_eq!(physics.professor_count, 2);
        assert_eq!(physics.review_count, 30);
        assert_eq!(physics.course_count, 4);
        assert!((physics.average_rating - 4.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_compare_rejects_more_than_three() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ProfessorService::new(ProfessorRepository::new(db));

        let ids: Vec<String> = (1..=4).map(|i| format!("p{i}")).collect();
        let result = service.compare(&ids).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_compare_preserves_requested_order() {
        let service = service_with(vec![
            create_test_professor("p1", "Dr. A", "Physics", 4.0, 10),
            create_test_professor("p2", "Dr. B", "Physics", 5.0, 20),
        ]);

        let ids = vec!["p2".to_string(), "p1".to_string()];
        let result = service.compare(&ids).await.unwrap();

        assert_eq!(result[0].id, "p2");
        assert_eq!(result[1].id, "p1");
    }
}
