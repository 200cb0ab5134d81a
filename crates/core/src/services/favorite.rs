//! Favorite service (professors bookmarked by a user).

use profrate_common::{AppError, AppResult, IdGenerator};
use profrate_db::{
    entities::{favorite, professor},
    repositories::{FavoriteRepository, ProfessorRepository},
};
use sea_orm::Set;

/// Favorite service for managing bookmarked professors.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    professor_repo: ProfessorRepository,
    id_gen: IdGenerator,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub const fn new(
        favorite_repo: FavoriteRepository,
        professor_repo: ProfessorRepository,
    ) -> Self {
        Self {
            favorite_repo,
            professor_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a professor to favorites.
    pub async fn create(&self, user_id: &str, professor_id: &str) -> AppResult<favorite::Model> {
        // Check the professor exists
        self.professor_repo.get_by_id(professor_id).await?;

        // Check if already favorited
        if self.favorite_repo.is_favorited(user_id, professor_id).await? {
            return Err(AppError::BadRequest(
                "Professor already favorited".to_string(),
            ));
        }

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            professor_id: Set(professor_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.favorite_repo.create(model).await
    }

    /// Remove a professor from favorites.
    pub async fn delete(&self, user_id: &str, professor_id: &str) -> AppResult<()> {
        if !self.favorite_repo.is_favorited(user_id, professor_id).await? {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        self.favorite_repo
            .delete_by_user_and_professor(user_id, professor_id)
            .await
    }

    /// Check if a professor is favorited by a user.
    pub async fn is_favorited(&self, user_id: &str, professor_id: &str) -> AppResult<bool> {
        self.favorite_repo.is_favorited(user_id, professor_id).await
    }

    /// Get a user's favorited professors (paginated).
    pub async fn list(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<(favorite::Model, professor::Model)>> {
        let favorites = self
            .favorite_repo
            .find_by_user(user_id, limit, until_id)
            .await?;

        let professor_ids: Vec<String> = favorites
            .iter()
            .map(|f| f.professor_id.clone())
            .collect();
        let professors = self.professor_repo.find_by_ids(&professor_ids).await?;

        Ok(favorites
            .into_iter()
            .filter_map(|favorite| {
                professors
                    .iter()
                    .find(|p| p.id == favorite.professor_id)
                    .cloned()
                    .map(|professor| (favorite, professor))
            })
            .collect())
    }

    /// Count a user's favorites.
    pub async fn count(&self, user_id: &str) -> AppResult<u64> {
        self.favorite_repo.count_by_user(user_id).await
    }
}
