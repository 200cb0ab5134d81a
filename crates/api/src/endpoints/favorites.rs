//! Favorite endpoints (professors bookmarked by the current user).

use axum::{Json, Router, extract::State, routing::post};
use profrate_common::AppResult;
use profrate_db::entities::favorite;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::professors::ProfessorResponse, extractors::AuthUser, middleware::AppState,
    response::ApiResponse,
};

/// Favorite request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub professor_id: String,
}

/// Favorite response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub professor_id: String,
    pub created_at: String,
}

impl From<favorite::Model> for FavoriteResponse {
    fn from(f: favorite::Model) -> Self {
        Self {
            id: f.id,
            professor_id: f.professor_id,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Favorited professor response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritedProfessorResponse {
    pub id: String,
    pub created_at: String,
    pub professor: ProfessorResponse,
}

/// List favorites request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritesRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

/// Add a professor to favorites.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<FavoriteResponse>> {
    let favorite = state
        .favorite_service
        .create(&user.id, &req.professor_id)
        .await?;

    Ok(ApiResponse::ok(favorite.into()))
}

/// Remove a professor from favorites.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .favorite_service
        .delete(&user.id, &req.professor_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Get the current user's favorited professors.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListFavoritesRequest>,
) -> AppResult<ApiResponse<Vec<FavoritedProfessorResponse>>> {
    let limit = req.limit.min(100);
    let favorites = state
        .favorite_service
        .list(&user.id, limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        favorites
            .into_iter()
            .map(|(favorite, professor)| FavoritedProfessorResponse {
                id: favorite.id,
                created_at: favorite.created_at.to_rfc3339(),
                professor: professor.into(),
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/delete", post(delete))
        .route("/list", post(list))
}
