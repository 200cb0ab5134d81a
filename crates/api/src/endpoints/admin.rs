//! Administration endpoints.
//!
//! Every endpoint here requires the `admin` role; review and professor
//! deletion are on their own routers since authors share those paths.

use axum::{Json, Router, extract::State, routing::post};
use profrate_common::{AppError, AppResult};
use profrate_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::auth::role_str, endpoints::reviews::ReviewResponse, extractors::AuthUser,
    middleware::AppState, response::ApiResponse,
};

fn require_admin(user: &user::Model) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }
    Ok(())
}

/// Admin overview response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub professor_count: u64,
    pub review_count: u64,
    pub user_count: u64,
    pub vote_count: u64,
    pub recent_reviews: Vec<ReviewResponse>,
}

/// Get dashboard counts and recent activity.
async fn overview(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<OverviewResponse>> {
    require_admin(&user)?;

    let overview = state.admin_service.overview().await?;

    Ok(ApiResponse::ok(OverviewResponse {
        professor_count: overview.professor_count,
        review_count: overview.review_count,
        user_count: overview.user_count,
        vote_count: overview.vote_count,
        recent_reviews: overview
            .recent_reviews
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}

/// List users request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    25
}

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: role_str(u.role).to_string(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// List users.
async fn users(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListUsersRequest>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    require_admin(&user)?;

    let limit = req.limit.min(100);
    let users = state
        .user_service
        .list(limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Set role request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub user_id: String,
    pub role: user::Role,
}

/// Change a user's role.
async fn set_role(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetRoleRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&user)?;

    let updated = state.user_service.set_role(&req.user_id, req.role).await?;

    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", post(overview))
        .route("/users", post(users))
        .route("/users/set-role", post(set_role))
}
