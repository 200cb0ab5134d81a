//! Review endpoints.

use axum::{Json, Router, extract::State, routing::post};
use profrate_common::AppResult;
use profrate_core::rating::{ReviewScores, ReviewSubmission};
use profrate_db::entities::review;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Review response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub professor_id: String,
    pub user_id: String,
    pub user_name: String,
    pub course: String,
    pub ratings: ReviewScores,
    pub average_rating: f64,
    pub comment: String,
    pub created_at: String,
    pub upvotes: i32,
    pub downvotes: i32,
}

impl From<review::Model> for ReviewResponse {
    fn from(r: review::Model) -> Self {
        Self {
            id: r.id,
            professor_id: r.professor_id,
            user_id: r.user_id,
            user_name: r.user_name,
            course: r.course,
            ratings: ReviewScores {
                teaching_quality: r.teaching_quality as u8,
                clarity: r.clarity as u8,
                helpfulness: r.helpfulness as u8,
                fairness: r.fairness as u8,
                workload: r.workload as u8,
            },
            average_rating: r.average_rating,
            comment: r.comment,
            created_at: r.created_at.to_rfc3339(),
            upvotes: r.upvotes,
            downvotes: r.downvotes,
        }
    }
}

/// Create review request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub professor_id: String,

    #[validate(length(max = 200))]
    pub course: String,

    pub ratings: ReviewScores,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

/// Submit a review for a professor.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateReviewRequest>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    req.validate()?;

    let submission = ReviewSubmission {
        course: req.course,
        ratings: req.ratings,
        comment: req.comment,
    };

    let review = state
        .review_service
        .submit(&user, &req.professor_id, submission)
        .await?;

    Ok(ApiResponse::ok(review.into()))
}

/// Delete review request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewRequest {
    pub review_id: String,
}

/// Delete a review. Allowed for the author and for administrators.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteReviewRequest>,
) -> AppResult<ApiResponse<()>> {
    state.review_service.delete(&user, &req.review_id).await?;
    Ok(ApiResponse::ok(()))
}

/// List reviews request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsRequest {
    pub professor_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

/// Get reviews of a professor, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListReviewsRequest>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let limit = req.limit.min(100);
    let reviews = state
        .review_service
        .list_for_professor(&req.professor_id, limit, req.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(reviews.into_iter().map(Into::into).collect()))
}

/// A review written by the current user, with the professor it references.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnReviewResponse {
    #[serde(flatten)]
    pub review: ReviewResponse,
    pub professor_name: String,
    pub professor_department: String,
}

/// Get the current user's reviews.
async fn mine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<OwnReviewResponse>>> {
    let reviews = state.review_service.list_for_user(&user.id).await?;

    Ok(ApiResponse::ok(
        reviews
            .into_iter()
            .map(|(review, professor)| OwnReviewResponse {
                review: review.into(),
                professor_name: professor.name,
                professor_department: professor.department,
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/delete", post(delete))
        .route("/list", post(list))
        .route("/mine", post(mine))
}
