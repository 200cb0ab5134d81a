//! Review vote endpoints.

use axum::{Json, Router, extract::State, routing::post};
use profrate_common::AppResult;
use profrate_db::entities::review_vote::{self, VoteKind};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Cast vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub review_id: String,
    pub kind: VoteKind,
}

/// Vote response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: String,
    pub review_id: String,
    pub kind: VoteKind,
    pub created_at: String,
}

impl From<review_vote::Model> for VoteResponse {
    fn from(v: review_vote::Model) -> Self {
        Self {
            id: v.id,
            review_id: v.review_id,
            kind: v.kind,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

/// Cast a vote on a review. One vote per viewer per review; votes cannot be
/// retracted.
async fn cast(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CastVoteRequest>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let vote = state
        .vote_service
        .cast(&user.id, &req.review_id, req.kind)
        .await?;

    Ok(ApiResponse::ok(vote.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/cast", post(cast))
}
