//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use profrate_common::config::InstanceConfig;
use profrate_core::{
    AdminService, FavoriteService, ProfessorService, ReviewService, UserService, VoteService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub professor_service: ProfessorService,
    pub review_service: ReviewService,
    pub vote_service: VoteService,
    pub favorite_service: FavoriteService,
    pub admin_service: AdminService,
    pub instance: InstanceConfig,
}

/// Authentication middleware.
///
/// Resolves `Authorization: Bearer <token>` to a user and stores it in the
/// request extensions for the [`crate::extractors::AuthUser`] extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
