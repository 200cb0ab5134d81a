//! API endpoints.

mod admin;
mod auth;
mod favorites;
mod meta;
mod professors;
mod reviews;
mod votes;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/meta", meta::router())
        .nest("/professors", professors::router())
        .nest("/reviews", reviews::router())
        .nest("/reviews/votes", votes::router())
        .nest("/favorites", favorites::router())
        .nest("/admin", admin::router())
}
