//! Meta endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;

use crate::middleware::AppState;

/// Server metadata response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub maintainer_email: Option<String>,
}

/// Get server metadata.
async fn meta(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse {
        name: state.instance.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: state.instance.description.clone(),
        maintainer_email: state.instance.maintainer_email.clone(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(meta))
}
