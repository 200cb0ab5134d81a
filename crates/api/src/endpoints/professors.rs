//! Professor endpoints.

use axum::{Json, Router, extract::State, routing::post};
use profrate_common::{AppError, AppResult};
use profrate_core::{DepartmentSummary, ProfessorSort};
use profrate_db::entities::professor;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Professor response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorResponse {
    pub id: String,
    pub name: String,
    pub department: String,
    pub courses: Vec<String>,
    pub email: Option<String>,
    pub average_rating: f64,
    pub review_count: i32,
    pub created_at: String,
}

impl From<professor::Model> for ProfessorResponse {
    fn from(p: professor::Model) -> Self {
        let courses = p.course_list();
        Self {
            id: p.id,
            name: p.name,
            department: p.department,
            courses,
            email: p.email,
            average_rating: p.average_rating,
            review_count: p.review_count,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Create professor request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessorRequest {
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub courses: Vec<String>,
    pub email: Option<String>,
}

/// Create a professor profile.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateProfessorRequest>,
) -> AppResult<ApiResponse<ProfessorResponse>> {
    let input = profrate_core::CreateProfessorInput {
        name: req.name,
        department: req.department,
        courses: req.courses,
        email: req.email,
    };

    let professor = state.professor_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(professor.into()))
}

/// Show professor request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProfessorRequest {
    pub professor_id: String,
}

/// Get a single professor profile.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowProfessorRequest>,
) -> AppResult<ApiResponse<ProfessorResponse>> {
    let professor = state.professor_service.get(&req.professor_id).await?;
    Ok(ApiResponse::ok(professor.into()))
}

/// Update professor request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfessorRequest {
    pub professor_id: String,
    pub name: Option<String>,
    pub department: Option<String>,
    pub courses: Option<Vec<String>>,
    pub email: Option<String>,
}

/// Update a professor profile. Administrator action.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfessorRequest>,
) -> AppResult<ApiResponse<ProfessorResponse>> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }

    let input = profrate_core::UpdateProfessorInput {
        name: req.name,
        department: req.department,
        courses: req.courses,
        email: req.email,
    };

    let professor = state
        .professor_service
        .update(&req.professor_id, input)
        .await?;

    Ok(ApiResponse::ok(professor.into()))
}

/// Delete professor request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProfessorRequest {
    pub professor_id: String,
}

/// Delete a professor and all referencing reviews. Administrator action.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteProfessorRequest>,
) -> AppResult<ApiResponse<()>> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }

    state.professor_service.delete(&req.professor_id).await?;
    Ok(ApiResponse::ok(()))
}

/// List professors request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProfessorsRequest {
    pub search: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub sort: ProfessorSort,
}

/// List professors with optional search, department filter, and sort.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListProfessorsRequest>,
) -> AppResult<ApiResponse<Vec<ProfessorResponse>>> {
    let professors = state
        .professor_service
        .list(req.search.as_deref(), req.department.as_deref(), req.sort)
        .await?;

    Ok(ApiResponse::ok(
        professors.into_iter().map(Into::into).collect(),
    ))
}

/// Group professors by department.
async fn departments(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<DepartmentSummary>>> {
    let departments = state.professor_service.departments().await?;
    Ok(ApiResponse::ok(departments))
}

/// Compare professors request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareProfessorsRequest {
    pub professor_ids: Vec<String>,
}

/// Fetch up to three professors for side-by-side comparison.
async fn compare(
    State(state): State<AppState>,
    Json(req): Json<CompareProfessorsRequest>,
) -> AppResult<ApiResponse<Vec<ProfessorResponse>>> {
    let professors = state.professor_service.compare(&req.professor_ids).await?;

    Ok(ApiResponse::ok(
        professors.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/list", post(list))
        .route("/departments", post(departments))
        .route("/compare", post(compare))
}
