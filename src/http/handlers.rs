//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for validation and storage.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateMissionRequest, CreateScientistRequest, HealthResponse, MissionDetailDto, PlanetDto,
    ScientistDetailDto, ScientistDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{NewScientist, ScientistDetail, ScientistId};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Landing & Health
// =============================================================================

/// GET /
///
/// The landing route answers with an empty 200 body.
pub async fn home() -> &'static str {
    ""
}

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Scientists
// =============================================================================

/// GET /scientists
///
/// List all scientists, mission collections excluded.
pub async fn list_scientists(State(state): State<AppState>) -> HandlerResult<Vec<ScientistDto>> {
    let scientists = db_services::list_scientists(state.repository.as_ref()).await?;

    Ok(Json(scientists.into_iter().map(Into::into).collect()))
}

/// POST /scientists
///
/// Create a new scientist. Returns 201 with the full record on success,
/// 400 on any constraint violation.
pub async fn create_scientist(
    State(state): State<AppState>,
    Json(request): Json<CreateScientistRequest>,
) -> Result<(StatusCode, Json<ScientistDetailDto>), AppError> {
    let input: NewScientist = request.into();
    let scientist = db_services::create_scientist(state.repository.as_ref(), &input).await?;

    // A just-created scientist owns no missions yet.
    let detail = ScientistDetail {
        scientist,
        missions: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// GET /scientists/{id}
///
/// Fetch one scientist with nested mission and planet data, or 404.
pub async fn get_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ScientistDetailDto> {
    let detail =
        db_services::get_scientist_detail(state.repository.as_ref(), ScientistId::new(id)).await?;

    Ok(Json(detail.into()))
}

/// PATCH /scientists/{id}
///
/// Overwrite the attributes named in the request body onto the record.
/// 404 if the scientist is absent, 400 on a constraint violation, otherwise
/// 202 with the updated record.
pub async fn update_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ScientistDetailDto>), AppError> {
    let detail =
        db_services::update_scientist(state.repository.as_ref(), ScientistId::new(id), &body)
            .await?;

    Ok((StatusCode::ACCEPTED, Json(detail.into())))
}

/// DELETE /scientists/{id}
///
/// Delete a scientist and, by cascade, their missions. 204 on success,
/// 404 if absent.
pub async fn delete_scientist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_scientist(state.repository.as_ref(), ScientistId::new(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Planets
// =============================================================================

/// GET /planets
///
/// List all planets, mission collections excluded.
pub async fn list_planets(State(state): State<AppState>) -> HandlerResult<Vec<PlanetDto>> {
    let planets = db_services::list_planets(state.repository.as_ref()).await?;

    Ok(Json(planets.into_iter().map(Into::into).collect()))
}

// =============================================================================
// Missions
// =============================================================================

/// POST /missions
///
/// Create a mission from a name and two foreign keys. 201 with the full
/// record on success; a missing or dangling foreign key is a 400.
pub async fn create_mission(
    State(state): State<AppState>,
    Json(request): Json<CreateMissionRequest>,
) -> Result<(StatusCode, Json<MissionDetailDto>), AppError> {
    let input = request.into_new_mission().map_err(|message| {
        tracing::debug!(%message, "mission request rejected");
        AppError::validation()
    })?;
    let detail = db_services::create_mission(state.repository.as_ref(), &input).await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}
