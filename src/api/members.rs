//! Team member API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::models::{DeleteResponse, TeamMember, TeamMemberPayload};
use crate::validation::{validate_create, validate_update};
use crate::AppState;

/// GET /team-members - List all team members.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamMember>>> {
    let members = state.store.list_members().await?;
    Ok(Json(members))
}

/// GET /team-members/:id - Get a single team member.
pub async fn get_member(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TeamMember>> {
    let Path(id) = path?;
    let member = state.store.get_member(id).await?;
    Ok(Json(member))
}

/// POST /team-members - Create a new team member.
pub async fn create_member(
    State(state): State<AppState>,
    body: Result<Json<TeamMemberPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TeamMember>)> {
    let Json(payload) = body?;

    let existing = state.store.list_members().await?;
    let candidate = validate_create(payload, &existing)?;
    let member = state.store.insert_member(candidate).await?;

    tracing::info!("Created team member {}", member.id);
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /team-members/:id - Replace every field of a team member.
pub async fn update_member(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TeamMemberPayload>, JsonRejection>,
) -> ApiResult<Json<TeamMember>> {
    let Path(id) = path?;

    // Unknown ids are reported before anything about the body.
    state.store.get_member(id).await?;
    let Json(payload) = body?;

    let existing = state.store.list_members().await?;
    let candidate = validate_update(id, payload, &existing)?;
    let member = state.store.replace_member(id, candidate).await?;

    tracing::info!("Updated team member {}", id);
    Ok(Json(member))
}

/// DELETE /team-members/:id - Delete a team member.
pub async fn delete_member(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = path?;
    state.store.delete_member(id).await?;

    tracing::info!("Deleted team member {}", id);
    Ok(Json(DeleteResponse {
        detail: "Team member deleted successfully".to_string(),
    }))
}
