//! Role resource handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError,
    models::{NewRole, RoleName, UpdateRole},
    repositories::role::RoleListParams,
    state::AppState,
};

/// Get all roles, with optional id filter and name search
pub async fn list_roles(
    State(state): State<AppState>,
    Query(params): Query<RoleListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let roles = state.role_repository.get_all(&params).await.map_err(|e| {
        error!("Failed to list roles: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(roles))
}

/// Create a new role
pub async fn create_role(
    State(state): State<AppState>,
    Json(payload): Json<NewRole>,
) -> Result<impl IntoResponse, ApiError> {
    let name = parse_role_name(&payload.name)?;
    ensure_name_unused(&state, name, None).await?;

    let role = state.role_repository.create(name).await.map_err(|e| {
        error!("Failed to create role: {}", e);
        ApiError::InternalServerError
    })?;

    Ok((StatusCode::CREATED, Json(role)))
}

/// Get a role by ID
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state
        .role_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get role: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Role"))?;

    Ok(Json(role))
}

/// Fully update a role
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewRole>,
) -> Result<impl IntoResponse, ApiError> {
    let name = parse_role_name(&payload.name)?;
    ensure_name_unused(&state, name, Some(id)).await?;

    let role = state
        .role_repository
        .update(id, name)
        .await
        .map_err(|e| {
            error!("Failed to update role: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Role"))?;

    Ok(Json(role))
}

/// Partially update a role
pub async fn patch_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRole>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(raw_name) = payload.name else {
        // Nothing to change; echo the current record.
        let role = state
            .role_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!("Failed to get role: {}", e);
                ApiError::InternalServerError
            })?
            .ok_or(ApiError::NotFound("Role"))?;
        return Ok(Json(role));
    };

    let name = parse_role_name(&raw_name)?;
    ensure_name_unused(&state, name, Some(id)).await?;

    let role = state
        .role_repository
        .update(id, name)
        .await
        .map_err(|e| {
            error!("Failed to update role: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Role"))?;

    Ok(Json(role))
}

/// Delete a role
///
/// Associations with employees are removed alongside; the employees remain.
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.role_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete role: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Role"))
    }
}

/// Get the total number of roles
pub async fn total_roles(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let total = state.role_repository.count().await.map_err(|e| {
        error!("Failed to count roles: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(json!({"total_roles": total})))
}

fn parse_role_name(raw: &str) -> Result<RoleName, ApiError> {
    raw.parse::<RoleName>()
        .map_err(|message| ApiError::validation("name", message))
}

async fn ensure_name_unused(
    state: &AppState,
    name: RoleName,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let existing = state.role_repository.find_by_name(name).await.map_err(|e| {
        error!("Failed to check role name uniqueness: {}", e);
        ApiError::InternalServerError
    })?;

    match existing {
        Some(role) if Some(role.id) != exclude_id => Err(ApiError::validation(
            "name",
            format!("A role named \"{}\" already exists", name),
        )),
        _ => Ok(()),
    }
}
