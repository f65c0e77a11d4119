//! Employee resource handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError,
    models::{
        AssignRolesRequest, Employee, EmployeeStatus, NewEmployee, UpdateEmployee,
        UpdateStatusRequest,
    },
    repositories::employee::{EmployeeFields, EmployeeListParams},
    state::AppState,
    validation,
};

/// Query parameters for the dedicated search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Get all employees, with optional id filter and name/id search
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = state
        .employee_repository
        .get_all(&params)
        .await
        .map_err(|e| {
            error!("Failed to list employees: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(employees))
}

/// Create a new employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = validate_fields(&payload)?;
    ensure_email_unused(&state, &fields.email, None).await?;

    let role_ids = match &payload.role_ids {
        Some(ids) => validated_role_ids(&state, ids).await?,
        None => Vec::new(),
    };

    let employee = state
        .employee_repository
        .create(&fields, &role_ids)
        .await
        .map_err(|e| {
            error!("Failed to create employee: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get an employee by ID, with its roles expanded
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(employee))
}

/// Fully update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = validate_fields(&payload)?;
    ensure_email_unused(&state, &fields.email, Some(id)).await?;

    let role_ids = match &payload.role_ids {
        Some(ids) => Some(validated_role_ids(&state, ids).await?),
        None => None,
    };

    let employee = state
        .employee_repository
        .update(id, &fields, role_ids.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to update employee: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Employee"))?;

    Ok(Json(employee))
}

/// Partially update an employee
pub async fn patch_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = find_employee(&state, id).await?;

    let merged = NewEmployee {
        first_name: payload.first_name.unwrap_or(existing.first_name),
        last_name: payload.last_name.unwrap_or(existing.last_name),
        email: payload.email.unwrap_or(existing.email),
        phone_number: payload.phone_number.unwrap_or(existing.phone_number),
        hire_date: payload.hire_date.unwrap_or(existing.hire_date),
        status: Some(
            payload
                .status
                .unwrap_or_else(|| existing.status.as_str().to_string()),
        ),
        role_ids: payload.role_ids,
    };

    let fields = validate_fields(&merged)?;
    ensure_email_unused(&state, &fields.email, Some(id)).await?;

    let role_ids = match &merged.role_ids {
        Some(ids) => Some(validated_role_ids(&state, ids).await?),
        None => None,
    };

    let employee = state
        .employee_repository
        .update(id, &fields, role_ids.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to update employee: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Employee"))?;

    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.employee_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete employee: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Employee"))
    }
}

/// Replace an employee's entire role set
///
/// All requested ids must resolve to existing roles; otherwise nothing is
/// changed and the unknown ids are reported back.
pub async fn assign_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRolesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    find_employee(&state, id).await?;

    let role_ids = validated_role_ids(&state, &payload.role_ids).await?;

    state
        .employee_repository
        .replace_roles(id, &role_ids)
        .await
        .map_err(|e| {
            error!("Failed to assign roles: {}", e);
            ApiError::InternalServerError
        })?;

    let employee = find_employee(&state, id).await?;

    Ok(Json(json!({
        "message": "Roles assigned successfully",
        "employee": employee,
    })))
}

/// Search employees by first name, last name, or ID
///
/// The query splits on whitespace; every term must match one of the three
/// fields. An empty query matches all employees.
pub async fn search_employees(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let list_params = EmployeeListParams {
        id: None,
        search: Some(params.q.unwrap_or_default()),
    };

    let employees = state
        .employee_repository
        .get_all(&list_params)
        .await
        .map_err(|e| {
            error!("Failed to search employees: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(employees))
}

/// Get the total number of employees
///
/// This is always the raw table count, independent of any list filters.
pub async fn total_employees(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let total = state.employee_repository.count().await.map_err(|e| {
        error!("Failed to count employees: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(json!({"total_employees": total})))
}

/// Update an employee's employment status
///
/// `status: true` marks the employee employed, `false` fired. A missing
/// field counts as `true`; see `UpdateStatusRequest`.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = if payload.status.unwrap_or(true) {
        EmployeeStatus::Employed
    } else {
        EmployeeStatus::Fired
    };

    let updated = state
        .employee_repository
        .set_status(id, status)
        .await
        .map_err(|e| {
            error!("Failed to update employee status: {}", e);
            ApiError::InternalServerError
        })?;

    if !updated {
        return Err(ApiError::NotFound("Employee"));
    }

    let employee = find_employee(&state, id).await?;

    Ok(Json(json!({
        "message": format!("Employee status updated to {}", status),
        "employee": employee,
    })))
}

async fn find_employee(state: &AppState, id: i64) -> Result<Employee, ApiError> {
    state
        .employee_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get employee: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Employee"))
}

fn validate_fields(payload: &NewEmployee) -> Result<EmployeeFields, ApiError> {
    validation::validate_name(&payload.first_name, "First name")
        .map_err(|message| ApiError::validation("first_name", message))?;
    validation::validate_name(&payload.last_name, "Last name")
        .map_err(|message| ApiError::validation("last_name", message))?;
    validation::validate_email(&payload.email)
        .map_err(|message| ApiError::validation("email", message))?;
    validation::validate_phone_number(&payload.phone_number)
        .map_err(|message| ApiError::validation("phone_number", message))?;

    let status = match &payload.status {
        Some(raw) => raw
            .parse::<EmployeeStatus>()
            .map_err(|message| ApiError::validation("status", message))?,
        None => EmployeeStatus::Employed,
    };

    Ok(EmployeeFields {
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        email: payload.email.clone(),
        phone_number: payload.phone_number.clone(),
        hire_date: payload.hire_date,
        status,
    })
}

async fn ensure_email_unused(
    state: &AppState,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let existing = state
        .employee_repository
        .find_id_by_email(email, exclude_id)
        .await
        .map_err(|e| {
            error!("Failed to check email uniqueness: {}", e);
            ApiError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(ApiError::validation(
            "email",
            "An employee with this email already exists",
        ));
    }

    Ok(())
}

async fn validated_role_ids(state: &AppState, role_ids: &[i64]) -> Result<Vec<i64>, ApiError> {
    let (valid, invalid) = state
        .role_repository
        .split_valid_ids(role_ids)
        .await
        .map_err(|e| {
            error!("Failed to validate role ids: {}", e);
            ApiError::InternalServerError
        })?;

    if !invalid.is_empty() {
        return Err(ApiError::InvalidRoleIds(invalid));
    }

    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields_defaults_status_to_employed() {
        let payload = NewEmployee {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: None,
            role_ids: None,
        };

        let fields = validate_fields(&payload).unwrap();
        assert_eq!(fields.status, EmployeeStatus::Employed);
    }

    #[test]
    fn test_validate_fields_rejects_bad_email() {
        let payload = NewEmployee {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "not-an-email".to_string(),
            phone_number: "0123456789".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: None,
            role_ids: None,
        };

        match validate_fields(&payload) {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field, "email"),
            other => panic!("expected email validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_fields_rejects_unknown_status() {
        let payload = NewEmployee {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: Some("on_leave".to_string()),
            role_ids: None,
        };

        match validate_fields(&payload) {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field, "status"),
            other => panic!("expected status validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_fields_rejects_long_phone_number() {
        let payload = NewEmployee {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone_number: "01234567890".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: None,
            role_ids: None,
        };

        match validate_fields(&payload) {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field, "phone_number"),
            other => panic!("expected phone validation error, got {:?}", other),
        }
    }
}
