//! API service routes

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::state::AppState;

pub mod employees;
pub mod roles;

/// Create the router for the API service
///
/// All resource endpoints live under `/api/`; paths carry a trailing slash,
/// matching what the dashboard client requests.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/employees/",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/employees/search/", get(employees::search_employees))
        .route("/employees/total-employees/", get(employees::total_employees))
        .route(
            "/employees/:id/",
            get(employees::get_employee)
                .put(employees::update_employee)
                .patch(employees::patch_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/employees/:id/assign_roles/",
            axum::routing::post(employees::assign_roles),
        )
        .route(
            "/employees/:id/update-status/",
            axum::routing::post(employees::update_status),
        )
        .route("/roles/", get(roles::list_roles).post(roles::create_role))
        .route("/roles/total-roles/", get(roles::total_roles))
        .route(
            "/roles/:id/",
            get(roles::get_role)
                .put(roles::update_role)
                .patch(roles::patch_role)
                .delete(roles::delete_role),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "staffhub-api"
    }))
}
