//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::{EmployeeRepository, RoleRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub employee_repository: EmployeeRepository,
    pub role_repository: RoleRepository,
}

impl AppState {
    /// Build the application state from a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            employee_repository: EmployeeRepository::new(pool.clone()),
            role_repository: RoleRepository::new(pool.clone()),
            db_pool: pool,
        }
    }
}
