//! Staffhub API service
//!
//! HTTP/JSON API for managing employee records and their job roles:
//! CRUD for employees and roles, role assignment, multi-term search,
//! employment-status updates, and aggregate counts.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

/// Embedded database migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
