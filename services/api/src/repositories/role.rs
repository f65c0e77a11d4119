//! Role repository for database operations

use anyhow::Result;
use sqlx::{PgPool, QueryBuilder, Row};
use tracing::info;

use crate::models::{Role, RoleName};
use crate::repositories::{like_pattern, search_terms};

/// Query parameters accepted by the role list endpoint
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RoleListParams {
    pub id: Option<i64>,
    pub search: Option<String>,
}

fn role_from_row(row: &sqlx::postgres::PgRow) -> Result<Role> {
    let name: String = row.get("name");
    Ok(Role {
        id: row.get("id"),
        name: name
            .parse::<RoleName>()
            .map_err(|e| anyhow::anyhow!("corrupt role row: {}", e))?,
    })
}

/// Role repository for database operations
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new role
    pub async fn create(&self, name: RoleName) -> Result<Role> {
        info!("Creating new role: {}", name);

        let row = sqlx::query(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;

        role_from_row(&row)
    }

    /// Get all roles, optionally filtered by id or name search terms
    pub async fn get_all(&self, params: &RoleListParams) -> Result<Vec<Role>> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT id, name FROM roles WHERE 1 = 1");

        if let Some(id) = params.id {
            qb.push(" AND id = ").push_bind(id);
        }

        if let Some(search) = &params.search {
            for term in search_terms(search) {
                qb.push(" AND name ILIKE ").push_bind(like_pattern(&term));
            }
        }

        qb.push(" ORDER BY id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(role_from_row).collect()
    }

    /// Find a role by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(role_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Find a role by name
    pub async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(role_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Update a role's name, returning the updated row if it exists
    pub async fn update(&self, id: i64, name: RoleName) -> Result<Option<Role>> {
        info!("Updating role {} to {}", id, name);

        let row = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(role_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a role by ID
    ///
    /// Join rows referencing the role are removed by the cascade; employees
    /// themselves are untouched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting role {}", id);

        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Partition the requested role ids into existing and unknown ones
    ///
    /// Duplicates collapse; both halves come back in ascending order so
    /// error messages are deterministic.
    pub async fn split_valid_ids(&self, role_ids: &[i64]) -> Result<(Vec<i64>, Vec<i64>)> {
        if role_ids.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let valid: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT id FROM roles WHERE id = ANY($1) ORDER BY id",
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut invalid: Vec<i64> = role_ids
            .iter()
            .copied()
            .filter(|id| valid.binary_search(id).is_err())
            .collect();
        invalid.sort_unstable();
        invalid.dedup();

        Ok((valid, invalid))
    }

    /// Count all roles
    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
