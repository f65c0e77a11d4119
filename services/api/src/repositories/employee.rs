//! Employee repository for database operations

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder, Row};
use std::collections::HashMap;
use tracing::info;

use crate::models::{Employee, EmployeeStatus, Role, RoleName};
use crate::repositories::{like_pattern, search_terms};

/// Query parameters accepted by the employee list endpoint
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct EmployeeListParams {
    pub id: Option<i64>,
    pub search: Option<String>,
}

/// Validated employee fields ready to persist
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
}

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, hire_date, status";

fn employee_from_row(row: &sqlx::postgres::PgRow) -> Result<Employee> {
    let status: String = row.get("status");
    Ok(Employee {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        hire_date: row.get("hire_date"),
        status: status
            .parse::<EmployeeStatus>()
            .map_err(|e| anyhow::anyhow!("corrupt employee row: {}", e))?,
        roles: Vec::new(),
    })
}

/// Employee repository for database operations
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new employee with the given role set
    ///
    /// `role_ids` must already be validated against the roles table; the
    /// insert runs in a single transaction so a failure leaves no partial
    /// record behind.
    pub async fn create(&self, fields: &EmployeeFields, role_ids: &[i64]) -> Result<Employee> {
        info!("Creating new employee: {} {}", fields.first_name, fields.last_name);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, email, phone_number, hire_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.phone_number)
        .bind(fields.hire_date)
        .bind(fields.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let id: i64 = row.get("id");

        if !role_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO employee_roles (employee_id, role_id)
                SELECT $1::bigint, role_id FROM unnest($2::bigint[]) AS t(role_id)
                "#,
            )
            .bind(id)
            .bind(role_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("employee {} vanished after insert", id))
    }

    /// Get all employees, optionally filtered by id or search terms
    ///
    /// Each search term must match the first name, last name, or decimal id
    /// of the employee; terms are combined with AND.
    pub async fn get_all(&self, params: &EmployeeListParams) -> Result<Vec<Employee>> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM employees WHERE 1 = 1",
            EMPLOYEE_COLUMNS
        ));

        if let Some(id) = params.id {
            qb.push(" AND id = ").push_bind(id);
        }

        if let Some(search) = &params.search {
            for term in search_terms(search) {
                let pattern = like_pattern(&term);
                qb.push(" AND (first_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR last_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR id::text ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        qb.push(" ORDER BY id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        let mut employees = rows
            .iter()
            .map(employee_from_row)
            .collect::<Result<Vec<_>>>()?;

        self.fill_roles(&mut employees).await?;
        Ok(employees)
    }

    /// Find an employee by ID, with its role set expanded
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut employees = vec![employee_from_row(&row)?];
                self.fill_roles(&mut employees).await?;
                Ok(employees.pop())
            }
            None => Ok(None),
        }
    }

    /// Find the id of the employee holding the given email, if any
    ///
    /// Used for uniqueness checks; `exclude_id` skips the record being
    /// updated so an employee can keep its own email.
    pub async fn find_id_by_email(
        &self,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM employees
            WHERE email = $1 AND ($2::bigint IS NULL OR id <> $2)
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    /// Update all scalar fields of an employee, optionally replacing its
    /// role set, returning the updated record if it exists
    pub async fn update(
        &self,
        id: i64,
        fields: &EmployeeFields,
        role_ids: Option<&[i64]>,
    ) -> Result<Option<Employee>> {
        info!("Updating employee {}", id);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = $2, last_name = $3, email = $4, phone_number = $5,
                hire_date = $6, status = $7, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.phone_number)
        .bind(fields.hire_date)
        .bind(fields.status.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(role_ids) = role_ids {
            replace_roles_in_tx(&mut tx, id, role_ids).await?;
        }

        tx.commit().await?;

        self.find_by_id(id).await
    }

    /// Replace an employee's entire role set with the given ids
    ///
    /// `role_ids` must already be validated; the delete and re-insert run in
    /// one transaction so the swap is all-or-nothing.
    pub async fn replace_roles(&self, id: i64, role_ids: &[i64]) -> Result<()> {
        info!("Assigning {} role(s) to employee {}", role_ids.len(), id);

        let mut tx = self.pool.begin().await?;
        replace_roles_in_tx(&mut tx, id, role_ids).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Set an employee's employment status
    pub async fn set_status(&self, id: i64, status: EmployeeStatus) -> Result<bool> {
        info!("Updating employee {} status to {}", id, status);

        let result = sqlx::query(
            "UPDATE employees SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an employee by ID
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting employee {}", id);

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all employees
    ///
    /// Always the raw table count; list filters never apply here.
    pub async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Load the role sets for the given employees in one query
    async fn fill_roles(&self, employees: &mut [Employee]) -> Result<()> {
        if employees.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();

        let rows = sqlx::query(
            r#"
            SELECT er.employee_id, r.id, r.name
            FROM employee_roles er
            JOIN roles r ON r.id = er.role_id
            WHERE er.employee_id = ANY($1)
            ORDER BY r.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_employee: HashMap<i64, Vec<Role>> = HashMap::new();
        for row in &rows {
            let name: String = row.get("name");
            let role = Role {
                id: row.get("id"),
                name: name
                    .parse::<RoleName>()
                    .map_err(|e| anyhow::anyhow!("corrupt role row: {}", e))?,
            };
            by_employee
                .entry(row.get("employee_id"))
                .or_default()
                .push(role);
        }

        for employee in employees.iter_mut() {
            if let Some(roles) = by_employee.remove(&employee.id) {
                employee.roles = roles;
            }
        }

        Ok(())
    }
}

async fn replace_roles_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    employee_id: i64,
    role_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM employee_roles WHERE employee_id = $1")
        .bind(employee_id)
        .execute(&mut **tx)
        .await?;

    if !role_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO employee_roles (employee_id, role_id)
            SELECT $1::bigint, role_id FROM unnest($2::bigint[]) AS t(role_id)
            "#,
        )
        .bind(employee_id)
        .bind(role_ids)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
