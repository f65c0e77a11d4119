//! End-to-end flows against a live PostgreSQL database
//!
//! These tests need `DATABASE_URL` pointing at a PostgreSQL instance and are
//! ignored by default. Run them with `cargo test -- --ignored`.

use api::MIGRATOR;
use api::models::{EmployeeStatus, RoleName};
use api::repositories::employee::{EmployeeFields, EmployeeListParams};
use api::repositories::{EmployeeRepository, RoleRepository};
use chrono::NaiveDate;
use common::database::{DatabaseConfig, init_pool, run_migrations};

fn unique_email(tag: &str) -> String {
    format!(
        "{}+{}@example.com",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

fn fields(first: &str, last: &str, email: String) -> EmployeeFields {
    EmployeeFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email,
        phone_number: "0123456789".to_string(),
        hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        status: EmployeeStatus::Employed,
    }
}

async fn role_id(repo: &RoleRepository, name: RoleName) -> i64 {
    match repo.find_by_name(name).await.unwrap() {
        Some(role) => role.id,
        None => repo.create(name).await.unwrap().id,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_employee_role_flows() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    run_migrations(&pool, &MIGRATOR).await?;

    let roles = RoleRepository::new(pool.clone());
    let employees = EmployeeRepository::new(pool.clone());

    let developer_id = role_id(&roles, RoleName::Developer).await;
    let designer_id = role_id(&roles, RoleName::Designer).await;

    // Create with an initial role set and read it back expanded.
    let created = employees
        .create(
            &fields("John", "Smith", unique_email("john.smith")),
            &[developer_id],
        )
        .await?;
    let fetched = employees.find_by_id(created.id).await?.unwrap();
    assert_eq!(
        fetched.roles.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![developer_id]
    );

    // Full replacement: assigning [designer] drops the developer role.
    employees.replace_roles(created.id, &[designer_id]).await?;
    let fetched = employees.find_by_id(created.id).await?.unwrap();
    assert_eq!(
        fetched.roles.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![designer_id]
    );

    // Unknown ids are reported and leave the role set untouched.
    let (valid, invalid) = roles.split_valid_ids(&[designer_id, 99999999]).await?;
    assert_eq!(valid, vec![designer_id]);
    assert_eq!(invalid, vec![99999999]);
    let fetched = employees.find_by_id(created.id).await?.unwrap();
    assert_eq!(
        fetched.roles.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![designer_id]
    );

    // Multi-term search: both terms must match, possibly different fields.
    let other = employees
        .create(&fields("Johnny", "Walker", unique_email("johnny.walker")), &[])
        .await?;
    let params = EmployeeListParams {
        id: None,
        search: Some(format!("john {}", created.id)),
    };
    let found = employees.get_all(&params).await?;
    assert!(found.iter().any(|e| e.id == created.id));
    assert!(!found.iter().any(|e| e.id == other.id));

    // Case-insensitive single-term search matches both.
    let params = EmployeeListParams {
        id: None,
        search: Some("JOHN".to_string()),
    };
    let found = employees.get_all(&params).await?;
    assert!(found.iter().any(|e| e.id == created.id));
    assert!(found.iter().any(|e| e.id == other.id));

    // Status transitions both ways.
    assert!(employees.set_status(created.id, EmployeeStatus::Fired).await?);
    let fetched = employees.find_by_id(created.id).await?.unwrap();
    assert_eq!(fetched.status, EmployeeStatus::Fired);
    assert!(employees.set_status(created.id, EmployeeStatus::Employed).await?);

    // Duplicate email detection, excluding the record itself.
    assert_eq!(
        employees.find_id_by_email(&fetched.email, None).await?,
        Some(created.id)
    );
    assert_eq!(
        employees
            .find_id_by_email(&fetched.email, Some(created.id))
            .await?,
        None
    );

    // Raw totals reflect the table, not any filter.
    let total = employees.count().await?;
    assert!(total >= 2);

    // Deleting a referenced role deregisters it from the employee.
    let scrum_id = role_id(&roles, RoleName::ScrumMaster).await;
    employees.replace_roles(created.id, &[scrum_id]).await?;
    assert!(roles.delete(scrum_id).await?);
    let fetched = employees.find_by_id(created.id).await?.unwrap();
    assert!(fetched.roles.is_empty());

    // Cleanup.
    assert!(employees.delete(created.id).await?);
    assert!(employees.delete(other.id).await?);

    Ok(())
}
