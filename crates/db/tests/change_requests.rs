//! Integration tests for employee data change requests.

use assert_matches::assert_matches;
use sqlx::PgPool;

use kencana_core::error::CoreError;
use kencana_db::error::DbError;
use kencana_db::models::change_request::CreateChangeRequest;
use kencana_db::repositories::ChangeRequestRepo;

const HR_USER: i64 = 50;

async fn seed_employee(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO employees (full_name, status, ktp_number, phone)
         VALUES ('Ani', 'active', '3171000000000003', '0811111111')
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("seed employee")
}

fn phone_change(new_value: &str) -> CreateChangeRequest {
    CreateChangeRequest {
        change_type: "contact".to_string(),
        field_name: "phone".to_string(),
        new_value: new_value.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approval_applies_typed_field(pool: PgPool) {
    let emp = seed_employee(&pool).await;

    let request = ChangeRequestRepo::create(&pool, emp, &phone_change("0822222222"))
        .await
        .unwrap();
    assert_eq!(request.status, "pending");
    assert_eq!(request.old_value.as_deref(), Some("0811111111"));

    let approved = ChangeRequestRepo::approve(&pool, request.id, HR_USER).await.unwrap();
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.decided_by, Some(HR_USER));

    let phone: Option<String> = sqlx::query_scalar("SELECT phone FROM employees WHERE id = $1")
        .bind(emp)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(phone.as_deref(), Some("0822222222"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejection_leaves_employee_untouched(pool: PgPool) {
    let emp = seed_employee(&pool).await;
    let request = ChangeRequestRepo::create(&pool, emp, &phone_change("0833333333"))
        .await
        .unwrap();

    let rejected = ChangeRequestRepo::reject(&pool, request.id, HR_USER).await.unwrap();
    assert_eq!(rejected.status, "rejected");

    let phone: Option<String> = sqlx::query_scalar("SELECT phone FROM employees WHERE id = $1")
        .bind(emp)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(phone.as_deref(), Some("0811111111"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decided_request_cannot_be_redecided(pool: PgPool) {
    let emp = seed_employee(&pool).await;
    let request = ChangeRequestRepo::create(&pool, emp, &phone_change("0844444444"))
        .await
        .unwrap();
    ChangeRequestRepo::approve(&pool, request.id, HR_USER).await.unwrap();

    let err = ChangeRequestRepo::approve(&pool, request.id, HR_USER).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidStateTransition { .. }));
    let err = ChangeRequestRepo::reject(&pool, request.id, HR_USER).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidStateTransition { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_field_combination_rejected(pool: PgPool) {
    let emp = seed_employee(&pool).await;
    let err = ChangeRequestRepo::create(
        &pool,
        emp,
        &CreateChangeRequest {
            change_type: "ktp".to_string(),
            field_name: "phone".to_string(),
            new_value: "x".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_for_missing_employee_not_found(pool: PgPool) {
    let err = ChangeRequestRepo::create(&pool, 4242, &phone_change("0855555555"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Employee", .. }));
}
