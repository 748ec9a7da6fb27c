//! HTTP-level integration tests for payroll validation and the batch fixer.
//!
//! Employees, attendance rows, and payroll batches are seeded directly so
//! the tests focus on HTTP behaviour and the advisory report shape.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, token_for};
use sqlx::PgPool;

async fn seed_employee(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO employees (full_name, status, ktp_number)
         VALUES ($1, 'active', '3171000000000009')
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("seed employee")
}

// ---------------------------------------------------------------------------
// Validation report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_clean_period(pool: PgPool) {
    seed_employee(&pool, "Ani").await;
    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(
        app,
        "/api/v1/payroll/validate?start=2026-05-01&end=2026-05-31",
        Some(&hr),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["can_process"], true);
    assert!(json["data"]["errors"].as_array().unwrap().is_empty());
    assert!(json["data"]["warnings"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["total_warnings"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_reports_lateness_warning(pool: PgPool) {
    let emp = seed_employee(&pool, "Budi").await;
    sqlx::query(
        "INSERT INTO attendance_records (employee_id, work_date, status, minutes_late)
         VALUES ($1, '2026-05-04', 'late', 150)",
    )
    .bind(emp)
    .execute(&pool)
    .await
    .unwrap();

    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(
        app,
        "/api/v1/payroll/validate?start=2026-05-01&end=2026-05-31",
        Some(&hr),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // Advisory only: warnings never block processing.
    assert_eq!(json["data"]["can_process"], true);
    let warnings = json["data"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["employee_id"].as_i64(), Some(emp));
    assert_eq!(warnings[0]["employee_name"], "Budi");
    assert!(warnings[0]["message"]
        .as_str()
        .unwrap()
        .contains("unexcused lateness"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_requires_payroll_permission(pool: PgPool) {
    let app = build_test_app(pool);
    let marketing = token_for(1, "marketing");

    let response = get(
        app,
        "/api/v1/payroll/validate?start=2026-05-01&end=2026-05-31",
        Some(&marketing),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_rejects_backwards_period(pool: PgPool) {
    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(
        app,
        "/api/v1/payroll/validate?start=2026-05-31&end=2026-05-01",
        Some(&hr),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Batch status fixer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fix_batch_status_endpoint(pool: PgPool) {
    let emp = seed_employee(&pool, "Citra").await;
    let batch: i64 = sqlx::query_scalar(
        "INSERT INTO payroll_batches (period_start, period_end, status, finalized_at)
         VALUES ('2026-05-01', '2026-05-31', 'finalized', NOW())
         RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO payroll_lines (batch_id, employee_id, base_salary, net_pay, status)
         VALUES ($1, $2, 5000000, 5000000, 'approved')",
    )
    .bind(batch)
    .bind(emp)
    .execute(&pool)
    .await
    .unwrap();

    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = post_json(
        app.clone(),
        "/api/v1/payroll/fix-batch-status",
        Some(&hr),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_fixed"], 1);

    // Idempotent: a second sweep fixes nothing.
    let response = post_json(
        app.clone(),
        "/api/v1/payroll/fix-batch-status",
        Some(&hr),
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_fixed"], 0);

    // The batch endpoint shows the repaired lines.
    let response = get(app, &format!("/api/v1/payroll/batches/{batch}"), Some(&hr)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["batch"]["status"], "finalized");
    assert_eq!(json["data"]["lines"][0]["status"], "finalized");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_batch_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(app, "/api/v1/payroll/batches/4242", Some(&hr)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
