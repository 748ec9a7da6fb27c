//! HTTP-level integration tests for attendance recording, the reconciled
//! summary, and exception requests.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, token_for};
use sqlx::PgPool;

async fn seed_employee(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO employees (full_name, status, ktp_number)
         VALUES ($1, 'active', '3171000000000008')
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("seed employee")
}

// ---------------------------------------------------------------------------
// Clock-in / clock-out
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clock_in_and_out(pool: PgPool) {
    let emp = seed_employee(&pool, "Ani").await;
    let app = build_test_app(pool);
    let token = token_for(emp, "marketing");

    // 25 minutes past the default 08:00 shift start.
    let response = post_json(
        app.clone(),
        "/api/v1/attendance/clock-in",
        Some(&token),
        serde_json::json!({ "work_date": "2026-05-04", "time": "08:25:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "late");
    assert_eq!(json["data"]["minutes_late"], 25);

    let response = post_json(
        app,
        "/api/v1/attendance/clock-out",
        Some(&token),
        serde_json::json!({ "work_date": "2026-05-04", "time": "17:05:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["check_out"], "17:05:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clock_out_without_clock_in_fails(pool: PgPool) {
    let emp = seed_employee(&pool, "Budi").await;
    let app = build_test_app(pool);
    let token = token_for(emp, "marketing");

    let response = post_json(
        app,
        "/api/v1/attendance/clock-out",
        Some(&token),
        serde_json::json!({ "work_date": "2026-05-04", "time": "17:00:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Reconciled summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_excludes_excused_lateness(pool: PgPool) {
    let emp = seed_employee(&pool, "Citra").await;
    sqlx::query(
        "INSERT INTO attendance_records (employee_id, work_date, status, minutes_late)
         VALUES ($1, '2026-05-04', 'late', 30), ($1, '2026-05-11', 'late', 60)",
    )
    .bind(emp)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO exception_requests
            (employee_id, request_type, status, request_date, reason)
         VALUES ($1, 'lateness_excuse', 'approved', '2026-05-04', 'traffic accident')",
    )
    .bind(emp)
    .execute(&pool)
    .await
    .unwrap();

    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(
        app,
        &format!("/api/v1/employees/{emp}/attendance-summary?start=2026-05-01&end=2026-05-31"),
        Some(&hr),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // Only the unexcused 60 minutes count toward the total.
    assert_eq!(json["data"]["total_minutes_late"], 60);
    let detail = json["data"]["lateness_detail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["excused"], true);
    assert_eq!(detail[1]["excused"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_for_unknown_employee_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let hr = token_for(50, "hr");

    let response = get(
        app,
        "/api/v1/employees/4242/attendance-summary?start=2026-05-01&end=2026-05-31",
        Some(&hr),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Exception requests over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_lifecycle(pool: PgPool) {
    let emp = seed_employee(&pool, "Dewi").await;
    let app = build_test_app(pool);
    let employee = token_for(emp, "marketing");
    let hr = token_for(50, "hr");

    let response = post_json(
        app.clone(),
        "/api/v1/requests",
        Some(&employee),
        serde_json::json!({
            "request_type": "lateness_excuse",
            "request_date": "2026-05-04",
            "reason": "flood on the commute route"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let request_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["status"], "pending");

    // The employee cannot approve; HR can.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/requests/{request_id}/approve"),
        Some(&employee),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/requests/{request_id}/approve"),
        Some(&hr),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["approved_by"].as_i64(), Some(50));

    // Deciding twice is an invalid transition.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/requests/{request_id}/reject"),
        Some(&hr),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");

    // The employee lists their own requests without the approve permission.
    let response = get(
        app,
        &format!("/api/v1/requests?employee_id={emp}"),
        Some(&employee),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_others_requests_needs_permission(pool: PgPool) {
    let emp = seed_employee(&pool, "Eko").await;
    let app = build_test_app(pool);
    let employee = token_for(emp, "marketing");

    let other = emp + 1;
    let response = get(
        app,
        &format!("/api/v1/requests?employee_id={other}"),
        Some(&employee),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
