//! Integration tests for attendance aggregation, excuse reconciliation
//! lookups, and pending-request counting.

use chrono::NaiveDate;
use sqlx::PgPool;

use kencana_db::repositories::{AttendanceRepo, RequestRepo};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

async fn seed_employee(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO employees (full_name, status, ktp_number)
         VALUES ($1, 'active', '3171000000000001')
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("seed employee")
}

async fn seed_attendance(pool: &PgPool, employee_id: i64, date: NaiveDate, status: &str, minutes_late: i32) {
    sqlx::query(
        "INSERT INTO attendance_records
            (employee_id, work_date, status, minutes_late)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(employee_id)
    .bind(date)
    .bind(status)
    .bind(minutes_late)
    .execute(pool)
    .await
    .expect("seed attendance");
}

async fn seed_request(
    pool: &PgPool,
    employee_id: i64,
    request_type: &str,
    status: &str,
    request_date: Option<NaiveDate>,
    span: Option<(NaiveDate, NaiveDate)>,
    hours: Option<f64>,
) {
    sqlx::query(
        "INSERT INTO exception_requests
            (employee_id, request_type, status, request_date, start_date, end_date,
             overtime_hours, reason)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'seeded')",
    )
    .bind(employee_id)
    .bind(request_type)
    .bind(status)
    .bind(request_date)
    .bind(span.map(|(s, _)| s))
    .bind(span.map(|(_, e)| e))
    .bind(hours)
    .execute(pool)
    .await
    .expect("seed request");
}

// ---------------------------------------------------------------------------
// Base summary aggregation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_base_summary_aggregates_period(pool: PgPool) {
    let emp = seed_employee(&pool, "Ani").await;
    seed_attendance(&pool, emp, d(3), "late", 30).await;
    seed_attendance(&pool, emp, d(10), "late", 40).await;
    seed_attendance(&pool, emp, d(21), "late", 20).await;
    seed_attendance(&pool, emp, d(11), "absent", 0).await;
    seed_attendance(&pool, emp, d(12), "present", 0).await;
    // Outside the period.
    seed_attendance(&pool, emp, NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(), "late", 99).await;
    seed_request(&pool, emp, "overtime", "approved", Some(d(14)), None, Some(3.5)).await;
    seed_request(&pool, emp, "overtime", "pending", Some(d(15)), None, Some(2.0)).await;

    let summary = AttendanceRepo::base_summary(&pool, emp, d(1), d(31)).await.unwrap();
    assert_eq!(summary.late_days, vec![(d(3), 30), (d(10), 40), (d(21), 20)]);
    assert_eq!(summary.absence_days, 1);
    // Only approved overtime counts.
    assert_eq!(summary.overtime_hours, 3.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approved_excuse_dates_only(pool: PgPool) {
    let emp = seed_employee(&pool, "Budi").await;
    seed_request(&pool, emp, "lateness_excuse", "approved", Some(d(3)), None, None).await;
    seed_request(&pool, emp, "lateness_excuse", "pending", Some(d(10)), None, None).await;
    seed_request(&pool, emp, "lateness_excuse", "rejected", Some(d(21)), None, None).await;

    let dates = RequestRepo::approved_lateness_excuse_dates(&pool, emp, d(1), d(31))
        .await
        .unwrap();
    assert_eq!(dates, vec![d(3)]);
}

// ---------------------------------------------------------------------------
// Pending counts and range overlap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_counts_per_category(pool: PgPool) {
    let emp = seed_employee(&pool, "Citra").await;
    seed_request(&pool, emp, "lateness_excuse", "pending", Some(d(5)), None, None).await;
    seed_request(&pool, emp, "absence_excuse", "pending", Some(d(6)), None, None).await;
    seed_request(&pool, emp, "overtime", "pending", Some(d(7)), None, Some(2.0)).await;
    seed_request(&pool, emp, "leave", "pending", None, Some((d(20), d(22))), None).await;
    // Decided requests never count.
    seed_request(&pool, emp, "leave", "approved", None, Some((d(2), d(4))), None).await;

    let counts = RequestRepo::pending_counts(&pool, emp, d(1), d(31)).await.unwrap();
    assert_eq!(counts.permission, 2);
    assert_eq!(counts.overtime, 1);
    assert_eq!(counts.leave, 1);
    assert_eq!(counts.total, 4);
    assert!(counts.has_pending);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_leave_span_containing_period_counts(pool: PgPool) {
    let emp = seed_employee(&pool, "Dewi").await;
    // Span fully containing the queried period.
    seed_request(
        &pool,
        emp,
        "leave",
        "pending",
        None,
        Some((NaiveDate::from_ymd_opt(2026, 4, 20).unwrap(), NaiveDate::from_ymd_opt(2026, 6, 10).unwrap())),
        None,
    )
    .await;
    // Span touching the period boundary on the last day.
    seed_request(&pool, emp, "leave", "pending", None, Some((d(31), d(31))), None).await;
    // Disjoint span.
    seed_request(
        &pool,
        emp,
        "leave",
        "pending",
        None,
        Some((NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), NaiveDate::from_ymd_opt(2026, 6, 3).unwrap())),
        None,
    )
    .await;

    let counts = RequestRepo::pending_counts(&pool, emp, d(1), d(31)).await.unwrap();
    assert_eq!(counts.leave, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_counts_empty_when_clean(pool: PgPool) {
    let emp = seed_employee(&pool, "Eko").await;
    let counts = RequestRepo::pending_counts(&pool, emp, d(1), d(31)).await.unwrap();
    assert_eq!(counts.total, 0);
    assert!(!counts.has_pending);
}

// ---------------------------------------------------------------------------
// Clock-in path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clock_in_derives_lateness(pool: PgPool) {
    let emp = seed_employee(&pool, "Fajar").await;
    let t = |h, m| chrono::NaiveTime::from_hms_opt(h, m, 0).unwrap();

    let record = AttendanceRepo::clock_in(&pool, emp, d(4), t(8, 25)).await.unwrap();
    assert_eq!(record.status, "late");
    assert_eq!(record.minutes_late, 25);

    // Re-clocking the same day updates in place (one row per day).
    let record = AttendanceRepo::clock_in(&pool, emp, d(4), t(7, 55)).await.unwrap();
    assert_eq!(record.status, "present");
    assert_eq!(record.minutes_late, 0);

    let record = AttendanceRepo::clock_out(&pool, emp, d(4), t(17, 10)).await.unwrap();
    assert_eq!(record.check_out, Some(t(17, 10)));
}
