//! Repository for the `attendance_records` table and the base attendance
//! aggregation feeding payroll reconciliation.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use kencana_core::attendance::{self, BaseSummary, ATTENDANCE_PERMITTED, REQUEST_OVERTIME};
use kencana_core::error::CoreError;
use kencana_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::attendance::AttendanceRecord;

/// Column list for attendance_records queries.
const COLUMNS: &str = "id, employee_id, work_date, scheduled_start, scheduled_end, \
    check_in, check_out, status, minutes_late, created_at, updated_at";

/// Default shift window applied when no record exists yet for the day.
const DEFAULT_SHIFT_START: (u32, u32) = (8, 0);
const DEFAULT_SHIFT_END: (u32, u32) = (17, 0);

/// Provides clock-in/out writes and period aggregation reads.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record a check-in, deriving lateness minutes and the day's status
    /// from the scheduled shift start. Days already marked `permitted` keep
    /// that status.
    pub async fn clock_in(
        pool: &PgPool,
        employee_id: DbId,
        work_date: NaiveDate,
        time: NaiveTime,
    ) -> DbResult<AttendanceRecord> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE employee_id = $1 AND work_date = $2
             FOR UPDATE"
        );
        let existing = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(employee_id)
            .bind(work_date)
            .fetch_optional(&mut *tx)
            .await?;

        let record = match existing {
            Some(row) => {
                let minutes = attendance::minutes_late(row.scheduled_start, time);
                let status = if row.status == ATTENDANCE_PERMITTED {
                    ATTENDANCE_PERMITTED
                } else {
                    attendance::status_for_check_in(minutes)
                };
                let query = format!(
                    "UPDATE attendance_records
                     SET check_in = $3, minutes_late = $4, status = $5, updated_at = NOW()
                     WHERE employee_id = $1 AND work_date = $2
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, AttendanceRecord>(&query)
                    .bind(employee_id)
                    .bind(work_date)
                    .bind(time)
                    .bind(minutes)
                    .bind(status)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let scheduled_start =
                    NaiveTime::from_hms_opt(DEFAULT_SHIFT_START.0, DEFAULT_SHIFT_START.1, 0)
                        .expect("valid default shift start");
                let scheduled_end =
                    NaiveTime::from_hms_opt(DEFAULT_SHIFT_END.0, DEFAULT_SHIFT_END.1, 0)
                        .expect("valid default shift end");
                let minutes = attendance::minutes_late(scheduled_start, time);
                let status = attendance::status_for_check_in(minutes);
                let query = format!(
                    "INSERT INTO attendance_records
                        (employee_id, work_date, scheduled_start, scheduled_end,
                         check_in, minutes_late, status)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, AttendanceRecord>(&query)
                    .bind(employee_id)
                    .bind(work_date)
                    .bind(scheduled_start)
                    .bind(scheduled_end)
                    .bind(time)
                    .bind(minutes)
                    .bind(status)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(record)
    }

    /// Record a check-out on an existing attendance day.
    pub async fn clock_out(
        pool: &PgPool,
        employee_id: DbId,
        work_date: NaiveDate,
        time: NaiveTime,
    ) -> DbResult<AttendanceRecord> {
        let query = format!(
            "UPDATE attendance_records
             SET check_out = $3, updated_at = NOW()
             WHERE employee_id = $1 AND work_date = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(employee_id)
            .bind(work_date)
            .bind(time)
            .fetch_optional(pool)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "AttendanceRecord",
                id: employee_id,
            }))
    }

    /// Base attendance aggregate for one employee over an inclusive period:
    /// per-date lateness, absence days, and approved overtime hours. Pure
    /// read, no writes.
    pub async fn base_summary(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BaseSummary, sqlx::Error> {
        let late_days: Vec<(NaiveDate, i32)> = sqlx::query_as(
            "SELECT work_date, minutes_late FROM attendance_records
             WHERE employee_id = $1
               AND work_date BETWEEN $2 AND $3
               AND status = 'late'
               AND minutes_late > 0
             ORDER BY work_date ASC",
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        let absence_days: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance_records
             WHERE employee_id = $1
               AND work_date BETWEEN $2 AND $3
               AND status = 'absent'",
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        let overtime_hours: Option<f64> = sqlx::query_scalar(
            "SELECT SUM(overtime_hours) FROM exception_requests
             WHERE employee_id = $1
               AND request_type = $2
               AND status = 'approved'
               AND request_date BETWEEN $3 AND $4",
        )
        .bind(employee_id)
        .bind(REQUEST_OVERTIME)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(BaseSummary {
            late_days,
            absence_days,
            overtime_hours: overtime_hours.unwrap_or(0.0),
        })
    }
}
