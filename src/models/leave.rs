//! Leave request model.
//!
//! Leave requests are owned by the leave management service; the engine
//! consumes them read-only. Only approved requests overlapping the payroll
//! period affect calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayrollPeriod;

/// The approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting approval.
    Pending,
    /// Approved; counts toward payroll deductions.
    Approved,
    /// Rejected by the approver.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// A leave request as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: i64,
    /// The employee requesting leave.
    pub employee_id: i64,
    /// The type of leave requested.
    pub leave_type_id: i64,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Days requested, possibly fractional for half days.
    pub days_requested: Decimal,
    /// Approval state of the request.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Creates an approved request spanning the given dates.
    pub fn approved(
        id: i64,
        employee_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let days = (end_date - start_date).num_days() + 1;
        Self {
            id,
            employee_id,
            leave_type_id: 1,
            start_date,
            end_date,
            days_requested: Decimal::from(days),
            status: LeaveStatus::Approved,
        }
    }

    /// Counts the calendar days of this request that fall inside the period.
    ///
    /// Both the request range and the period are inclusive on both ends.
    /// Returns zero when the ranges are disjoint. The count is clamped to the
    /// period, so a request straddling a period boundary only contributes the
    /// days inside it.
    pub fn overlap_days(&self, period: &PayrollPeriod) -> Decimal {
        let start = self.start_date.max(period.start_date);
        let end = self.end_date.min(period.end_date);
        if start > end {
            return Decimal::ZERO;
        }
        Decimal::from((end - start).num_days() + 1)
    }
}
