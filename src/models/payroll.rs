//! Payroll run and payroll detail models.
//!
//! A payroll run is one period's batch of per-employee calculations and its
//! lifecycle state. A payroll detail is one employee's computed result within
//! a run. Run totals are always derived from the details, never hand-edited.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::Timestamped;

/// A payroll period with inclusive start and end dates.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a period after checking that the end date follows the start.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> PayrollResult<Self> {
        if end_date <= start_date {
            return Err(PayrollError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if two periods share at least one day.
    pub fn overlaps(&self, other: &PayrollPeriod) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }
}

/// How often an organization runs this payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// One run per calendar month.
    Monthly,
    /// One run every two weeks.
    BiWeekly,
    /// One run per week.
    Weekly,
    /// One run per quarter.
    Quarterly,
}

/// The lifecycle state of a payroll run.
///
/// Transitions are one-directional: Draft → Processed → Paid, with
/// Draft → Cancelled as the only other exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Details may be added, edited, and regenerated.
    Draft,
    /// Totals are frozen; awaiting payment.
    Processed,
    /// Salaries have been paid out.
    Paid,
    /// Abandoned before processing.
    Cancelled,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Draft => "Draft",
            RunStatus::Processed => "Processed",
            RunStatus::Paid => "Paid",
            RunStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// The lifecycle state of a payroll detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    /// Newly built; amounts may still be recalculated.
    Draft,
    /// Manually approved.
    Approved,
}

/// Aggregated totals of a payroll run, derived from its details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of detail gross salaries.
    pub gross_salary: Decimal,
    /// Sum of detail deductions (leave + benefits + tax).
    pub total_deductions: Decimal,
    /// Sum of detail income tax.
    pub total_tax: Decimal,
    /// Sum of detail net salaries.
    pub net_salary: Decimal,
    /// Number of details in the run.
    pub employee_count: u32,
}

/// One payroll period's batch of per-employee calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: i64,
    /// The organization this run belongs to.
    pub organization_id: i64,
    /// Run name (e.g., "January 2025").
    pub name: String,
    /// How often this payroll recurs.
    pub frequency: PayFrequency,
    /// The period covered by the run.
    pub period: PayrollPeriod,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// Derived totals, recomputed when the run is processed.
    pub totals: RunTotals,
    /// When the run transitioned to Processed.
    pub processed_at: Option<DateTime<Utc>>,
    /// When the run was paid out.
    pub paid_at: Option<DateTime<Utc>>,
    /// Optional free-form remarks.
    pub remarks: Option<String>,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRun {
    /// Creates a draft run with zeroed totals.
    pub fn new(
        id: i64,
        organization_id: i64,
        name: impl Into<String>,
        frequency: PayFrequency,
        period: PayrollPeriod,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            name: name.into(),
            frequency,
            period,
            status: RunStatus::Draft,
            totals: RunTotals::default(),
            processed_at: None,
            paid_at: None,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Timestamped for PayrollRun {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// One employee's computed result within a payroll run.
///
/// At most one detail exists per (run, employee) pair; the store enforces
/// this as a guarded insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// Unique identifier for the detail.
    pub id: i64,
    /// The run this detail belongs to.
    pub run_id: i64,
    /// The employee this detail is for.
    pub employee_id: i64,
    /// Gross salary for the period (after proration, if any).
    pub gross_salary: Decimal,
    /// Leave-driven deduction.
    pub leave_deduction: Decimal,
    /// Benefit contribution deduction.
    pub benefit_deduction: Decimal,
    /// Income tax for the period.
    pub total_tax: Decimal,
    /// Leave + benefit + tax.
    pub total_deductions: Decimal,
    /// Net payable amount, floored at zero.
    pub net_salary: Decimal,
    /// Working days in the period, when supplied for proration.
    pub working_days: Option<u32>,
    /// Days actually worked, when supplied for proration.
    pub days_worked: Option<u32>,
    /// Approved leave days overlapping the period.
    pub leave_days: Decimal,
    /// Current lifecycle state.
    pub status: DetailStatus,
    /// When the detail was created.
    pub created_at: DateTime<Utc>,
    /// When the detail was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Timestamped for PayrollDetail {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
