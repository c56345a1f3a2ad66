//! Benefit plan and enrollment models.
//!
//! Benefit administration lives outside the engine; payroll only needs to
//! know which enrollments are active on a reference date and what the
//! employee-side contribution is.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The lifecycle state of a benefit enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Contributions are being collected.
    Active,
    /// Temporarily paused; no contributions.
    Suspended,
    /// Permanently ended.
    Terminated,
    /// Awaiting activation.
    Pending,
}

/// A benefit plan offered by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitPlan {
    /// Unique identifier for the plan.
    pub id: i64,
    /// The organization offering the plan.
    pub organization_id: i64,
    /// Plan name (e.g., "Gold Health Plan").
    pub name: String,
    /// Default employee-side contribution per period.
    pub employee_contribution: Decimal,
    /// Employer-side contribution per period.
    pub employer_contribution: Decimal,
    /// Whether the plan is open.
    pub is_active: bool,
}

impl BenefitPlan {
    /// Creates an active plan.
    pub fn new(
        id: i64,
        organization_id: i64,
        name: impl Into<String>,
        employee_contribution: Decimal,
        employer_contribution: Decimal,
    ) -> Self {
        Self {
            id,
            organization_id,
            name: name.into(),
            employee_contribution,
            employer_contribution,
            is_active: true,
        }
    }
}

/// An employee's enrollment in a benefit plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitEnrollment {
    /// Unique identifier for the enrollment.
    pub id: i64,
    /// The enrolled employee.
    pub employee_id: i64,
    /// The plan enrolled in.
    pub plan_id: i64,
    /// The date enrollment took effect.
    pub enrolled_date: NaiveDate,
    /// The date enrollment ended; `None` while ongoing.
    pub termination_date: Option<NaiveDate>,
    /// Lifecycle state of the enrollment.
    pub status: EnrollmentStatus,
    /// Overrides the plan's default employee contribution when present.
    pub employee_contribution_override: Option<Decimal>,
    /// Soft-delete flag.
    pub is_active: bool,
}

impl BenefitEnrollment {
    /// Creates an active enrollment starting on the given date.
    pub fn new(id: i64, employee_id: i64, plan_id: i64, enrolled_date: NaiveDate) -> Self {
        Self {
            id,
            employee_id,
            plan_id,
            enrolled_date,
            termination_date: None,
            status: EnrollmentStatus::Active,
            employee_contribution_override: None,
            is_active: true,
        }
    }

    /// Returns true if the enrollment contributes on the given date.
    ///
    /// An enrollment contributes when it is active, in `Active` status,
    /// enrolled on or before the date, and not yet terminated (a termination
    /// date strictly after the reference date still contributes).
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.status == EnrollmentStatus::Active
            && self.enrolled_date <= date
            && self.termination_date.is_none_or(|end| end > date)
    }

    /// The employee-side contribution, honoring the per-enrollment override.
    pub fn contribution(&self, plan: &BenefitPlan) -> Decimal {
        self.employee_contribution_override
            .unwrap_or(plan.employee_contribution)
    }
}
