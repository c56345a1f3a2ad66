//! Employee salary assignment model.
//!
//! An assignment links one employee to one salary structure for a time range
//! and carries an optional basic-salary override. At most one assignment per
//! employee is active with an open end date at any instant; the store closes
//! the previous assignment whenever a new one is created.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Timestamped;

/// Links an employee to a salary structure for a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryAssignment {
    /// Unique identifier for the assignment.
    pub id: i64,
    /// The employee this assignment belongs to.
    pub employee_id: i64,
    /// The salary structure being assigned.
    pub structure_id: i64,
    /// The date the assignment takes effect.
    pub effective_date: NaiveDate,
    /// The date the assignment was closed; `None` while current.
    pub end_date: Option<NaiveDate>,
    /// Overrides the structure's basic salary when present.
    pub override_basic_salary: Option<Decimal>,
    /// Cached structure-implied gross salary, computed on creation.
    pub gross_salary: Decimal,
    /// Cached structure-implied net salary, computed on creation.
    pub net_salary: Decimal,
    /// Whether this is the employee's current assignment.
    pub is_active: bool,
    /// Optional free-form remarks.
    pub remarks: Option<String>,
    /// When the assignment was created.
    pub created_at: DateTime<Utc>,
    /// When the assignment was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SalaryAssignment {
    /// Creates an active assignment; cached salaries start at zero and are
    /// filled in by the store when the structure is resolved.
    pub fn new(
        id: i64,
        employee_id: i64,
        structure_id: i64,
        effective_date: NaiveDate,
        override_basic_salary: Option<Decimal>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            employee_id,
            structure_id,
            effective_date,
            end_date: None,
            override_basic_salary,
            gross_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            is_active: true,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the assignment is active and covers the given date.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.effective_date <= date
            && self.end_date.is_none_or(|end| end > date)
    }
}

impl Timestamped for SalaryAssignment {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
