//! Core data models for the payroll calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod benefit;
mod employee;
mod leave;
mod payroll;
mod salary_structure;
mod slip;

pub use assignment::SalaryAssignment;
pub use benefit::{BenefitEnrollment, BenefitPlan, EnrollmentStatus};
pub use employee::Employee;
pub use leave::{LeaveRequest, LeaveStatus};
pub use payroll::{
    DetailStatus, PayFrequency, PayrollDetail, PayrollPeriod, PayrollRun, RunStatus, RunTotals,
};
pub use salary_structure::{ComponentType, SalaryComponent, SalaryStructure};
pub use slip::{SalarySlip, SlipLine, SlipStatus};

use chrono::{DateTime, Utc};

/// Capability for entities that carry audit timestamps.
///
/// The storage layer calls [`Timestamped::touch`] on every write instead of
/// stamping fields through runtime type inspection. Callers pass the clock
/// value explicitly, which keeps the engine deterministic under test.
pub trait Timestamped {
    /// Updates the entity's `updated_at` timestamp.
    fn touch(&mut self, at: DateTime<Utc>);
}
