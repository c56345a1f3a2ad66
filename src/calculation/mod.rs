//! Calculation logic for the payroll engine.
//!
//! This module contains all the pure calculation functions: gross salary
//! evaluation from a salary structure, structure-implied net salary,
//! progressive (slab-based) income tax, proration for partial work periods,
//! leave-driven deductions, and benefit contribution deductions. Each
//! calculator returns a result struct carrying the computed amount plus a
//! line-level breakdown for slips and reporting.

mod benefit_deduction;
mod gross_salary;
mod leave_deduction;
mod net_salary;
mod progressive_tax;
mod proration;

pub use benefit_deduction::{BenefitDeductionResult, BenefitLine, calculate_benefit_deduction};
pub use gross_salary::{GrossSalaryResult, compute_gross};
pub use leave_deduction::{LeaveDeductionResult, MONTHLY_LEAVE_BASIS, calculate_leave_deduction};
pub use net_salary::{NetSalaryResult, compute_net};
pub use progressive_tax::{SlabTaxLine, TaxAssessment, applicable_rate, calculate_tax};
pub use proration::prorate;
