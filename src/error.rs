//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{RunStatus, SlipStatus};

/// The main error type for the payroll calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Every variant
/// names the offending entity and its identifiers.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::NoActiveSalary { employee_id: 42 };
/// assert_eq!(
///     error.to_string(),
///     "No active salary assignment found for employee 42"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Tax configuration file or directory was not found.
    #[error("Tax configuration not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Tax configuration file could not be parsed.
    #[error("Failed to parse tax configuration '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given id.
    #[error("Employee {id} not found")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: i64,
    },

    /// No salary structure exists with the given id.
    #[error("Salary structure {id} not found")]
    StructureNotFound {
        /// The structure id that was not found.
        id: i64,
    },

    /// The salary structure is assigned to active employees and cannot be removed.
    #[error("Salary structure {id} is assigned to active employees and cannot be removed")]
    StructureInUse {
        /// The structure id.
        id: i64,
    },

    /// No salary assignment exists with the given id.
    #[error("Salary assignment {id} not found")]
    AssignmentNotFound {
        /// The assignment id that was not found.
        id: i64,
    },

    /// The employee has no active salary assignment.
    #[error("No active salary assignment found for employee {employee_id}")]
    NoActiveSalary {
        /// The employee missing an active assignment.
        employee_id: i64,
    },

    /// A salary assignment request failed validation.
    #[error("Invalid salary assignment for employee {employee_id}: {message}")]
    InvalidAssignment {
        /// The employee the assignment was for.
        employee_id: i64,
        /// A description of what made the assignment invalid.
        message: String,
    },

    /// No payroll run exists with the given id.
    #[error("Payroll run {id} not found")]
    RunNotFound {
        /// The run id that was not found.
        id: i64,
    },

    /// No payroll detail exists with the given id.
    #[error("Payroll detail {id} not found")]
    DetailNotFound {
        /// The detail id that was not found.
        id: i64,
    },

    /// No salary slip exists with the given id.
    #[error("Salary slip {id} not found")]
    SlipNotFound {
        /// The slip id that was not found.
        id: i64,
    },

    /// A detail already exists for this employee in this run.
    #[error("Employee {employee_id} already has a detail in payroll run {run_id}")]
    DuplicateDetail {
        /// The payroll run.
        run_id: i64,
        /// The employee already present in the run.
        employee_id: i64,
    },

    /// A slip has already been generated for this payroll detail.
    #[error("A salary slip already exists for payroll detail {detail_id}")]
    DuplicateSlip {
        /// The payroll detail.
        detail_id: i64,
    },

    /// The run has no details and cannot be processed.
    #[error("Payroll run {run_id} has no details and cannot be processed")]
    EmptyRun {
        /// The empty payroll run.
        run_id: i64,
    },

    /// The run is not in the status required for the attempted operation.
    #[error("Payroll run {run_id} is {status}, expected {required}")]
    InvalidRunStatus {
        /// The payroll run.
        run_id: i64,
        /// The status the run is currently in.
        status: RunStatus,
        /// The status required for the operation.
        required: RunStatus,
    },

    /// The slip is not in the status required for the attempted operation.
    #[error("Salary slip {slip_id} is {status}, expected {required}")]
    InvalidSlipStatus {
        /// The salary slip.
        slip_id: i64,
        /// The status the slip is currently in.
        status: SlipStatus,
        /// The status required for the operation.
        required: SlipStatus,
    },

    /// A payroll period's end date does not follow its start date.
    #[error("Invalid payroll period: end date {end} must be after start date {start}")]
    InvalidPeriod {
        /// The period start date.
        start: NaiveDate,
        /// The period end date.
        end: NaiveDate,
    },

    /// The payroll period overlaps an existing run for the organization.
    #[error(
        "Payroll period {start} to {end} overlaps an existing run for organization {organization_id}"
    )]
    OverlappingRun {
        /// The organization owning the runs.
        organization_id: i64,
        /// The rejected period start date.
        start: NaiveDate,
        /// The rejected period end date.
        end: NaiveDate,
    },

    /// A salary component failed validation.
    #[error("Invalid salary component '{name}': {message}")]
    InvalidComponent {
        /// The name of the invalid component.
        name: String,
        /// A description of what made the component invalid.
        message: String,
    },

    /// A tax slab's lower bound exceeds its upper bound.
    #[error("Invalid tax slab range: from {from} exceeds to {to}")]
    InvalidSlabRange {
        /// The slab's lower bound.
        from: Decimal,
        /// The slab's upper bound.
        to: Decimal,
    },

    /// A tax rate is outside the 0-100 percentage range.
    #[error("Invalid tax rate {rate}: must be between 0 and 100")]
    InvalidTaxRate {
        /// The out-of-range rate.
        rate: Decimal,
    },

    /// Two active tax slabs of one configuration overlap.
    #[error("Tax slab {from} to {to} overlaps another active slab")]
    OverlappingSlabs {
        /// The overlapping slab's lower bound.
        from: Decimal,
        /// The overlapping slab's upper bound.
        to: Decimal,
    },

    /// Day counts on a detail request were inconsistent or out of bounds.
    #[error("Invalid day counts: {message}")]
    InvalidDayCount {
        /// A description of the inconsistency.
        message: String,
    },

    /// A read-only collaborator (leave or benefit store) could not be reached.
    ///
    /// The detail builder degrades this to a zeroed deduction; it only
    /// surfaces as an error from the collaborator seam itself.
    #[error("Source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        /// The collaborator that failed.
        source_name: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
