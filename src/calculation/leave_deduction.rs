//! Leave-driven deduction calculation.
//!
//! Approved leave requests overlapping the payroll period reduce pay through
//! the structure's designated leave component. A structure with no such
//! component imposes no implicit penalty.

use rust_decimal::Decimal;

use crate::models::{LeaveRequest, LeaveStatus, PayrollPeriod, SalaryStructure};

/// Monthly day basis used to scale percentage-based leave components.
pub const MONTHLY_LEAVE_BASIS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The result of a leave deduction calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveDeductionResult {
    /// Approved leave days overlapping the period (clamped to it).
    pub leave_days: Decimal,
    /// The resulting deduction.
    pub amount: Decimal,
    /// The driving component's name, when the structure defines one.
    pub component_name: Option<String>,
}

/// Calculates the leave deduction for one employee and period.
///
/// Only requests with `Approved` status count, and each contributes the
/// calendar days of its overlap with the period. The deduction itself is
/// driven by the structure's leave component:
///
/// - percentage-based: `gross * percentage / 100`, scaled by
///   `leave_days / 30` (a fixed 30-day monthly basis);
/// - fixed: the amount is treated as per-day, multiplied by `leave_days`.
///
/// With no leave component the deduction is zero regardless of days taken.
pub fn calculate_leave_deduction(
    requests: &[LeaveRequest],
    period: &PayrollPeriod,
    gross_salary: Decimal,
    structure: &SalaryStructure,
) -> LeaveDeductionResult {
    let leave_days: Decimal = requests
        .iter()
        .filter(|request| request.status == LeaveStatus::Approved)
        .map(|request| request.overlap_days(period))
        .sum();

    let Some(component) = structure.leave_component() else {
        return LeaveDeductionResult {
            leave_days,
            amount: Decimal::ZERO,
            component_name: None,
        };
    };

    let amount = if leave_days.is_zero() {
        Decimal::ZERO
    } else if component.is_percentage_based {
        component.value_against(gross_salary) * leave_days / MONTHLY_LEAVE_BASIS
    } else {
        component.amount * leave_days
    };

    LeaveDeductionResult {
        leave_days,
        amount,
        component_name: Some(component.name.clone()),
    }
}
