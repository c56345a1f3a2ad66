//! Payroll detail construction.
//!
//! The detail builder is the core unit of work: it turns one employee's
//! salary structure, attendance, leave history, benefit enrollments, and tax
//! configuration into the per-period earnings, deductions, tax, and net pay
//! recorded on a payroll detail.
//!
//! Leave and benefit lookups are fail-soft: a failing collaborator
//! contributes a zeroed deduction and an explicit [`Degradation`] record,
//! logged for audit but invisible to the end user. A missing salary
//! assignment or structure, by contrast, is a configuration error the caller
//! must surface.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::{
    BenefitDeductionResult, GrossSalaryResult, LeaveDeductionResult, TaxAssessment,
    calculate_benefit_deduction, calculate_leave_deduction, calculate_tax, compute_gross, prorate,
};
use crate::config::TaxConfiguration;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollPeriod, SalaryStructure, SlipLine};

use super::store::{BenefitSource, LeaveSource};

/// Everything the builder needs to compute one detail.
#[derive(Debug, Clone)]
pub struct DetailInputs<'a> {
    /// The employee the detail is for.
    pub employee_id: i64,
    /// The payroll period being calculated.
    pub period: &'a PayrollPeriod,
    /// The employee's salary structure.
    pub structure: &'a SalaryStructure,
    /// Basic-salary override from the active assignment.
    pub override_basic_salary: Option<Decimal>,
    /// The organization's active tax configuration; `None` yields zero tax.
    pub tax_configuration: Option<&'a TaxConfiguration>,
    /// Number of payroll periods covered by the run, for exemption scaling.
    pub periods_in_run: u32,
    /// Working days in the period, when proration is requested.
    pub working_days: Option<u32>,
    /// Days actually worked, when proration is requested.
    pub days_worked: Option<u32>,
}

/// A recorded fail-soft outcome: which source failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    /// The collaborator that failed ("leave" or "benefits").
    pub source: &'static str,
    /// The failure cause, for the audit log.
    pub message: String,
}

/// The computed amounts for one payroll detail, before persistence.
#[derive(Debug, Clone)]
pub struct DetailComputation {
    /// The basic salary the evaluation was based on (unprorated).
    pub basic_salary: Decimal,
    /// Gross salary for the period, prorated when day counts were supplied.
    pub gross_salary: Decimal,
    /// Earning component lines, prorated like the gross.
    pub earnings: Vec<SlipLine>,
    /// Leave deduction outcome.
    pub leave: LeaveDeductionResult,
    /// Benefit deduction outcome.
    pub benefits: BenefitDeductionResult,
    /// Income tax assessment.
    pub tax: TaxAssessment,
    /// Leave + benefit + tax.
    pub total_deductions: Decimal,
    /// Net payable, floored at zero.
    pub net_salary: Decimal,
    /// Fail-soft outcomes recorded while computing.
    pub degradations: Vec<Degradation>,
}

/// Validates day counts supplied with a detail request.
///
/// Both counts must fit a calendar month (0 to 31) and the days worked may
/// not exceed the working days when both are present.
pub fn validate_day_counts(
    working_days: Option<u32>,
    days_worked: Option<u32>,
) -> PayrollResult<()> {
    if let Some(working) = working_days {
        if working > 31 {
            return Err(PayrollError::InvalidDayCount {
                message: format!("working days {} must be between 0 and 31", working),
            });
        }
    }
    if let Some(worked) = days_worked {
        if worked > 31 {
            return Err(PayrollError::InvalidDayCount {
                message: format!("days worked {} must be between 0 and 31", worked),
            });
        }
        if let Some(working) = working_days {
            if worked > working {
                return Err(PayrollError::InvalidDayCount {
                    message: format!(
                        "days worked {} cannot exceed working days {}",
                        worked, working
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Computes one employee's payroll detail amounts.
///
/// The sequence follows the payroll rules exactly:
///
/// 1. gross from the structure and the assignment's basic override;
/// 2. proration of the gross when day counts were supplied;
/// 3. leave and benefit deductions, each fail-soft against its source;
/// 4. income tax on the (prorated) gross, zero without a configuration;
/// 5. `net = max(gross - leave - benefits - tax, 0)`.
///
/// The function is pure apart from reading the two collaborator seams, so a
/// run's details can be computed independently and in parallel.
pub fn compute_detail<L, B>(
    inputs: &DetailInputs<'_>,
    leave_source: &L,
    benefit_source: &B,
) -> DetailComputation
where
    L: LeaveSource + ?Sized,
    B: BenefitSource + ?Sized,
{
    let GrossSalaryResult {
        basic_salary,
        gross_salary,
        lines,
    } = compute_gross(Some(inputs.structure), inputs.override_basic_salary);

    let gross_salary = prorate(gross_salary, inputs.days_worked, inputs.working_days);
    let earnings = lines
        .into_iter()
        .map(|mut line| {
            line.amount = prorate(line.amount, inputs.days_worked, inputs.working_days);
            line
        })
        .collect();

    let mut degradations = Vec::new();

    let leave = match leave_source.approved_leave(inputs.employee_id, inputs.period) {
        Ok(requests) => {
            calculate_leave_deduction(&requests, inputs.period, gross_salary, inputs.structure)
        }
        Err(error) => {
            warn!(
                employee_id = inputs.employee_id,
                error = %error,
                "leave lookup failed; applying zero leave deduction"
            );
            degradations.push(Degradation {
                source: "leave",
                message: error.to_string(),
            });
            LeaveDeductionResult {
                leave_days: Decimal::ZERO,
                amount: Decimal::ZERO,
                component_name: None,
            }
        }
    };

    let benefits = match benefit_source.active_enrollments(inputs.employee_id, inputs.period.end_date)
    {
        Ok(enrollments) => calculate_benefit_deduction(&enrollments, inputs.period.end_date),
        Err(error) => {
            warn!(
                employee_id = inputs.employee_id,
                error = %error,
                "benefit lookup failed; applying zero benefit deduction"
            );
            degradations.push(Degradation {
                source: "benefits",
                message: error.to_string(),
            });
            BenefitDeductionResult {
                amount: Decimal::ZERO,
                lines: Vec::new(),
            }
        }
    };

    let tax = match inputs.tax_configuration {
        Some(configuration) => calculate_tax(configuration, gross_salary, inputs.periods_in_run),
        None => TaxAssessment {
            taxable_income: Decimal::ZERO,
            tax: Decimal::ZERO,
            bands: Vec::new(),
        },
    };

    let total_deductions = leave.amount + benefits.amount + tax.tax;
    let net_salary = (gross_salary - total_deductions).max(Decimal::ZERO);

    DetailComputation {
        basic_salary,
        gross_salary,
        earnings,
        leave,
        benefits,
        tax,
        total_deductions,
        net_salary,
        degradations,
    }
}
