//! Salary slip composition.
//!
//! Expands one payroll detail's totals back into the individual named
//! components of the originating salary structure, producing the line items
//! of a payslip document.

use chrono::{DateTime, Utc};

use crate::calculation::prorate;
use crate::models::{PayrollDetail, SalarySlip, SalaryStructure, SlipLine, SlipStatus};

/// Composes a salary slip from a payroll detail and its structure.
///
/// Component lines are rendered in structure display order and renumbered
/// sequentially on the slip. Percentage components are evaluated against the
/// detail's gross salary, fixed components as configured, and every line is
/// prorated by the detail's recorded day ratio so the breakdown matches the
/// prorated totals. The slip's headline figures are copied from the detail
/// unchanged.
pub fn compose_slip(
    detail: &PayrollDetail,
    structure: &SalaryStructure,
    period_label: String,
    now: DateTime<Utc>,
) -> SalarySlip {
    let mut lines = Vec::new();
    let mut display_order = 1;

    for component in structure.components_in_order() {
        let amount = prorate(
            component.value_against(detail.gross_salary),
            detail.days_worked,
            detail.working_days,
        );
        lines.push(SlipLine {
            name: component.name.clone(),
            component_type: component.component_type,
            amount,
            display_order,
        });
        display_order += 1;
    }

    let slip_number = format!(
        "SS-{}-{}-{}",
        detail.run_id,
        detail.employee_id,
        now.format("%Y%m%d")
    );

    SalarySlip {
        id: 0,
        detail_id: detail.id,
        employee_id: detail.employee_id,
        slip_number,
        period_label,
        gross_salary: detail.gross_salary,
        total_deductions: detail.total_deductions,
        income_tax: detail.total_tax,
        net_payable: detail.net_salary,
        credited_date: None,
        status: SlipStatus::Generated,
        lines,
        created_at: now,
        updated_at: now,
    }
}
