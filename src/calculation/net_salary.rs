//! Structure-implied net salary evaluation.
//!
//! This module derives the net salary a structure implies for a given gross:
//! the gross minus every active deduction and tax component. Percentage
//! components apply against the gross (earnings apply against the basic; the
//! asymmetry is deliberate and matches how deduction rules are written).

use rust_decimal::Decimal;

use crate::models::{SalaryStructure, SlipLine};

/// The result of evaluating a structure's deduction side.
#[derive(Debug, Clone, PartialEq)]
pub struct NetSalaryResult {
    /// Gross minus all active deduction and tax components, floored at zero.
    pub net_salary: Decimal,
    /// One line per active deduction/tax component, in display order.
    pub lines: Vec<SlipLine>,
}

/// Computes the structure-implied net salary for a gross amount.
///
/// Each active Deduction or Tax component subtracts either its fixed amount
/// or `gross * percentage / 100`. The result is floored at zero: net salary
/// is never negative regardless of how many deductions are configured —
/// an explicit business rule, not error suppression.
///
/// A missing structure leaves the gross untouched (no deductions are known).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_net;
/// use payroll_engine::models::{ComponentType, SalaryComponent, SalaryStructure};
/// use rust_decimal::Decimal;
///
/// let mut structure = SalaryStructure::new(1, 10, "Standard", Decimal::from(5000));
/// structure.components.push(SalaryComponent::percentage(
///     "PAYE",
///     ComponentType::Deduction,
///     Decimal::from(15),
///     1,
/// ));
///
/// let result = compute_net(Decimal::from(7300), Some(&structure));
/// assert_eq!(result.net_salary, Decimal::from(6205));
/// ```
pub fn compute_net(gross_salary: Decimal, structure: Option<&SalaryStructure>) -> NetSalaryResult {
    let mut net_salary = gross_salary;
    let mut lines = Vec::new();

    if let Some(structure) = structure {
        for component in structure.components_in_order() {
            if !component.reduces_net() {
                continue;
            }
            let amount = component.value_against(gross_salary);
            net_salary -= amount;
            lines.push(SlipLine {
                name: component.name.clone(),
                component_type: component.component_type,
                amount,
                display_order: component.display_order,
            });
        }
    }

    NetSalaryResult {
        net_salary: net_salary.max(Decimal::ZERO),
        lines,
    }
}
