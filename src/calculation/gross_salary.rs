//! Gross salary evaluation.
//!
//! This module resolves a salary structure into a gross salary: the basic
//! salary (or a per-assignment override) plus every active earning component,
//! fixed or percentage-of-basic.

use rust_decimal::Decimal;

use crate::models::{SalaryStructure, SlipLine};

/// The result of evaluating a structure's earning side.
#[derive(Debug, Clone, PartialEq)]
pub struct GrossSalaryResult {
    /// The basic salary the evaluation was based on.
    pub basic_salary: Decimal,
    /// Basic salary plus all active earning components.
    pub gross_salary: Decimal,
    /// One line per active earning component, in display order.
    pub lines: Vec<SlipLine>,
}

impl GrossSalaryResult {
    fn unconfigured() -> Self {
        Self {
            basic_salary: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            lines: Vec::new(),
        }
    }
}

/// Computes gross salary from a structure and an optional basic override.
///
/// The basic salary is the override when present, otherwise the structure's
/// own basic. Each active earning component then adds either its fixed
/// amount or `basic * percentage / 100`. Components are evaluated in display
/// order so the line breakdown matches slip rendering; the sum itself does
/// not depend on the order.
///
/// A missing structure is treated as an unconfigured-employee state and
/// yields a zero gross rather than an error; callers report it upstream.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_gross;
/// use payroll_engine::models::{ComponentType, SalaryComponent, SalaryStructure};
/// use rust_decimal::Decimal;
///
/// let mut structure = SalaryStructure::new(1, 10, "Standard", Decimal::from(5000));
/// structure.components.push(SalaryComponent::fixed(
///     "House Allowance",
///     ComponentType::Earning,
///     Decimal::from(1500),
///     1,
/// ));
///
/// let result = compute_gross(Some(&structure), None);
/// assert_eq!(result.gross_salary, Decimal::from(6500));
///
/// let result = compute_gross(Some(&structure), Some(Decimal::from(6000)));
/// assert_eq!(result.gross_salary, Decimal::from(7500));
/// ```
pub fn compute_gross(
    structure: Option<&SalaryStructure>,
    override_basic: Option<Decimal>,
) -> GrossSalaryResult {
    let Some(structure) = structure else {
        return GrossSalaryResult::unconfigured();
    };

    let basic_salary = override_basic.unwrap_or(structure.basic_salary);
    let mut gross_salary = basic_salary;
    let mut lines = Vec::new();

    for component in structure.components_in_order() {
        if !component.is_earning() {
            continue;
        }
        let amount = component.value_against(basic_salary);
        gross_salary += amount;
        lines.push(SlipLine {
            name: component.name.clone(),
            component_type: component.component_type,
            amount,
            display_order: component.display_order,
        });
    }

    GrossSalaryResult {
        basic_salary,
        gross_salary,
        lines,
    }
}
