//! Salary structure and salary component models.
//!
//! A salary structure is an organization-level template: a basic salary plus
//! an ordered list of earning and deduction components. Structures are shared
//! by many employees through salary assignments; per-employee variation comes
//! from the assignment's basic-salary override, never from editing the
//! template.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::Timestamped;

/// The role a salary component plays in the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Adds to gross salary (allowances and similar).
    Earning,
    /// Subtracts from gross salary when deriving net.
    Deduction,
    /// A tax-flavored deduction; treated like a deduction when deriving net.
    Tax,
}

/// One named line item of a salary structure.
///
/// A component is either fixed or percentage-based, selected by
/// `is_percentage_based`; exactly one of the two sources of value is
/// effective at evaluation time. Percentage earnings apply against the basic
/// salary, percentage deductions against the gross.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ComponentType, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let housing = SalaryComponent::fixed("House Allowance", ComponentType::Earning, Decimal::from(1500), 1);
/// assert_eq!(housing.value_against(Decimal::from(5000)), Decimal::from(1500));
///
/// let paye = SalaryComponent::percentage("PAYE", ComponentType::Deduction, Decimal::from(15), 2);
/// assert_eq!(paye.value_against(Decimal::from(7300)), Decimal::from(1095));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Component name (e.g., "House Allowance", "NAPSA Contribution").
    pub name: String,
    /// Whether this component earns, deducts, or taxes.
    pub component_type: ComponentType,
    /// Fixed amount, effective when the component is not percentage-based.
    pub amount: Decimal,
    /// Percentage, effective when the component is percentage-based.
    pub percentage: Option<Decimal>,
    /// Selects between the fixed amount and the percentage.
    pub is_percentage_based: bool,
    /// Whether this component counts toward taxable income.
    pub is_taxable: bool,
    /// Inactive components are skipped during evaluation.
    pub is_active: bool,
    /// Position of the component in evaluation and slip rendering.
    pub display_order: u32,
}

impl SalaryComponent {
    /// Creates an active fixed-amount component.
    pub fn fixed(
        name: impl Into<String>,
        component_type: ComponentType,
        amount: Decimal,
        display_order: u32,
    ) -> Self {
        Self {
            name: name.into(),
            component_type,
            amount,
            percentage: None,
            is_percentage_based: false,
            is_taxable: component_type == ComponentType::Earning,
            is_active: true,
            display_order,
        }
    }

    /// Creates an active percentage-based component.
    pub fn percentage(
        name: impl Into<String>,
        component_type: ComponentType,
        percentage: Decimal,
        display_order: u32,
    ) -> Self {
        Self {
            name: name.into(),
            component_type,
            amount: Decimal::ZERO,
            percentage: Some(percentage),
            is_percentage_based: true,
            is_taxable: component_type == ComponentType::Earning,
            is_active: true,
            display_order,
        }
    }

    /// Evaluates the component against a base amount.
    ///
    /// Percentage-based components yield `base * percentage / 100`; fixed
    /// components yield their configured amount regardless of the base. A
    /// percentage-based component with no percentage configured evaluates to
    /// zero (such components are rejected at configuration-write time).
    pub fn value_against(&self, base: Decimal) -> Decimal {
        if self.is_percentage_based {
            match self.percentage {
                Some(percentage) => base * percentage / Decimal::from(100),
                None => Decimal::ZERO,
            }
        } else {
            self.amount
        }
    }

    /// Returns true if the component adds to gross salary.
    pub fn is_earning(&self) -> bool {
        self.component_type == ComponentType::Earning
    }

    /// Returns true if the component reduces net salary (deduction or tax).
    pub fn reduces_net(&self) -> bool {
        matches!(
            self.component_type,
            ComponentType::Deduction | ComponentType::Tax
        )
    }

    /// Validates the component at configuration-write time.
    ///
    /// Rejects empty names, non-positive or out-of-range percentages on
    /// percentage-based components, and negative fixed amounts.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.name.trim().is_empty() {
            return Err(PayrollError::InvalidComponent {
                name: self.name.clone(),
                message: "component name is required".to_string(),
            });
        }

        if self.is_percentage_based {
            match self.percentage {
                Some(percentage)
                    if percentage > Decimal::ZERO && percentage <= Decimal::from(100) => {}
                Some(percentage) => {
                    return Err(PayrollError::InvalidComponent {
                        name: self.name.clone(),
                        message: format!(
                            "percentage {} must be greater than 0 and at most 100",
                            percentage
                        ),
                    });
                }
                None => {
                    return Err(PayrollError::InvalidComponent {
                        name: self.name.clone(),
                        message: "percentage-based component has no percentage".to_string(),
                    });
                }
            }
        } else if self.amount < Decimal::ZERO {
            return Err(PayrollError::InvalidComponent {
                name: self.name.clone(),
                message: format!("amount {} cannot be negative", self.amount),
            });
        }

        Ok(())
    }
}

/// A salary structure template: basic salary plus ordered components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for the structure.
    pub id: i64,
    /// The organization owning this template.
    pub organization_id: i64,
    /// Structure name, unique within the organization.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// The basic salary this structure is built on.
    pub basic_salary: Decimal,
    /// Inactive structures are hidden from assignment.
    pub is_active: bool,
    /// The earning/deduction components of this structure.
    pub components: Vec<SalaryComponent>,
    /// When the structure was created.
    pub created_at: DateTime<Utc>,
    /// When the structure was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SalaryStructure {
    /// Creates an active structure with no components.
    pub fn new(
        id: i64,
        organization_id: i64,
        name: impl Into<String>,
        basic_salary: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            name: name.into(),
            description: None,
            basic_salary,
            is_active: true,
            components: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the active components sorted by display order.
    ///
    /// Evaluation order does not change the sums, but a deterministic order
    /// keeps logging and slip rendering stable.
    pub fn components_in_order(&self) -> Vec<&SalaryComponent> {
        let mut components: Vec<&SalaryComponent> =
            self.components.iter().filter(|c| c.is_active).collect();
        components.sort_by_key(|c| c.display_order);
        components
    }

    /// Finds the component that drives leave deductions.
    ///
    /// This is the active deduction component whose name contains "leave"
    /// (case-insensitive), taking the lowest display order when several
    /// match. Name matching is confined to this method so a designated
    /// component flag could replace it without touching the calculators.
    pub fn leave_component(&self) -> Option<&SalaryComponent> {
        self.components_in_order()
            .into_iter()
            .find(|c| c.reduces_net() && c.name.to_lowercase().contains("leave"))
    }

    /// Validates the structure and all of its components.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.basic_salary <= Decimal::ZERO {
            return Err(PayrollError::InvalidComponent {
                name: self.name.clone(),
                message: format!("basic salary {} must be greater than 0", self.basic_salary),
            });
        }
        for component in &self.components {
            component.validate()?;
        }
        Ok(())
    }
}

impl Timestamped for SalaryStructure {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_structure() -> SalaryStructure {
        let mut structure = SalaryStructure::new(1, 10, "Standard", dec("5000"));
        structure.components = vec![
            SalaryComponent::fixed("House Allowance", ComponentType::Earning, dec("1500"), 1),
            SalaryComponent::percentage("PAYE", ComponentType::Deduction, dec("15"), 2),
            SalaryComponent::fixed("Leave Deduction", ComponentType::Deduction, dec("100"), 3),
        ];
        structure
    }

    #[test]
    fn test_fixed_component_ignores_base() {
        let component =
            SalaryComponent::fixed("Transport", ComponentType::Earning, dec("500"), 1);
        assert_eq!(component.value_against(dec("5000")), dec("500"));
        assert_eq!(component.value_against(Decimal::ZERO), dec("500"));
    }

    #[test]
    fn test_percentage_component_scales_with_base() {
        let component = SalaryComponent::percentage("PAYE", ComponentType::Deduction, dec("15"), 1);
        assert_eq!(component.value_against(dec("7300")), dec("1095"));
    }

    #[test]
    fn test_percentage_component_without_percentage_is_zero() {
        let mut component =
            SalaryComponent::percentage("Broken", ComponentType::Deduction, dec("10"), 1);
        component.percentage = None;
        assert_eq!(component.value_against(dec("1000")), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentage() {
        let component =
            SalaryComponent::percentage("PAYE", ComponentType::Deduction, dec("150"), 1);
        assert!(component.validate().is_err());

        let component =
            SalaryComponent::percentage("PAYE", ComponentType::Deduction, Decimal::ZERO, 1);
        assert!(component.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let component =
            SalaryComponent::fixed("Broken", ComponentType::Earning, dec("-10"), 1);
        assert!(component.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let component = SalaryComponent::fixed("  ", ComponentType::Earning, dec("10"), 1);
        assert!(component.validate().is_err());
    }

    #[test]
    fn test_components_in_order_skips_inactive() {
        let mut structure = standard_structure();
        structure.components[0].is_active = false;

        let names: Vec<&str> = structure
            .components_in_order()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["PAYE", "Leave Deduction"]);
    }

    #[test]
    fn test_components_in_order_sorts_by_display_order() {
        let mut structure = standard_structure();
        structure.components[0].display_order = 9;

        let names: Vec<&str> = structure
            .components_in_order()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["PAYE", "Leave Deduction", "House Allowance"]);
    }

    #[test]
    fn test_leave_component_matches_case_insensitively() {
        let structure = standard_structure();
        let component = structure.leave_component().unwrap();
        assert_eq!(component.name, "Leave Deduction");
    }

    #[test]
    fn test_leave_component_ignores_earnings() {
        let mut structure = standard_structure();
        structure.components = vec![SalaryComponent::fixed(
            "Leave Travel Allowance",
            ComponentType::Earning,
            dec("200"),
            1,
        )];
        assert!(structure.leave_component().is_none());
    }

    #[test]
    fn test_structure_validate_rejects_non_positive_basic() {
        let structure = SalaryStructure::new(1, 10, "Zero", Decimal::ZERO);
        assert!(structure.validate().is_err());
    }

    #[test]
    fn test_component_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ComponentType::Earning).unwrap(),
            "\"earning\""
        );
        assert_eq!(
            serde_json::to_string(&ComponentType::Deduction).unwrap(),
            "\"deduction\""
        );
        assert_eq!(serde_json::to_string(&ComponentType::Tax).unwrap(), "\"tax\"");
    }

    #[test]
    fn test_structure_serialization_round_trip() {
        let structure = standard_structure();
        let json = serde_json::to_string(&structure).unwrap();
        let deserialized: SalaryStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(structure, deserialized);
    }
}
