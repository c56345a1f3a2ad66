//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint, with explicit conversions into the domain models.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{TaxConfiguration, TaxSlab};
use crate::models::{
    BenefitEnrollment, BenefitPlan, ComponentType, LeaveRequest, LeaveStatus, SalaryComponent,
    SalaryStructure,
};

/// Request body for the `/calculate` endpoint.
///
/// Carries everything needed to compute one employee's payroll detail for a
/// period: the salary structure, attendance day counts, leave history,
/// benefit enrollments, and optionally an inline tax configuration. When no
/// tax configuration is supplied the server's active rule set applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee the calculation is for.
    pub employee_id: i64,
    /// The payroll period.
    pub period: PeriodRequest,
    /// The employee's salary structure.
    pub structure: StructureRequest,
    /// Basic-salary override from the employee's assignment.
    #[serde(default)]
    pub override_basic_salary: Option<Decimal>,
    /// Working days in the period, for proration.
    #[serde(default)]
    pub working_days: Option<u32>,
    /// Days actually worked, for proration.
    #[serde(default)]
    pub days_worked: Option<u32>,
    /// Leave requests overlapping the period.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequestEntry>,
    /// The employee's benefit enrollments.
    #[serde(default)]
    pub benefit_enrollments: Vec<BenefitEnrollmentEntry>,
    /// Inline tax rules; the server's active configuration when absent.
    #[serde(default)]
    pub tax_configuration: Option<TaxConfigurationRequest>,
}

/// Payroll period in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Salary structure in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRequest {
    /// Structure name, for logging and slips.
    #[serde(default)]
    pub name: Option<String>,
    /// The basic salary.
    pub basic_salary: Decimal,
    /// The structure's components.
    #[serde(default)]
    pub components: Vec<ComponentRequest>,
}

/// One salary component in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRequest {
    /// Component name.
    pub name: String,
    /// Whether the component earns, deducts, or taxes.
    pub component_type: ComponentType,
    /// Fixed amount, for non-percentage components.
    #[serde(default)]
    pub amount: Decimal,
    /// Percentage of the base, for percentage components.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Selects between the fixed amount and the percentage.
    #[serde(default)]
    pub is_percentage_based: bool,
    /// Whether the component counts toward taxable income.
    #[serde(default)]
    pub is_taxable: bool,
    /// Position in evaluation and rendering.
    pub display_order: u32,
}

/// One leave request in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestEntry {
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Approval state; only approved requests count.
    #[serde(default = "default_leave_status")]
    pub status: LeaveStatus,
}

/// One benefit enrollment in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitEnrollmentEntry {
    /// The plan's name.
    pub plan_name: String,
    /// The plan's default employee contribution.
    pub employee_contribution: Decimal,
    /// Per-enrollment override of the contribution.
    #[serde(default)]
    pub employee_contribution_override: Option<Decimal>,
    /// The date enrollment took effect.
    pub enrolled_date: NaiveDate,
    /// The date enrollment ended, if any.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

/// Inline tax rules in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfigurationRequest {
    /// Flat fallback rate, as a percentage.
    #[serde(default = "default_standard_rate")]
    pub standard_tax_rate: Decimal,
    /// Income below this floor is not taxed.
    #[serde(default)]
    pub minimum_taxable_income: Decimal,
    /// Exemption subtracted per period before taxing.
    #[serde(default)]
    pub monthly_tax_exemption: Decimal,
    /// Whether to apply progressive slabs.
    #[serde(default = "default_true")]
    pub use_progressive_tax: bool,
    /// Progressive tax slabs.
    #[serde(default)]
    pub slabs: Vec<TaxSlabRequest>,
}

/// One tax slab in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSlabRequest {
    /// Lower bound of the band (inclusive).
    pub from_amount: Decimal,
    /// Upper bound of the band (exclusive).
    pub to_amount: Decimal,
    /// Tax rate for the band, as a percentage.
    pub tax_rate: Decimal,
    /// Position in configuration listings.
    pub display_order: u32,
}

fn default_leave_status() -> LeaveStatus {
    LeaveStatus::Approved
}

fn default_standard_rate() -> Decimal {
    Decimal::from(15)
}

fn default_true() -> bool {
    true
}

impl From<ComponentRequest> for SalaryComponent {
    fn from(req: ComponentRequest) -> Self {
        SalaryComponent {
            name: req.name,
            component_type: req.component_type,
            amount: req.amount,
            percentage: req.percentage,
            is_percentage_based: req.is_percentage_based,
            is_taxable: req.is_taxable,
            is_active: true,
            display_order: req.display_order,
        }
    }
}

impl From<StructureRequest> for SalaryStructure {
    fn from(req: StructureRequest) -> Self {
        let mut structure = SalaryStructure::new(
            0,
            0,
            req.name.unwrap_or_else(|| "Inline Structure".to_string()),
            req.basic_salary,
        );
        structure.components = req.components.into_iter().map(Into::into).collect();
        structure
    }
}

impl LeaveRequestEntry {
    /// Converts the entry into a domain leave request for the employee.
    pub fn into_leave_request(self, employee_id: i64) -> LeaveRequest {
        let days = (self.end_date - self.start_date).num_days() + 1;
        LeaveRequest {
            id: 0,
            employee_id,
            leave_type_id: 0,
            start_date: self.start_date,
            end_date: self.end_date,
            days_requested: Decimal::from(days.max(0)),
            status: self.status,
        }
    }
}

impl BenefitEnrollmentEntry {
    /// Converts the entry into a domain enrollment paired with its plan.
    pub fn into_enrollment(self, employee_id: i64) -> (BenefitEnrollment, BenefitPlan) {
        let plan = BenefitPlan::new(0, 0, self.plan_name, self.employee_contribution, Decimal::ZERO);
        let mut enrollment = BenefitEnrollment::new(0, employee_id, 0, self.enrolled_date);
        enrollment.termination_date = self.termination_date;
        enrollment.employee_contribution_override = self.employee_contribution_override;
        (enrollment, plan)
    }
}

impl TaxConfigurationRequest {
    /// Converts the inline rules into a domain tax configuration.
    pub fn into_configuration(self) -> TaxConfiguration {
        let mut configuration = TaxConfiguration::new(0, 0, "Inline Tax Rules", 0);
        configuration.standard_tax_rate = self.standard_tax_rate;
        configuration.minimum_taxable_income = self.minimum_taxable_income;
        configuration.monthly_tax_exemption = self.monthly_tax_exemption;
        configuration.use_progressive_tax = self.use_progressive_tax;
        configuration.slabs = self
            .slabs
            .into_iter()
            .map(|slab| TaxSlab::new(slab.from_amount, slab.to_amount, slab.tax_rate, slab.display_order))
            .collect();
        configuration.created_at = Utc::now();
        configuration.updated_at = configuration.created_at;
        configuration
    }
}
