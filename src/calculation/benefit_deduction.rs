//! Benefit contribution deduction calculation.
//!
//! Sums the employee-side contributions of every benefit enrollment active
//! on the reference date, honoring per-enrollment overrides.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{BenefitEnrollment, BenefitPlan};

/// One plan's contribution within a benefit deduction.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitLine {
    /// The plan the contribution belongs to.
    pub plan_name: String,
    /// The employee-side contribution collected.
    pub amount: Decimal,
}

/// The result of a benefit deduction calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitDeductionResult {
    /// Total employee-side contributions.
    pub amount: Decimal,
    /// One line per contributing enrollment.
    pub lines: Vec<BenefitLine>,
}

/// Calculates the benefit deduction for one employee on a reference date.
///
/// Each enrollment contributes only when active on the date (enrolled on or
/// before it, not yet terminated, in `Active` status). The contribution is
/// the enrollment's override when set, otherwise the plan's default
/// employee contribution.
pub fn calculate_benefit_deduction(
    enrollments: &[(BenefitEnrollment, BenefitPlan)],
    reference_date: NaiveDate,
) -> BenefitDeductionResult {
    let mut amount = Decimal::ZERO;
    let mut lines = Vec::new();

    for (enrollment, plan) in enrollments {
        if !enrollment.is_active_on(reference_date) {
            continue;
        }
        let contribution = enrollment.contribution(plan);
        amount += contribution;
        lines.push(BenefitLine {
            plan_name: plan.name.clone(),
            amount: contribution,
        });
    }

    BenefitDeductionResult { amount, lines }
}
