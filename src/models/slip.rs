//! Salary slip models.
//!
//! A slip expands one finalized payroll detail back into the individual named
//! components of its salary structure, for rendering a payslip document. The
//! composer is read-only with respect to the engine's calculations.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ComponentType, Timestamped};

/// The lifecycle state of a salary slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlipStatus {
    /// Freshly composed from a payroll detail.
    Generated,
    /// Approved for distribution.
    Approved,
    /// Delivered to the employee.
    Sent,
    /// Salary credited; the slip records the credited date.
    Paid,
}

impl fmt::Display for SlipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlipStatus::Generated => "Generated",
            SlipStatus::Approved => "Approved",
            SlipStatus::Sent => "Sent",
            SlipStatus::Paid => "Paid",
        };
        f.write_str(name)
    }
}

/// One named component line on a salary slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipLine {
    /// Component name carried over from the structure.
    pub name: String,
    /// Whether the line earns, deducts, or taxes.
    pub component_type: ComponentType,
    /// The evaluated (and possibly prorated) amount.
    pub amount: Decimal,
    /// Position of the line on the rendered slip.
    pub display_order: u32,
}

/// A generated salary slip for one employee in one payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySlip {
    /// Unique identifier for the slip.
    pub id: i64,
    /// The payroll detail the slip was composed from.
    pub detail_id: i64,
    /// The employee the slip is for.
    pub employee_id: i64,
    /// Reference number (e.g., "SS-3-42-20250131").
    pub slip_number: String,
    /// Human-readable period label (e.g., "January 2025").
    pub period_label: String,
    /// Gross salary carried over from the detail.
    pub gross_salary: Decimal,
    /// Total deductions carried over from the detail.
    pub total_deductions: Decimal,
    /// Income tax carried over from the detail.
    pub income_tax: Decimal,
    /// Net payable carried over from the detail.
    pub net_payable: Decimal,
    /// The date salary was credited, once paid.
    pub credited_date: Option<NaiveDate>,
    /// Current lifecycle state.
    pub status: SlipStatus,
    /// Component breakdown in display order.
    pub lines: Vec<SlipLine>,
    /// When the slip was composed.
    pub created_at: DateTime<Utc>,
    /// When the slip was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Timestamped for SalarySlip {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
