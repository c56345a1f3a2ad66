//! Response types for the payroll engine API.
//!
//! This module defines the calculation response and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::DetailComputation;
use crate::error::PayrollError;
use crate::models::{PayrollPeriod, SlipLine};

/// The complete result of a payroll calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee_id: i64,
    /// The payroll period calculated.
    pub period: PayrollPeriod,
    /// The basic salary the evaluation was based on (unprorated).
    pub basic_salary: Decimal,
    /// Gross salary for the period, prorated when day counts were supplied.
    pub gross_salary: Decimal,
    /// Earning component lines.
    pub earnings: Vec<SlipLine>,
    /// Approved leave days overlapping the period.
    pub leave_days: Decimal,
    /// Leave-driven deduction.
    pub leave_deduction: Decimal,
    /// Benefit contribution deduction.
    pub benefit_deduction: Decimal,
    /// Per-plan benefit contributions.
    pub benefit_lines: Vec<BenefitLineResponse>,
    /// Income tax summary.
    pub tax: TaxSummaryResponse,
    /// Leave + benefits + tax.
    pub total_deductions: Decimal,
    /// Net payable, floored at zero.
    pub net_salary: Decimal,
}

/// One plan's contribution in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitLineResponse {
    /// The contributing plan.
    pub plan_name: String,
    /// The employee-side contribution.
    pub amount: Decimal,
}

/// Income tax summary in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSummaryResponse {
    /// Income remaining after exemptions.
    pub taxable_income: Decimal,
    /// Total tax owed.
    pub tax: Decimal,
    /// Band-by-band breakdown; empty for flat-rate assessments.
    pub bands: Vec<TaxBandResponse>,
}

/// One band of a progressive assessment in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBandResponse {
    /// Lower bound of the band (inclusive).
    pub from_amount: Decimal,
    /// Upper bound of the band (exclusive).
    pub to_amount: Decimal,
    /// The band's rate, as a percentage.
    pub tax_rate: Decimal,
    /// The income taxed inside this band.
    pub taxable_in_band: Decimal,
    /// Tax owed on that income.
    pub tax: Decimal,
}

impl CalculationResponse {
    /// Builds the response from a detail computation.
    pub fn from_computation(
        employee_id: i64,
        period: PayrollPeriod,
        computed: DetailComputation,
    ) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id,
            period,
            basic_salary: computed.basic_salary,
            gross_salary: computed.gross_salary,
            earnings: computed.earnings,
            leave_days: computed.leave.leave_days,
            leave_deduction: computed.leave.amount,
            benefit_deduction: computed.benefits.amount,
            benefit_lines: computed
                .benefits
                .lines
                .into_iter()
                .map(|line| BenefitLineResponse {
                    plan_name: line.plan_name,
                    amount: line.amount,
                })
                .collect(),
            tax: TaxSummaryResponse {
                taxable_income: computed.tax.taxable_income,
                tax: computed.tax.tax,
                bands: computed
                    .tax
                    .bands
                    .into_iter()
                    .map(|band| TaxBandResponse {
                        from_amount: band.from_amount,
                        to_amount: band.to_amount,
                        tax_rate: band.tax_rate,
                        taxable_in_band: band.taxable_in_band,
                        tax: band.tax,
                    })
                    .collect(),
            },
            total_deductions: computed.total_deductions,
            net_salary: computed.net_salary,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        use PayrollError::*;

        let (status, code) = match &error {
            ConfigNotFound { .. } | ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EmployeeNotFound { .. }
            | StructureNotFound { .. }
            | AssignmentNotFound { .. }
            | RunNotFound { .. }
            | DetailNotFound { .. }
            | SlipNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            NoActiveSalary { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "NO_ACTIVE_SALARY"),
            StructureInUse { .. }
            | DuplicateDetail { .. }
            | DuplicateSlip { .. }
            | EmptyRun { .. }
            | InvalidRunStatus { .. }
            | InvalidSlipStatus { .. }
            | OverlappingRun { .. } => (StatusCode::CONFLICT, "STATE_VIOLATION"),
            InvalidPeriod { .. }
            | InvalidComponent { .. }
            | InvalidAssignment { .. }
            | InvalidSlabRange { .. }
            | InvalidTaxRate { .. }
            | OverlappingSlabs { .. }
            | InvalidDayCount { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            SourceUnavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "SOURCE_UNAVAILABLE"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
