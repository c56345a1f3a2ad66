//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TaxConfiguration;
use crate::engine::{BenefitSource, DetailInputs, LeaveSource, compute_detail, validate_day_counts};
use crate::error::PayrollResult;
use crate::models::{
    BenefitEnrollment, BenefitPlan, LeaveRequest, PayrollPeriod, SalaryStructure,
};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Leave and benefit data carried inline in the request body.
struct RequestSources {
    leave: Vec<LeaveRequest>,
    benefits: Vec<(BenefitEnrollment, BenefitPlan)>,
}

impl LeaveSource for RequestSources {
    fn approved_leave(
        &self,
        _employee_id: i64,
        _period: &PayrollPeriod,
    ) -> PayrollResult<Vec<LeaveRequest>> {
        Ok(self.leave.clone())
    }
}

impl BenefitSource for RequestSources {
    fn active_enrollments(
        &self,
        _employee_id: i64,
        _reference_date: NaiveDate,
    ) -> PayrollResult<Vec<(BenefitEnrollment, BenefitPlan)>> {
        Ok(self.benefits.clone())
    }
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns one employee's computed
/// payroll amounts with the full earnings, deduction, and tax breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match perform_calculation(&state, request, correlation_id) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = response.employee_id,
                gross_salary = %response.gross_salary,
                net_salary = %response.net_salary,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(api_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %api_error.error.message,
                "Calculation rejected"
            );
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Validates the request and runs the detail computation.
fn perform_calculation(
    state: &AppState,
    request: CalculationRequest,
    correlation_id: Uuid,
) -> Result<CalculationResponse, ApiErrorResponse> {
    let period = PayrollPeriod::new(request.period.start_date, request.period.end_date)
        .map_err(ApiErrorResponse::from)?;

    validate_day_counts(request.working_days, request.days_worked)
        .map_err(ApiErrorResponse::from)?;

    let structure: SalaryStructure = request.structure.into();
    structure.validate().map_err(ApiErrorResponse::from)?;

    // Inline tax rules win over the server's active configuration
    let tax_configuration: Option<TaxConfiguration> = match request.tax_configuration {
        Some(inline) => {
            let configuration = inline.into_configuration();
            configuration.validate().map_err(ApiErrorResponse::from)?;
            Some(configuration)
        }
        None => state.active_tax_configuration().cloned(),
    };

    let employee_id = request.employee_id;
    let sources = RequestSources {
        leave: request
            .leave_requests
            .into_iter()
            .map(|entry| entry.into_leave_request(employee_id))
            .collect(),
        benefits: request
            .benefit_enrollments
            .into_iter()
            .map(|entry| entry.into_enrollment(employee_id))
            .collect(),
    };

    let inputs = DetailInputs {
        employee_id,
        period: &period,
        structure: &structure,
        override_basic_salary: request.override_basic_salary,
        tax_configuration: tax_configuration.as_ref(),
        periods_in_run: 1,
        working_days: request.working_days,
        days_worked: request.days_worked,
    };
    let computed = compute_detail(&inputs, &sources, &sources);

    if !computed.degradations.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            degraded = computed.degradations.len(),
            "Calculation degraded deduction sources"
        );
    }

    Ok(CalculationResponse::from_computation(
        employee_id,
        period,
        computed,
    ))
}
