//! HTTP API for the payroll calculation engine.
//!
//! This module provides the axum-based API layer: a stateless calculation
//! endpoint over the engine's pure calculators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BenefitEnrollmentEntry, CalculationRequest, ComponentRequest, LeaveRequestEntry,
    PeriodRequest, StructureRequest, TaxConfigurationRequest, TaxSlabRequest,
};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
