//! Stateful orchestration of payroll processing.
//!
//! This module ties the pure calculators together: an in-memory entity store
//! standing in for the storage layer, the payroll detail builder, the run
//! processor driving run lifecycle and aggregation, and the salary slip
//! composer.

mod detail_builder;
mod run_processor;
mod slip_composer;
mod store;

pub use detail_builder::{
    Degradation, DetailComputation, DetailInputs, compute_detail, validate_day_counts,
};
pub use run_processor::PayrollEngine;
pub use slip_composer::compose_slip;
pub use store::{BenefitSource, LeaveSource, PayrollStore};
