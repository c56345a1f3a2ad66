//! Tax configuration for payroll calculation.
//!
//! This module contains the strongly-typed tax rule set applied by the
//! progressive tax calculator, and a loader for YAML rule files.

mod loader;
mod types;

pub use loader::TaxConfigLoader;
pub use types::{TaxConfiguration, TaxSlab};
