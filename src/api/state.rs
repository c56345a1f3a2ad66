//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{TaxConfigLoader, TaxConfiguration};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers, such as
/// the loaded tax configurations.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tax rule sets.
    tax: Arc<TaxConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given tax configuration
    /// loader.
    pub fn new(tax: TaxConfigLoader) -> Self {
        Self { tax: Arc::new(tax) }
    }

    /// Returns the active tax configuration, if any is loaded.
    pub fn active_tax_configuration(&self) -> Option<&TaxConfiguration> {
        self.tax.active()
    }
}
