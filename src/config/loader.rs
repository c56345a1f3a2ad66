//! Tax configuration loading functionality.
//!
//! This module provides the [`TaxConfigLoader`] type for loading tax rule
//! sets from a directory of YAML files, one file per financial year.

use std::fs;
use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{PayrollError, PayrollResult};

use super::types::{TaxConfiguration, TaxSlab};

/// Loads and provides access to tax configurations.
///
/// The loader reads every YAML file in a directory, validates the parsed
/// rule sets, and exposes the active configuration (latest financial year
/// wins, matching how stored configurations are selected).
///
/// # Directory Structure
///
/// ```text
/// config/tax/
/// ├── zm_2024.yaml   # Rules for financial year 2024
/// └── zm_2025.yaml   # Rules for financial year 2025
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::TaxConfigLoader;
///
/// let loader = TaxConfigLoader::load("./config/tax").unwrap();
/// let active = loader.active().expect("no active tax configuration");
/// println!("Applying {} ({})", active.name, active.financial_year);
/// ```
#[derive(Debug, Clone)]
pub struct TaxConfigLoader {
    configurations: Vec<TaxConfiguration>,
}

/// On-disk shape of one tax rule file.
#[derive(Debug, Deserialize)]
struct TaxConfigFile {
    configuration_name: String,
    financial_year: i32,
    country: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    organization_id: i64,
    standard_tax_rate: Decimal,
    #[serde(default)]
    minimum_taxable_income: Decimal,
    #[serde(default)]
    monthly_tax_exemption: Decimal,
    #[serde(default = "default_true")]
    use_progressive_tax: bool,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    slabs: Vec<TaxSlabFile>,
}

/// On-disk shape of one tax slab.
#[derive(Debug, Deserialize)]
struct TaxSlabFile {
    from_amount: Decimal,
    to_amount: Decimal,
    tax_rate: Decimal,
    display_order: u32,
    #[serde(default = "default_true")]
    is_active: bool,
}

fn default_true() -> bool {
    true
}

impl TaxConfigFile {
    /// Explicit conversion into the domain configuration.
    fn into_configuration(self, id: i64) -> TaxConfiguration {
        let now = Utc::now();
        TaxConfiguration {
            id,
            organization_id: self.organization_id,
            name: self.configuration_name,
            financial_year: self.financial_year,
            country: self.country,
            region: self.region,
            standard_tax_rate: self.standard_tax_rate,
            minimum_taxable_income: self.minimum_taxable_income,
            monthly_tax_exemption: self.monthly_tax_exemption,
            use_progressive_tax: self.use_progressive_tax,
            is_active: self.is_active,
            slabs: self
                .slabs
                .into_iter()
                .map(|slab| TaxSlab {
                    from_amount: slab.from_amount,
                    to_amount: slab.to_amount,
                    tax_rate: slab.tax_rate,
                    display_order: slab.display_order,
                    is_active: slab.is_active,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TaxConfigLoader {
    /// Loads every YAML rule file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/tax")
    ///
    /// # Returns
    ///
    /// Returns a `TaxConfigLoader` on success, or an error if:
    /// - The directory does not exist or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Any parsed configuration fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(PayrollError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| PayrollError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut configurations = Vec::new();
        let mut next_id: i64 = 1;

        for entry in entries {
            let entry = entry.map_err(|_| PayrollError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                let file = Self::load_yaml(&file_path)?;
                let configuration = file.into_configuration(next_id);
                configuration.validate()?;
                configurations.push(configuration);
                next_id += 1;
            }
        }

        if configurations.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: format!("{} (no tax rule files found)", dir_str),
            });
        }

        configurations.sort_by(|a, b| b.financial_year.cmp(&a.financial_year));

        Ok(Self { configurations })
    }

    /// Loads and parses one YAML rule file.
    fn load_yaml(path: &Path) -> PayrollResult<TaxConfigFile> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns every loaded configuration, newest financial year first.
    pub fn configurations(&self) -> &[TaxConfiguration] {
        &self.configurations
    }

    /// Returns the active configuration: the active rule set with the latest
    /// financial year, breaking ties by most recent update.
    pub fn active(&self) -> Option<&TaxConfiguration> {
        self.configurations
            .iter()
            .filter(|c| c.is_active)
            .max_by_key(|c| (c.financial_year, c.updated_at))
    }
}
