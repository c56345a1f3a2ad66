//! Tax configuration types.
//!
//! A tax configuration is an organization's rule set for one financial year:
//! a flat fallback rate, exemption thresholds, and (optionally) an ordered
//! set of progressive tax slabs. The engine applies whichever configuration
//! is active; it never encodes the rule values of any jurisdiction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::Timestamped;

/// One income band of a progressive tax configuration.
///
/// Slab bounds are half-open: a slab owns incomes in `[from_amount,
/// to_amount)`, so adjacent slabs may share an endpoint without
/// double-counting the boundary value, which belongs to the higher slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the band (inclusive).
    pub from_amount: Decimal,
    /// Upper bound of the band (exclusive).
    pub to_amount: Decimal,
    /// Tax rate for income inside the band, as a percentage.
    pub tax_rate: Decimal,
    /// Position of the slab in configuration listings.
    pub display_order: u32,
    /// Inactive slabs are skipped during calculation.
    pub is_active: bool,
}

impl TaxSlab {
    /// Creates an active slab.
    pub fn new(from_amount: Decimal, to_amount: Decimal, tax_rate: Decimal, display_order: u32) -> Self {
        Self {
            from_amount,
            to_amount,
            tax_rate,
            display_order,
            is_active: true,
        }
    }

    /// Returns true if the slab's band contains the income (half-open).
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.from_amount && income < self.to_amount
    }

    /// Validates the slab's range and rate at configuration-write time.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.from_amount > self.to_amount {
            return Err(PayrollError::InvalidSlabRange {
                from: self.from_amount,
                to: self.to_amount,
            });
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::from(100) {
            return Err(PayrollError::InvalidTaxRate {
                rate: self.tax_rate,
            });
        }
        Ok(())
    }
}

/// An organization's tax rule set for one financial year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfiguration {
    /// Unique identifier for the configuration.
    pub id: i64,
    /// The organization this rule set applies to.
    pub organization_id: i64,
    /// Configuration name (e.g., "Zambia PAYE 2025").
    pub name: String,
    /// The financial year this configuration covers.
    pub financial_year: i32,
    /// Country code the rules were written for.
    pub country: String,
    /// Optional state or province.
    pub region: Option<String>,
    /// Flat fallback rate, as a percentage.
    pub standard_tax_rate: Decimal,
    /// Income below this floor is not taxed at all.
    pub minimum_taxable_income: Decimal,
    /// Exemption subtracted per payroll period before taxing.
    pub monthly_tax_exemption: Decimal,
    /// Whether to apply the progressive slabs instead of the flat rate.
    pub use_progressive_tax: bool,
    /// Whether this configuration is eligible for selection.
    pub is_active: bool,
    /// Progressive tax slabs.
    pub slabs: Vec<TaxSlab>,
    /// When the configuration was created.
    pub created_at: DateTime<Utc>,
    /// When the configuration was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TaxConfiguration {
    /// Creates an active progressive configuration with no slabs and a 15%
    /// flat fallback.
    pub fn new(id: i64, organization_id: i64, name: impl Into<String>, financial_year: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            name: name.into(),
            financial_year,
            country: String::new(),
            region: None,
            standard_tax_rate: Decimal::from(15),
            minimum_taxable_income: Decimal::ZERO,
            monthly_tax_exemption: Decimal::ZERO,
            use_progressive_tax: true,
            is_active: true,
            slabs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the active slabs in ascending income order.
    pub fn active_slabs(&self) -> Vec<&TaxSlab> {
        let mut slabs: Vec<&TaxSlab> = self.slabs.iter().filter(|s| s.is_active).collect();
        slabs.sort_by(|a, b| a.from_amount.cmp(&b.from_amount));
        slabs
    }

    /// Validates the configuration's rates and slabs.
    ///
    /// Beyond per-slab checks, active slabs must not overlap. Because bands
    /// are half-open, adjacent slabs sharing an endpoint are accepted.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.standard_tax_rate < Decimal::ZERO || self.standard_tax_rate > Decimal::from(100) {
            return Err(PayrollError::InvalidTaxRate {
                rate: self.standard_tax_rate,
            });
        }
        for slab in &self.slabs {
            slab.validate()?;
        }

        let slabs = self.active_slabs();
        for pair in slabs.windows(2) {
            if pair[1].from_amount < pair[0].to_amount {
                return Err(PayrollError::OverlappingSlabs {
                    from: pair[1].from_amount,
                    to: pair[1].to_amount,
                });
            }
        }
        Ok(())
    }
}

impl Timestamped for TaxConfiguration {
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn two_band_config() -> TaxConfiguration {
        let mut config = TaxConfiguration::new(1, 10, "Test Rules", 2025);
        config.slabs = vec![
            TaxSlab::new(dec("0"), dec("50000"), dec("10"), 1),
            TaxSlab::new(dec("50000"), dec("100000"), dec("15"), 2),
        ];
        config
    }

    #[test]
    fn test_slab_contains_is_half_open() {
        let slab = TaxSlab::new(dec("0"), dec("50000"), dec("10"), 1);
        assert!(slab.contains(dec("0")));
        assert!(slab.contains(dec("49999.99")));
        assert!(!slab.contains(dec("50000")));
    }

    #[test]
    fn test_slab_validate_rejects_inverted_range() {
        let slab = TaxSlab::new(dec("50000"), dec("1000"), dec("10"), 1);
        assert!(matches!(
            slab.validate(),
            Err(PayrollError::InvalidSlabRange { .. })
        ));
    }

    #[test]
    fn test_slab_validate_rejects_out_of_range_rate() {
        let slab = TaxSlab::new(dec("0"), dec("50000"), dec("101"), 1);
        assert!(matches!(
            slab.validate(),
            Err(PayrollError::InvalidTaxRate { .. })
        ));

        let slab = TaxSlab::new(dec("0"), dec("50000"), dec("-1"), 1);
        assert!(slab.validate().is_err());
    }

    #[test]
    fn test_adjacent_slabs_sharing_endpoint_are_valid() {
        assert!(two_band_config().validate().is_ok());
    }

    #[test]
    fn test_overlapping_slabs_rejected() {
        let mut config = two_band_config();
        config.slabs[1].from_amount = dec("40000");
        assert!(matches!(
            config.validate(),
            Err(PayrollError::OverlappingSlabs { .. })
        ));
    }

    #[test]
    fn test_inactive_slabs_do_not_count_as_overlap() {
        let mut config = two_band_config();
        config.slabs[1].from_amount = dec("40000");
        config.slabs[1].is_active = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_active_slabs_sorted_by_lower_bound() {
        let mut config = two_band_config();
        config.slabs.reverse();
        let bounds: Vec<Decimal> = config
            .active_slabs()
            .iter()
            .map(|s| s.from_amount)
            .collect();
        assert_eq!(bounds, vec![dec("0"), dec("50000")]);
    }

    #[test]
    fn test_configuration_validate_rejects_bad_standard_rate() {
        let mut config = two_band_config();
        config.standard_tax_rate = dec("120");
        assert!(config.validate().is_err());
    }
}
