//! Progressive (slab-based) income tax calculation.
//!
//! This module applies a tax configuration to a taxable income using
//! **marginal-bracket** semantics: each slab taxes only the portion of income
//! that falls inside its own band, and income is allocated to bands in
//! ascending order. Applying a single bracket's rate to the entire income
//! (the average-rate shortcut) is exactly the behavior this module exists to
//! avoid.
//!
//! ## Band boundaries
//!
//! Bands are half-open `[from, to)`: adjacent slabs share an endpoint without
//! double-counting it, and the single-bracket display lookup assigns a
//! boundary value to the higher band. Income above the highest configured
//! band is not taxed by slabs; configurations are expected to define a
//! sufficiently wide top band.

use rust_decimal::Decimal;

use crate::config::TaxConfiguration;

/// One band's share of a progressive tax assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct SlabTaxLine {
    /// Lower bound of the band (inclusive).
    pub from_amount: Decimal,
    /// Upper bound of the band (exclusive).
    pub to_amount: Decimal,
    /// The band's tax rate, as a percentage.
    pub tax_rate: Decimal,
    /// The portion of taxable income that fell inside this band.
    pub taxable_in_band: Decimal,
    /// Tax owed on that portion.
    pub tax: Decimal,
}

/// The result of applying a tax configuration to a gross salary.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxAssessment {
    /// Income remaining after the exemption, floored at zero.
    pub taxable_income: Decimal,
    /// Total tax owed.
    pub tax: Decimal,
    /// Band-by-band breakdown; empty for flat-rate assessments.
    pub bands: Vec<SlabTaxLine>,
}

impl TaxAssessment {
    fn exempt() -> Self {
        Self {
            taxable_income: Decimal::ZERO,
            tax: Decimal::ZERO,
            bands: Vec::new(),
        }
    }
}

/// Calculates income tax for a payroll period.
///
/// The steps, in order:
///
/// 1. Gross salary below the configuration's minimum taxable income owes
///    nothing.
/// 2. The monthly exemption (scaled by `periods_in_run`) is subtracted; a
///    non-positive remainder owes nothing.
/// 3. With progressive taxation enabled and slabs configured, the remainder
///    is walked through the bands in ascending order, each band taxing only
///    the portion inside `[from, to)`.
/// 4. Otherwise the flat standard rate applies to the whole remainder.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_tax;
/// use payroll_engine::config::{TaxConfiguration, TaxSlab};
/// use rust_decimal::Decimal;
///
/// let mut config = TaxConfiguration::new(1, 1, "Example", 2025);
/// config.slabs = vec![
///     TaxSlab::new(Decimal::ZERO, Decimal::from(50000), Decimal::from(10), 1),
///     TaxSlab::new(Decimal::from(50000), Decimal::from(100000), Decimal::from(15), 2),
/// ];
///
/// let assessment = calculate_tax(&config, Decimal::from(70000), 1);
/// // 50000 at 10% + 20000 at 15%
/// assert_eq!(assessment.tax, Decimal::from(8000));
/// ```
pub fn calculate_tax(
    config: &TaxConfiguration,
    gross_salary: Decimal,
    periods_in_run: u32,
) -> TaxAssessment {
    if gross_salary < config.minimum_taxable_income {
        return TaxAssessment::exempt();
    }

    let exemption = config.monthly_tax_exemption * Decimal::from(periods_in_run);
    let taxable_income = gross_salary - exemption;
    if taxable_income <= Decimal::ZERO {
        return TaxAssessment::exempt();
    }

    let slabs = config.active_slabs();
    if config.use_progressive_tax && !slabs.is_empty() {
        let mut bands = Vec::new();
        let mut tax = Decimal::ZERO;

        for slab in slabs {
            let taxable_in_band = if taxable_income >= slab.to_amount {
                slab.to_amount - slab.from_amount
            } else if taxable_income > slab.from_amount {
                taxable_income - slab.from_amount
            } else {
                Decimal::ZERO
            };

            if taxable_in_band > Decimal::ZERO {
                let band_tax = taxable_in_band * slab.tax_rate / Decimal::from(100);
                tax += band_tax;
                bands.push(SlabTaxLine {
                    from_amount: slab.from_amount,
                    to_amount: slab.to_amount,
                    tax_rate: slab.tax_rate,
                    taxable_in_band,
                    tax: band_tax,
                });
            }
        }

        TaxAssessment {
            taxable_income,
            tax,
            bands,
        }
    } else {
        TaxAssessment {
            taxable_income,
            tax: taxable_income * config.standard_tax_rate / Decimal::from(100),
            bands: Vec::new(),
        }
    }
}

/// Returns the single-bracket rate that applies to an income.
///
/// This is a display/estimation lookup, distinct from the marginal
/// calculation in [`calculate_tax`]: it returns the rate of the band
/// containing the income under the half-open boundary policy, falling back
/// to the standard rate when progressive taxation is off, no slabs exist, or
/// the income lies outside every band.
pub fn applicable_rate(config: &TaxConfiguration, income: Decimal) -> Decimal {
    if !config.use_progressive_tax {
        return config.standard_tax_rate;
    }
    config
        .active_slabs()
        .into_iter()
        .find(|slab| slab.contains(income))
        .map(|slab| slab.tax_rate)
        .unwrap_or(config.standard_tax_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxSlab;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn two_band_config() -> TaxConfiguration {
        let mut config = TaxConfiguration::new(1, 1, "Two Bands", 2025);
        config.slabs = vec![
            TaxSlab::new(dec("0"), dec("50000"), dec("10"), 1),
            TaxSlab::new(dec("50000"), dec("100000"), dec("15"), 2),
        ];
        config
    }

    fn paye_config() -> TaxConfiguration {
        let mut config = TaxConfiguration::new(1, 1, "PAYE", 2025);
        config.slabs = vec![
            TaxSlab::new(dec("0"), dec("5100"), dec("0"), 1),
            TaxSlab::new(dec("5100"), dec("7100"), dec("20"), 2),
            TaxSlab::new(dec("7100"), dec("9200"), dec("30"), 3),
            TaxSlab::new(dec("9200"), dec("1000000"), dec("37"), 4),
        ];
        config
    }

    // ==========================================================================
    // Marginal application
    // ==========================================================================

    #[test]
    fn test_income_spanning_two_bands() {
        let assessment = calculate_tax(&two_band_config(), dec("70000"), 1);
        // 50000 at 10% + 20000 at 15% = 5000 + 3000
        assert_eq!(assessment.tax, dec("8000"));
        assert_eq!(assessment.bands.len(), 2);
        assert_eq!(assessment.bands[0].taxable_in_band, dec("50000"));
        assert_eq!(assessment.bands[0].tax, dec("5000"));
        assert_eq!(assessment.bands[1].taxable_in_band, dec("20000"));
        assert_eq!(assessment.bands[1].tax, dec("3000"));
    }

    #[test]
    fn test_income_inside_first_band_only() {
        let assessment = calculate_tax(&two_band_config(), dec("30000"), 1);
        assert_eq!(assessment.tax, dec("3000"));
        assert_eq!(assessment.bands.len(), 1);
    }

    #[test]
    fn test_income_at_shared_boundary_fills_lower_band_exactly() {
        let assessment = calculate_tax(&two_band_config(), dec("50000"), 1);
        // The whole 50000 is taxed in the lower band; the upper band gets
        // nothing because taxable - from is zero.
        assert_eq!(assessment.tax, dec("5000"));
        assert_eq!(assessment.bands.len(), 1);
    }

    #[test]
    fn test_marginal_not_flat_at_band_rate() {
        let assessment = calculate_tax(&two_band_config(), dec("70000"), 1);
        // The average-rate bug would produce 70000 * 15% = 10500.
        assert!(assessment.tax < dec("70000") * dec("15") / dec("100"));
    }

    #[test]
    fn test_zero_rate_band_contributes_no_tax() {
        let assessment = calculate_tax(&paye_config(), dec("6100"), 1);
        // 5100 at 0% + 1000 at 20%
        assert_eq!(assessment.tax, dec("200"));
    }

    #[test]
    fn test_paye_bands_full_walk() {
        let assessment = calculate_tax(&paye_config(), dec("10000"), 1);
        // 0 + 2000*20% + 2100*30% + 800*37% = 400 + 630 + 296
        assert_eq!(assessment.tax, dec("1326"));
        assert_eq!(assessment.bands.len(), 4);
    }

    // ==========================================================================
    // Exemptions and thresholds
    // ==========================================================================

    #[test]
    fn test_income_below_minimum_taxable_owes_nothing() {
        let mut config = two_band_config();
        config.minimum_taxable_income = dec("3000");
        let assessment = calculate_tax(&config, dec("2999"), 1);
        assert_eq!(assessment.tax, Decimal::ZERO);
        assert_eq!(assessment.taxable_income, Decimal::ZERO);
    }

    #[test]
    fn test_exemption_reduces_taxable_income() {
        let mut config = two_band_config();
        config.monthly_tax_exemption = dec("10000");
        let assessment = calculate_tax(&config, dec("60000"), 1);
        assert_eq!(assessment.taxable_income, dec("50000"));
        assert_eq!(assessment.tax, dec("5000"));
    }

    #[test]
    fn test_exemption_scales_with_periods_in_run() {
        let mut config = two_band_config();
        config.monthly_tax_exemption = dec("10000");
        let assessment = calculate_tax(&config, dec("60000"), 3);
        assert_eq!(assessment.taxable_income, dec("30000"));
    }

    #[test]
    fn test_exemption_consuming_everything_owes_nothing() {
        let mut config = two_band_config();
        config.monthly_tax_exemption = dec("80000");
        let assessment = calculate_tax(&config, dec("60000"), 1);
        assert_eq!(assessment.tax, Decimal::ZERO);
    }

    // ==========================================================================
    // Flat fallback
    // ==========================================================================

    #[test]
    fn test_flat_rate_when_progressive_disabled() {
        let mut config = two_band_config();
        config.use_progressive_tax = false;
        let assessment = calculate_tax(&config, dec("70000"), 1);
        // 70000 * 15%
        assert_eq!(assessment.tax, dec("10500"));
        assert!(assessment.bands.is_empty());
    }

    #[test]
    fn test_flat_rate_when_no_slabs_configured() {
        let mut config = two_band_config();
        config.slabs.clear();
        let assessment = calculate_tax(&config, dec("1000"), 1);
        assert_eq!(assessment.tax, dec("150"));
    }

    #[test]
    fn test_inactive_slabs_fall_back_to_flat_rate() {
        let mut config = two_band_config();
        for slab in &mut config.slabs {
            slab.is_active = false;
        }
        let assessment = calculate_tax(&config, dec("1000"), 1);
        assert_eq!(assessment.tax, dec("150"));
    }

    // ==========================================================================
    // Applicable-rate lookup
    // ==========================================================================

    #[test]
    fn test_applicable_rate_finds_band() {
        let config = two_band_config();
        assert_eq!(applicable_rate(&config, dec("30000")), dec("10"));
        assert_eq!(applicable_rate(&config, dec("70000")), dec("15"));
    }

    #[test]
    fn test_applicable_rate_boundary_belongs_to_higher_band() {
        let config = two_band_config();
        assert_eq!(applicable_rate(&config, dec("50000")), dec("15"));
    }

    #[test]
    fn test_applicable_rate_outside_bands_uses_standard() {
        let config = two_band_config();
        assert_eq!(applicable_rate(&config, dec("250000")), dec("15"));
    }

    #[test]
    fn test_applicable_rate_with_progressive_disabled() {
        let mut config = two_band_config();
        config.use_progressive_tax = false;
        assert_eq!(applicable_rate(&config, dec("30000")), dec("15"));
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    proptest! {
        /// Tax is monotonically non-decreasing in income.
        #[test]
        fn prop_tax_monotone_in_income(a in 0u32..200_000, b in 0u32..200_000) {
            let config = paye_config();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let tax_low = calculate_tax(&config, Decimal::from(low), 1).tax;
            let tax_high = calculate_tax(&config, Decimal::from(high), 1).tax;
            prop_assert!(tax_low <= tax_high);
        }

        /// Marginal application keeps tax strictly below the top rate applied
        /// to the whole income, whenever lower-rated bands absorb part of it.
        #[test]
        fn prop_tax_below_flat_top_rate(income in 1u32..900_000) {
            let config = paye_config();
            let assessment = calculate_tax(&config, Decimal::from(income), 1);
            let flat_at_top = Decimal::from(income) * dec("37") / dec("100");
            prop_assert!(assessment.tax < flat_at_top);
        }

        /// The band breakdown always sums to the total.
        #[test]
        fn prop_bands_sum_to_total(income in 0u32..2_000_000) {
            let config = paye_config();
            let assessment = calculate_tax(&config, Decimal::from(income), 1);
            let band_sum: Decimal = assessment.bands.iter().map(|b| b.tax).sum();
            prop_assert_eq!(assessment.tax, band_sum);
        }
    }
}
