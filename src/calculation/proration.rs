//! Proration for partial work periods.
//!
//! Scales a period amount by the fraction of the period actually worked.

use rust_decimal::Decimal;

/// Prorates an amount by `days_worked / working_days`.
///
/// Proration only applies when both counts are present and `working_days`
/// is positive; otherwise the amount passes through untouched. The ratio is
/// applied as a single multiply-then-divide on `Decimal`, with no
/// intermediate rounding, so proration of gross and net cannot drift apart.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::prorate;
/// use rust_decimal::Decimal;
///
/// let salary = Decimal::from(7300);
/// assert_eq!(prorate(salary, Some(11), Some(22)), Decimal::from(3650));
/// assert_eq!(prorate(salary, Some(22), Some(22)), salary);
/// assert_eq!(prorate(salary, None, Some(22)), salary);
/// ```
pub fn prorate(amount: Decimal, days_worked: Option<u32>, working_days: Option<u32>) -> Decimal {
    match (days_worked, working_days) {
        (Some(worked), Some(total)) if total > 0 => {
            amount * Decimal::from(worked) / Decimal::from(total)
        }
        _ => amount,
    }
}
