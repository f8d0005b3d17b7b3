use rust_decimal::Decimal;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// (1 + rate)^n by repeated multiplication; `None` if it leaves the Decimal range.
pub fn compound_factor(rate: Rate, n: u32) -> Option<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor = factor.checked_mul(one_plus_r)?;
    }
    Some(factor)
}

/// Level payment that fully amortizes `principal` over `nper` periods at `rate`
/// per period.
///
/// Uses the annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`. At a zero rate
/// the formula is 0/0, so the payment is the straight-line `P / n` instead.
pub fn level_payment(rate: Rate, nper: u32, principal: Money) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Periodic rate cannot be negative"));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper).ok_or_else(|| {
        MortgageError::invalid("rate", "Compounding factor exceeds decimal range")
    })?;
    let annuity_factor = factor - Decimal::ONE;

    if annuity_factor.is_zero() {
        // Rate so small that (1+r)^n rounds to 1 at 28 digits.
        return Ok(principal / Decimal::from(nper));
    }

    Ok(principal * (rate * factor / annuity_factor))
}

/// Closed-form balance outstanding after `k` level payments.
///
/// `B_k = P(1+r)^k - PMT((1+r)^k - 1)/r`, or `P - PMT*k` at a zero rate.
pub fn remaining_balance(rate: Rate, nper: u32, principal: Money, k: u32) -> MortgageResult<Money> {
    if k > nper {
        return Err(MortgageError::invalid(
            "k",
            format!("Payment count {k} exceeds the {nper} scheduled periods"),
        ));
    }
    let payment = level_payment(rate, nper, principal)?;

    if rate.is_zero() {
        return Ok(principal - payment * Decimal::from(k));
    }

    let factor = compound_factor(rate, k).ok_or_else(|| {
        MortgageError::invalid("rate", "Compounding factor exceeds decimal range")
    })?;
    Ok(principal * factor - payment * (factor - Decimal::ONE) / rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_payment_textbook() {
        // 200k over 30 years at 6% annual: ~1,199.10 per month
        let pmt = level_payment(dec!(0.005), 360, dec!(200_000)).unwrap();
        assert!((pmt - dec!(1199.10)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let pmt = level_payment(Decimal::ZERO, 240, dec!(120_000)).unwrap();
        assert_eq!(pmt, dec!(500));
    }

    #[test]
    fn test_level_payment_zero_principal() {
        let pmt = level_payment(dec!(0.00375), 240, Decimal::ZERO).unwrap();
        assert_eq!(pmt, Decimal::ZERO);
    }

    #[test]
    fn test_level_payment_zero_periods_rejected() {
        let err = level_payment(dec!(0.01), 0, dec!(1000)).unwrap_err();
        assert_eq!(err.field(), Some("nper"));
    }

    #[test]
    fn test_remaining_balance_endpoints() {
        let p = dec!(100_000);
        let start = remaining_balance(dec!(0.004), 120, p, 0).unwrap();
        assert_eq!(start, p);
        let end = remaining_balance(dec!(0.004), 120, p, 120).unwrap();
        assert!(end.abs() < dec!(0.000001), "got {end}");
    }

    #[test]
    fn test_remaining_balance_zero_rate_is_linear() {
        let b = remaining_balance(Decimal::ZERO, 100, dec!(1000), 25).unwrap();
        assert_eq!(b, dec!(750));
    }

    #[test]
    fn test_compound_factor_overflow_is_none() {
        assert!(compound_factor(dec!(1000), 50).is_none());
        assert_eq!(compound_factor(dec!(0.1), 2), Some(dec!(1.21)));
    }
}
