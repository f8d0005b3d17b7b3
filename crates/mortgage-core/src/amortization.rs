//! Fixed-rate mortgage amortization.
//!
//! Converts an index-denominated property price into local currency, applies
//! the down-payment subsidy, finances the remainder at a fixed rate and folds
//! the level monthly payment into a period-by-period schedule of interest,
//! principal and outstanding balance. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value::level_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

/// Longest term accepted; bounds the schedule length.
pub const MAX_TERM_YEARS: u32 = 50;

/// Terms offered by lenders; anything else is computed but flagged.
pub const STANDARD_TERMS_YEARS: [u32; 3] = [20, 25, 30];

/// Highest annual rate accepted, in percent.
const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);

/// Annual rate above which a warning is attached, in percent.
const HIGH_RATE_WARNING_PERCENT: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan parameters as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Local-currency value of one price-index unit.
    pub unit_price: Money,
    /// Property price denominated in price-index units.
    pub property_value_units: Decimal,
    /// Annual interest rate in percent (4.5 = 4.5%).
    pub annual_interest_rate_percent: Decimal,
    /// Loan term in whole years.
    pub term_years: u32,
    /// Share of the adjusted property value paid up front (0.10 = 10%).
    pub down_payment_fraction: Rate,
    /// Proportional uplift applied to the property value before financing.
    pub subsidy_fraction: Rate,
}

impl LoanParameters {
    /// Parse parameters from a JSON document. Malformed JSON is a
    /// `SerializationError`; range checks are left to `validate`.
    pub fn from_json(input: &str) -> MortgageResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Check every constraint, stopping at the first violation.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.unit_price <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "unit_price",
                "Unit price must be positive",
            ));
        }
        if self.property_value_units <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "property_value_units",
                "Property value must be positive",
            ));
        }
        if self.annual_interest_rate_percent < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_interest_rate_percent",
                "Annual interest rate cannot be negative",
            ));
        }
        if self.annual_interest_rate_percent > MAX_ANNUAL_RATE_PERCENT {
            return Err(MortgageError::invalid(
                "annual_interest_rate_percent",
                format!("Annual interest rate must not exceed {MAX_ANNUAL_RATE_PERCENT}%"),
            ));
        }
        if self.term_years == 0 {
            return Err(MortgageError::invalid(
                "term_years",
                "Term must be positive",
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(MortgageError::invalid(
                "term_years",
                format!("Term must not exceed {MAX_TERM_YEARS} years"),
            ));
        }
        if self.down_payment_fraction < Decimal::ZERO || self.down_payment_fraction > Decimal::ONE
        {
            return Err(MortgageError::invalid(
                "down_payment_fraction",
                "Down payment fraction must be between 0 and 1",
            ));
        }
        if self.subsidy_fraction < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "subsidy_fraction",
                "Subsidy fraction cannot be negative",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Loan figures derived once from validated parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedLoan {
    pub property_value_local: Money,
    /// Local value after the subsidy uplift.
    pub adjusted_property_value: Money,
    pub down_payment: Money,
    /// Amount financed.
    pub principal: Money,
    pub monthly_rate: Rate,
    pub term_months: u32,
    /// Level payment, constant for the life of the loan.
    pub monthly_payment: Money,
}

impl DerivedLoan {
    pub fn from_parameters(params: &LoanParameters) -> MortgageResult<Self> {
        params.validate()?;

        let property_value_local = params
            .property_value_units
            .checked_mul(params.unit_price)
            .ok_or_else(|| {
                MortgageError::invalid(
                    "property_value_units",
                    "Property value in local currency exceeds decimal range",
                )
            })?;
        let adjusted_property_value = property_value_local
            .checked_mul(Decimal::ONE + params.subsidy_fraction)
            .ok_or_else(|| {
                MortgageError::invalid(
                    "subsidy_fraction",
                    "Adjusted property value exceeds decimal range",
                )
            })?;

        let down_payment = adjusted_property_value * params.down_payment_fraction;
        let principal = adjusted_property_value * (Decimal::ONE - params.down_payment_fraction);

        let monthly_rate =
            params.annual_interest_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
        let term_months = params.term_years * MONTHS_PER_YEAR;
        let monthly_payment = level_payment(monthly_rate, term_months, principal)?;

        Ok(DerivedLoan {
            property_value_local,
            adjusted_property_value,
            down_payment,
            principal,
            monthly_rate,
            term_months,
            monthly_payment,
        })
    }
}

/// One period of the schedule. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// Aggregate loan figures alongside the restated inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub property_value_units: Decimal,
    pub property_value_local: Money,
    pub adjusted_property_value: Money,
    pub principal: Money,
    pub down_payment: Money,
    pub annual_interest_rate_percent: Decimal,
    pub monthly_payment: Money,
    /// Sum of the payment column.
    pub total_paid: Money,
    /// Sum of the interest column.
    pub total_interest: Money,
    pub term_months: u32,
    pub term_years: u32,
    pub unit_price: Money,
    pub down_payment_fraction: Rate,
    pub subsidy_fraction: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub rows: Vec<AmortizationRow>,
    pub summary: LoanSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full amortization schedule and its summary.
///
/// Fails with `InvalidParameter` before producing any row if a parameter is
/// out of range. Zero rate and full down payment are valid inputs.
pub fn compute(params: &LoanParameters) -> MortgageResult<AmortizationResult> {
    let loan = DerivedLoan::from_parameters(params)?;
    log::debug!(
        "financing {} over {} months at {} per month (payment {})",
        loan.principal,
        loan.term_months,
        loan.monthly_rate,
        loan.monthly_payment
    );

    let rows = build_schedule(&loan);
    let summary = summarize(params, &loan, &rows)?;
    log::debug!(
        "schedule complete: {} rows, closing balance {}",
        rows.len(),
        rows.last().map(|r| r.remaining_balance).unwrap_or_default()
    );

    Ok(AmortizationResult { rows, summary })
}

/// `compute` wrapped in the standard output envelope.
pub fn analyze_mortgage(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();

    let result = compute(params)?;
    let warnings = collect_warnings(params, &result.summary);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity amortization (monthly compounding)",
        params,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn build_schedule(loan: &DerivedLoan) -> Vec<AmortizationRow> {
    let mut rows = Vec::with_capacity(loan.term_months as usize);
    let mut balance = loan.principal;

    for period in 1..=loan.term_months {
        let interest_portion = balance * loan.monthly_rate;
        let principal_portion = loan.monthly_payment - interest_portion;
        balance -= principal_portion;

        rows.push(AmortizationRow {
            period,
            payment: loan.monthly_payment,
            interest_portion,
            principal_portion,
            remaining_balance: balance,
        });
    }

    rows
}

fn summarize(
    params: &LoanParameters,
    loan: &DerivedLoan,
    rows: &[AmortizationRow],
) -> MortgageResult<LoanSummary> {
    let total_paid = column_total(rows.iter().map(|r| r.payment)).ok_or_else(|| {
        MortgageError::invalid("property_value_units", "Total paid exceeds decimal range")
    })?;
    let total_interest = column_total(rows.iter().map(|r| r.interest_portion)).ok_or_else(|| {
        MortgageError::invalid("property_value_units", "Total interest exceeds decimal range")
    })?;

    Ok(LoanSummary {
        property_value_units: params.property_value_units,
        property_value_local: loan.property_value_local,
        adjusted_property_value: loan.adjusted_property_value,
        principal: loan.principal,
        down_payment: loan.down_payment,
        annual_interest_rate_percent: params.annual_interest_rate_percent,
        monthly_payment: loan.monthly_payment,
        total_paid,
        total_interest,
        term_months: loan.term_months,
        term_years: params.term_years,
        unit_price: params.unit_price,
        down_payment_fraction: params.down_payment_fraction,
        subsidy_fraction: params.subsidy_fraction,
    })
}

/// Overflow-checked column sum.
fn column_total(values: impl Iterator<Item = Money>) -> Option<Money> {
    values.fold(Some(Money::ZERO), |acc, x| acc?.checked_add(x))
}

fn collect_warnings(params: &LoanParameters, summary: &LoanSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    if !STANDARD_TERMS_YEARS.contains(&params.term_years) {
        warnings.push(format!(
            "Term of {} years is outside the standard offerings {:?}",
            params.term_years, STANDARD_TERMS_YEARS
        ));
    }
    if params.annual_interest_rate_percent > HIGH_RATE_WARNING_PERCENT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high for a mortgage",
            params.annual_interest_rate_percent
        ));
    }
    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payments are straight-line principal".into());
    }
    if summary.principal.is_zero() {
        warnings.push("Down payment covers the full property value; nothing is financed".into());
    }

    warnings
}
