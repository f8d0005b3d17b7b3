//! Presentation-neutral views of a computed schedule: ordered summary entries,
//! schedule columns, chart series and the narrative text.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationRow, LoanSummary};
use crate::types::{Money, Rate};

/// Schedule headers, in `AmortizationRow` field order.
pub const SCHEDULE_COLUMNS: [&str; 5] = [
    "Month",
    "Monthly Payment",
    "Interest Paid",
    "Principal Paid",
    "Remaining Balance",
];

/// Headers of the two-column summary table.
pub const SUMMARY_COLUMNS: [&str; 2] = ["Description", "Value"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: Decimal,
}

/// Interest and principal paid per period, for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSeries {
    pub periods: Vec<u32>,
    pub interest: Vec<Money>,
    pub principal: Vec<Money>,
}

/// Summary as labelled entries in presentation order.
pub fn summary_entries(summary: &LoanSummary) -> Vec<SummaryEntry> {
    let entry = |label: &str, value: Decimal| SummaryEntry {
        label: label.to_string(),
        value,
    };

    vec![
        entry("Property value (units)", summary.property_value_units),
        entry("Property value (local)", summary.property_value_local),
        entry(
            "Property value with subsidy (local)",
            summary.adjusted_property_value,
        ),
        entry("Loan principal (local)", summary.principal),
        entry("Down payment (local)", summary.down_payment),
        entry(
            "Annual interest rate (%)",
            summary.annual_interest_rate_percent,
        ),
        entry("Monthly payment (local)", summary.monthly_payment),
        entry("Total paid (local)", summary.total_paid),
        entry("Total interest paid (local)", summary.total_interest),
        entry("Loan term (months)", Decimal::from(summary.term_months)),
        entry("Loan term (years)", Decimal::from(summary.term_years)),
        entry("Unit price (local)", summary.unit_price),
        entry("Down payment (%)", as_percent(summary.down_payment_fraction)),
        entry("Subsidy (%)", as_percent(summary.subsidy_fraction)),
    ]
}

/// Cell values of a schedule row, aligned with `SCHEDULE_COLUMNS`.
pub fn row_values(row: &AmortizationRow) -> [Decimal; 5] {
    [
        Decimal::from(row.period),
        row.payment,
        row.interest_portion,
        row.principal_portion,
        row.remaining_balance,
    ]
}

pub fn payment_split_series(rows: &[AmortizationRow]) -> PaymentSeries {
    PaymentSeries {
        periods: rows.iter().map(|r| r.period).collect(),
        interest: rows.iter().map(|r| r.interest_portion).collect(),
        principal: rows.iter().map(|r| r.principal_portion).collect(),
    }
}

/// Human-readable account of the loan, built from named summary fields.
pub fn narrative(summary: &LoanSummary) -> String {
    let mut lines = vec![
        "Mortgage analysis summary:".to_string(),
        String::new(),
        format!(
            "- Initial property value: {} units ({})",
            summary.property_value_units.normalize(),
            format_thousands(summary.property_value_local)
        ),
        format!(
            "- Property value with subsidy: {}",
            format_thousands(summary.adjusted_property_value)
        ),
        format!(
            "- Down payment: {}",
            format_thousands(summary.down_payment)
        ),
        format!(
            "- Loan principal: {}",
            format_thousands(summary.principal)
        ),
        format!(
            "- Annual interest rate: {:.1}%",
            summary.annual_interest_rate_percent
        ),
        format!(
            "- Monthly payment: {}",
            format_thousands(summary.monthly_payment)
        ),
        format!(
            "- Total paid over the life of the loan: {}",
            format_thousands(summary.total_paid)
        ),
        format!(
            "- Total interest paid: {}",
            format_thousands(summary.total_interest)
        ),
        format!(
            "- Loan term: {} months ({} years)",
            summary.term_months, summary.term_years
        ),
        String::new(),
    ];

    lines.push(format!(
        "This analysis applies a {}% down-payment subsidy, which raises the property \
         value and the amount financed accordingly.",
        format_thousands(as_percent(summary.subsidy_fraction))
    ));

    lines.join("\n")
}

/// Round half away from zero to an integer and group digits with commas.
pub fn format_thousands(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn as_percent(fraction: Rate) -> Decimal {
    fraction * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute, LoanParameters};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn standard_summary() -> (Vec<AmortizationRow>, LoanSummary) {
        let result = compute(&LoanParameters {
            unit_price: dec!(37895.28),
            property_value_units: dec!(3500),
            annual_interest_rate_percent: dec!(4.5),
            term_years: 20,
            down_payment_fraction: dec!(0.10),
            subsidy_fraction: dec!(0.10),
        })
        .unwrap();
        (result.rows, result.summary)
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(dec!(0)), "0");
        assert_eq!(format_thousands(dec!(999)), "999");
        assert_eq!(format_thousands(dec!(1000)), "1,000");
        assert_eq!(format_thousands(dec!(132_633_480)), "132,633,480");
        assert_eq!(format_thousands(dec!(14_589_682.8)), "14,589,683");
        assert_eq!(format_thousands(dec!(2.5)), "3");
        assert_eq!(format_thousands(dec!(-1234567.4)), "-1,234,567");
        assert_eq!(format_thousands(dec!(-0.2)), "0");
    }

    #[test]
    fn test_summary_entries_order() {
        let (_, summary) = standard_summary();
        let entries = summary_entries(&summary);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Property value (units)",
                "Property value (local)",
                "Property value with subsidy (local)",
                "Loan principal (local)",
                "Down payment (local)",
                "Annual interest rate (%)",
                "Monthly payment (local)",
                "Total paid (local)",
                "Total interest paid (local)",
                "Loan term (months)",
                "Loan term (years)",
                "Unit price (local)",
                "Down payment (%)",
                "Subsidy (%)",
            ]
        );
        assert_eq!(entries[1].value, dec!(132_633_480));
        assert_eq!(entries[9].value, dec!(240));
        assert_eq!(entries[12].value, dec!(10));
    }

    #[test]
    fn test_row_values_follow_columns() {
        let (rows, _) = standard_summary();
        let values = row_values(&rows[0]);
        assert_eq!(values.len(), SCHEDULE_COLUMNS.len());
        assert_eq!(values[0], dec!(1));
        assert_eq!(values[1], rows[0].payment);
        assert_eq!(values[4], rows[0].remaining_balance);
    }

    #[test]
    fn test_payment_split_series() {
        let (rows, _) = standard_summary();
        let series = payment_split_series(&rows);
        assert_eq!(series.periods.len(), 240);
        assert_eq!(series.periods[0], 1);
        assert_eq!(series.periods[239], 240);
        assert_eq!(series.interest[10], rows[10].interest_portion);
        assert_eq!(series.principal[10], rows[10].principal_portion);
    }

    #[test]
    fn test_narrative_mentions_key_figures() {
        let (_, summary) = standard_summary();
        let text = narrative(&summary);
        assert!(text.contains("3500 units (132,633,480)"), "{text}");
        assert!(text.contains("Property value with subsidy: 145,896,828"));
        assert!(text.contains("Down payment: 14,589,683"));
        assert!(text.contains("Loan principal: 131,307,145"));
        assert!(text.contains("Annual interest rate: 4.5%"));
        assert!(text.contains("Monthly payment: 830,714"));
        assert!(text.contains("Loan term: 240 months (20 years)"));
        assert!(text.contains("applies a 10% down-payment subsidy"));
    }
}
