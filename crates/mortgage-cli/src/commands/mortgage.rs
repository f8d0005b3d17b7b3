use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

use mortgage_core::amortization::{self, LoanParameters};
use mortgage_core::report;
use mortgage_core::{percent_to_fraction, with_metadata};

use crate::export;
use crate::input;

/// Loan inputs shared by every mortgage subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML loan parameters (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Local-currency value of one price-index unit (e.g. 37895.28)
    #[arg(long)]
    pub unit_price: Option<Decimal>,

    /// Property price in price-index units (e.g. 3500)
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Annual interest rate in percent (4.5 for 4.5%)
    #[arg(long, default_value = "4.5")]
    pub annual_rate: Decimal,

    /// Loan term in years (standard offerings: 20, 25, 30)
    #[arg(long, default_value = "20")]
    pub term_years: u32,

    /// Down payment in percent of the adjusted property value
    #[arg(long, default_value = "10")]
    pub down_payment_pct: Decimal,

    /// Subsidy uplift on the property value, in percent
    #[arg(long, default_value = "10")]
    pub subsidy_pct: Decimal,
}

/// Arguments for spreadsheet export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination .xlsx file
    #[arg(long, default_value = "mortgage_summary.xlsx")]
    pub path: PathBuf,
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = amortization::analyze_mortgage(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let output = amortization::analyze_mortgage(&params)?;

    let mut entries = Map::new();
    for entry in report::summary_entries(&output.result.summary) {
        entries.insert(entry.label, serde_json::to_value(entry.value)?);
    }

    let summary = with_metadata(
        &output.methodology,
        &params,
        output.warnings,
        output.metadata.computation_time_us,
        Value::Object(entries),
    );
    Ok(serde_json::to_value(summary)?)
}

/// Narrative text, carried as a bare JSON string for the output layer.
pub fn run_narrative(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = amortization::compute(&params)?;
    Ok(Value::String(report::narrative(&result.summary)))
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.loan)?;
    let result = amortization::compute(&params)?;

    export::save_workbook(&result, &args.path)?;
    log::info!("wrote {} rows to {}", result.rows.len(), args.path.display());

    Ok(json!({
        "path": args.path.display().to_string(),
        "sheets": [export::SUMMARY_SHEET, export::SCHEDULE_SHEET],
        "rows": result.rows.len(),
        "monthly_payment": result.summary.monthly_payment,
    }))
}

/// Input file, then piped stdin, then individual flags.
fn resolve_params(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let params = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(params) = input::stdin::read_stdin()? {
        params
    } else {
        params_from_flags(args)?
    };
    log::debug!("loan parameters: {:?}", params);
    Ok(params)
}

/// Build parameters from flags; percentages become fractions here.
fn params_from_flags(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    Ok(LoanParameters {
        unit_price: args
            .unit_price
            .ok_or("--unit-price is required (or provide --input)")?,
        property_value_units: args
            .property_value
            .ok_or("--property-value is required (or provide --input)")?,
        annual_interest_rate_percent: args.annual_rate,
        term_years: args.term_years,
        down_payment_fraction: percent_to_fraction(args.down_payment_pct),
        subsidy_fraction: percent_to_fraction(args.subsidy_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct LoanCli {
        #[command(flatten)]
        loan: LoanArgs,
    }

    fn parse(flags: &[&str]) -> LoanArgs {
        let argv = std::iter::once("mortgage").chain(flags.iter().copied());
        LoanCli::try_parse_from(argv).unwrap().loan
    }

    #[test]
    fn test_percent_flags_become_fractions() {
        let args = parse(&[
            "--unit-price",
            "37895.28",
            "--property-value",
            "3500",
            "--down-payment-pct",
            "10",
            "--subsidy-pct",
            "10",
        ]);
        let params = params_from_flags(&args).unwrap();
        assert_eq!(params.down_payment_fraction, dec!(0.10));
        assert_eq!(params.subsidy_fraction, dec!(0.10));
        assert_eq!(params.unit_price, dec!(37895.28));
        assert_eq!(params.property_value_units, dec!(3500));
    }

    #[test]
    fn test_flag_defaults() {
        let args = parse(&["--unit-price", "1", "--property-value", "100000"]);
        let params = params_from_flags(&args).unwrap();
        assert_eq!(params.annual_interest_rate_percent, dec!(4.5));
        assert_eq!(params.term_years, 20);
        assert_eq!(params.down_payment_fraction, dec!(0.1));
        assert_eq!(params.subsidy_fraction, dec!(0.1));
    }

    #[test]
    fn test_missing_unit_price() {
        let args = parse(&["--property-value", "3500"]);
        let err = params_from_flags(&args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--unit-price is required (or provide --input)"
        );
    }

    #[test]
    fn test_full_down_payment_flag_is_accepted() {
        let args = parse(&[
            "--unit-price",
            "37895.28",
            "--property-value",
            "3500",
            "--down-payment-pct",
            "100",
        ]);
        let params = params_from_flags(&args).unwrap();
        let result = amortization::compute(&params).unwrap();
        assert!(result.summary.principal.is_zero());
    }
}
