use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_core::amortization::{self, LoanParameters};
use mortgage_core::report;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(input_json: &str) -> NapiResult<LoanParameters> {
    LoanParameters::from_json(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = amortization::analyze_mortgage(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let result = amortization::compute(&params).map_err(to_napi_error)?;
    serde_json::to_string(&report::summary_entries(&result.summary)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn payment_split_series(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let result = amortization::compute(&params).map_err(to_napi_error)?;
    serde_json::to_string(&report::payment_split_series(&result.rows)).map_err(to_napi_error)
}

#[napi]
pub fn loan_narrative(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let result = amortization::compute(&params).map_err(to_napi_error)?;
    Ok(report::narrative(&result.summary))
}
