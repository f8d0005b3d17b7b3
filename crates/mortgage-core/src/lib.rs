pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

pub use amortization::{
    analyze_mortgage, compute, AmortizationResult, AmortizationRow, DerivedLoan, LoanParameters,
    LoanSummary,
};
pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
