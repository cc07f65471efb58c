pub mod amortization;
pub mod eligibility;
pub mod error;
pub mod portfolio;
pub mod schedule;
pub mod simulator;
pub mod types;

pub use error::LoanEngineError;
pub use types::*;

/// Standard result type for all loan-engine operations
pub type LoanEngineResult<T> = Result<T, LoanEngineError>;
