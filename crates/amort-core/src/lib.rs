pub mod amortization;
pub mod error;
pub mod rate_solver;
pub mod schedule;
pub mod types;

pub use error::AmortError;
pub use types::*;

/// Standard result type for all amort operations
pub type AmortResult<T> = Result<T, AmortError>;
