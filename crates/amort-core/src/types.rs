use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals per period (0.005 = 0.5%). Never as percentages.
pub type Rate = Decimal;

/// Default lower bracket bound for the implied-rate search.
pub const DEFAULT_LOWER_BOUND: Rate = Decimal::ZERO;

/// Default upper bracket bound: 100% per period. Wide enough that no
/// realistic consumer or commercial rate falls outside the bracket.
pub const DEFAULT_RATE_CEILING: Rate = dec!(1.0);

/// Default evaluation budget for the bisection search.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Default convergence tolerance on bracket width and payment residual.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.0000001);

/// One fixed-rate amortizing obligation. Immutable value, constructed
/// fresh per calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Interest rate per payment period (annual rate / periods per year).
    pub periodic_rate: Rate,
    pub periods: u32,
}

/// Derived payment totals for an amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub periodic_payment: Money,
    /// periodic_payment × periods.
    pub total_paid: Money,
    /// total_paid − principal.
    pub total_interest: Money,
}

/// Search problem for the implied periodic rate behind a known payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSolveRequest {
    pub principal: Money,
    pub known_payment: Money,
    pub periods: u32,
    #[serde(default = "default_lower_bound")]
    pub lower_bound: Rate,
    #[serde(default = "default_upper_bound")]
    pub upper_bound: Rate,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
}

impl RateSolveRequest {
    /// Build a request with the default bracket, iteration budget, and
    /// tolerance.
    pub fn new(principal: Money, known_payment: Money, periods: u32) -> Self {
        RateSolveRequest {
            principal,
            known_payment,
            periods,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_RATE_CEILING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

fn default_lower_bound() -> Rate {
    DEFAULT_LOWER_BOUND
}

fn default_upper_bound() -> Rate {
    DEFAULT_RATE_CEILING
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

/// Outcome of an implied-rate search. `converged == false` is a warning,
/// not an error: the best bracket estimate is still returned so an
/// interactive caller degrades gracefully instead of failing the
/// recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSolveResult {
    pub periodic_rate: Rate,
    /// Bisection rounds actually performed (early exit on convergence).
    pub iterations_used: u32,
    pub converged: bool,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
