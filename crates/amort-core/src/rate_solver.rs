//! Implied periodic rate solver.
//!
//! Inverts the amortization payment formula by bisection: payment is
//! strictly increasing in the rate for fixed principal and term, so a
//! bracketing interval always narrows onto the implied rate. The search
//! runs against a fixed evaluation budget, which makes the runtime
//! bounded and predictable for keystroke-driven recalculation loops.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization;
use crate::error::AmortError;
use crate::types::{Money, Rate, RateSolveRequest, RateSolveResult};
use crate::AmortResult;

/// Find the periodic rate at which the amortizing payment on
/// `request.principal` over `request.periods` matches
/// `request.known_payment`.
///
/// Never hangs and never errors on well-formed-but-unsolvable inputs:
/// an infeasible or unconverged search returns its best estimate with
/// `converged == false` so callers can surface "payment too low" (or
/// similar) themselves.
pub fn solve_rate(request: &RateSolveRequest) -> AmortResult<RateSolveResult> {
    validate_request(request)?;

    let principal = request.principal;
    let periods = request.periods;
    bisect(request, |rate| amortization::payment(principal, rate, periods))
}

/// Bisection core, generic over the payment evaluation so tests can
/// substitute a counting double. The total number of `payment_at` calls
/// is capped at `request.max_iterations`, counting the feasibility probe.
fn bisect<F>(request: &RateSolveRequest, mut payment_at: F) -> AmortResult<RateSolveResult>
where
    F: FnMut(Rate) -> AmortResult<Money>,
{
    let known_payment = request.known_payment;
    let tolerance = request.tolerance;

    let mut evaluations = 0u32;

    // Cheapest payment the bracket can produce. If even the minimum
    // exceeds the target, the payment is too low to ever amortize the
    // loan at a non-negative rate — terminal case, not an error.
    let floor_payment = payment_at(request.lower_bound)?;
    evaluations += 1;

    if floor_payment > known_payment {
        return Ok(RateSolveResult {
            periodic_rate: request.lower_bound,
            iterations_used: 0,
            converged: false,
        });
    }

    let mut low = request.lower_bound;
    let mut high = request.upper_bound;
    let mut iterations_used = 0u32;
    let mut converged = false;
    let mut estimate = (low + high) / dec!(2);

    while evaluations < request.max_iterations {
        let mid = (low + high) / dec!(2);
        let candidate = payment_at(mid)?;
        evaluations += 1;
        iterations_used += 1;

        if (candidate - known_payment).abs() <= tolerance {
            estimate = mid;
            converged = true;
            break;
        }

        if candidate > known_payment {
            high = mid; // rate too high
        } else {
            low = mid; // rate too low
        }

        estimate = (low + high) / dec!(2);

        if high - low <= tolerance {
            converged = true;
            break;
        }
    }

    Ok(RateSolveResult {
        periodic_rate: estimate,
        iterations_used,
        converged,
    })
}

fn validate_request(request: &RateSolveRequest) -> AmortResult<()> {
    if request.periods == 0 {
        return Err(AmortError::InvalidTerm {
            periods: request.periods,
        });
    }
    if request.principal <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if request.known_payment <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "known_payment".into(),
            reason: "Known payment must be positive".into(),
        });
    }
    if request.lower_bound < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "lower_bound".into(),
            reason: "Lower bound must be non-negative".into(),
        });
    }
    if request.upper_bound <= request.lower_bound {
        return Err(AmortError::InvalidInput {
            field: "upper_bound".into(),
            reason: "Upper bound must exceed lower bound".into(),
        });
    }
    if request.max_iterations == 0 {
        return Err(AmortError::InvalidInput {
            field: "max_iterations".into(),
            reason: "Iteration budget must be at least 1".into(),
        });
    }
    if request.tolerance <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "tolerance".into(),
            reason: "Tolerance must be positive".into(),
        });
    }
    Ok(())
}
