//! Fixed-rate amortization engine.
//!
//! The payment formula here is the single source of truth that the
//! calculator front-ends call instead of re-deriving it inline. All math
//! uses `rust_decimal::Decimal`; no clamping of invalid inputs happens
//! inside the engine — callers validate before invoking.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortError;
use crate::types::{AmortizationResult, Money, Rate};
use crate::AmortResult;

/// Fixed periodic payment that amortizes `principal` over `periods` at
/// `periodic_rate` per period.
///
/// A rate of exactly zero is a valid input and degrades to straight-line
/// division of the principal. The result is finite and non-negative for
/// all valid inputs, and `payment × periods ≥ principal` with equality
/// only at rate zero.
pub fn payment(principal: Money, periodic_rate: Rate, periods: u32) -> AmortResult<Money> {
    validate_terms(principal, periodic_rate, periods)?;

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE + periodic_rate;
    let factor = match one_plus_r.checked_powi(periods as i64) {
        Some(f) => f,
        // (1+r)^n exceeds Decimal range. The annuity ratio f/(f-1) has
        // converged to 1 long before that point, so the payment is its
        // limit: pure interest on the principal. Returning the limit
        // keeps the payment curve monotone for the bisection solver.
        None => return Ok(principal * periodic_rate),
    };

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(AmortError::DivisionByZero {
            context: "payment annuity factor".into(),
        });
    }

    // Divide before multiplying by principal so a huge factor cannot
    // overflow the intermediate product.
    let annuity_ratio = factor / denominator;
    Ok(principal * periodic_rate * annuity_ratio)
}

/// Payment plus the derived totals: total paid over the life of the loan
/// and the interest component of it.
pub fn totals(principal: Money, periodic_rate: Rate, periods: u32) -> AmortResult<AmortizationResult> {
    let periodic_payment = payment(principal, periodic_rate, periods)?;
    let total_paid = periodic_payment * Decimal::from(periods);
    let total_interest = total_paid - principal;

    Ok(AmortizationResult {
        periodic_payment,
        total_paid,
        total_interest,
    })
}

/// Convert an annual nominal rate to the per-period rate the engine
/// expects (e.g., 0.06 annual at 12 periods/year → 0.005).
pub fn periodic_from_annual(annual_rate: Rate, periods_per_year: u32) -> AmortResult<Rate> {
    if periods_per_year == 0 {
        return Err(AmortError::InvalidTerm { periods: 0 });
    }
    if annual_rate < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be non-negative".into(),
        });
    }
    Ok(annual_rate / Decimal::from(periods_per_year))
}

/// Inverse of [`periodic_from_annual`]: nominal annualization of a
/// per-period rate.
pub fn annual_from_periodic(periodic_rate: Rate, periods_per_year: u32) -> AmortResult<Rate> {
    if periods_per_year == 0 {
        return Err(AmortError::InvalidTerm { periods: 0 });
    }
    if periodic_rate < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "periodic_rate".into(),
            reason: "Periodic rate must be non-negative".into(),
        });
    }
    Ok(periodic_rate * Decimal::from(periods_per_year))
}

fn validate_terms(principal: Money, periodic_rate: Rate, periods: u32) -> AmortResult<()> {
    if periods == 0 {
        return Err(AmortError::InvalidTerm { periods });
    }
    if principal < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be non-negative".into(),
        });
    }
    if periodic_rate < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "periodic_rate".into(),
            reason: "Periodic rate must be non-negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // 1. Zero rate: straight-line division, exact
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = payment(dec!(12000), Decimal::ZERO, 48).unwrap();
        assert_eq!(result, dec!(250), "12000 over 48 periods at 0% is exactly 250");

        let result = payment(dec!(100), Decimal::ZERO, 3).unwrap();
        // 100/3 is periodic; Decimal carries it to full precision
        assert!((result * dec!(3) - dec!(100)).abs() < dec!(0.0000000000000001));
    }

    // -----------------------------------------------------------------------
    // 2. Benchmark: $100,000 at 0.5%/month over 360 months ≈ $599.55
    // -----------------------------------------------------------------------
    #[test]
    fn test_benchmark_mortgage_payment() {
        let result = payment(dec!(100000), dec!(0.005), 360).unwrap();
        assert!(
            (result - dec!(599.55)).abs() < dec!(0.01),
            "30-year payment at 0.5%/month should be ~599.55, got {}",
            result
        );
    }

    // -----------------------------------------------------------------------
    // 3. Monotonicity: payment strictly increases with rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_payment_monotone_in_rate() {
        let rates = [
            Decimal::ZERO,
            dec!(0.001),
            dec!(0.005),
            dec!(0.01),
            dec!(0.05),
            dec!(0.20),
        ];
        let mut prev = payment(dec!(50000), rates[0], 120).unwrap();
        for rate in &rates[1..] {
            let next = payment(dec!(50000), *rate, 120).unwrap();
            assert!(
                next > prev,
                "Payment at rate {} ({}) should exceed payment at lower rate ({})",
                rate,
                next,
                prev
            );
            prev = next;
        }
    }

    // -----------------------------------------------------------------------
    // 4. Total paid never below principal; equality only at zero rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_total_paid_at_least_principal() {
        let at_zero = payment(dec!(9000), Decimal::ZERO, 36).unwrap();
        assert_eq!(at_zero * dec!(36), dec!(9000));

        let with_interest = payment(dec!(9000), dec!(0.01), 36).unwrap();
        assert!(
            with_interest * dec!(36) > dec!(9000),
            "Any positive rate must cost more than the principal"
        );
    }

    // -----------------------------------------------------------------------
    // 5. Zero principal: free loan, zero payment
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_principal() {
        assert_eq!(payment(Decimal::ZERO, dec!(0.01), 60).unwrap(), Decimal::ZERO);
        assert_eq!(payment(Decimal::ZERO, Decimal::ZERO, 60).unwrap(), Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 6. Single period: one payment of principal plus one period of interest
    // -----------------------------------------------------------------------
    #[test]
    fn test_single_period() {
        let result = payment(dec!(1000), dec!(0.02), 1).unwrap();
        assert_eq!(result, dec!(1020), "Single-period payment is principal × (1+r)");
    }

    // -----------------------------------------------------------------------
    // 7. Extreme rate × long term: payment saturates at principal × rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_extreme_rate_saturates_to_interest_only() {
        // 1.9^360 is far beyond Decimal range; the annuity ratio is 1.
        let result = payment(dec!(100000), dec!(0.9), 360).unwrap();
        assert_eq!(result, dec!(90000));

        // Still monotone against a smaller extreme rate
        let lower = payment(dec!(100000), dec!(0.5), 360).unwrap();
        assert!(result > lower);
    }

    // -----------------------------------------------------------------------
    // 8. Totals consistency
    // -----------------------------------------------------------------------
    #[test]
    fn test_totals_consistency() {
        let out = totals(dec!(100000), dec!(0.005), 360).unwrap();
        assert_eq!(out.total_paid, out.periodic_payment * dec!(360));
        assert_eq!(out.total_interest, out.total_paid - dec!(100000));
        assert!(
            (out.total_paid - dec!(215838.19)).abs() < dec!(1.0),
            "Total paid should be ~215,838, got {}",
            out.total_paid
        );
    }

    // -----------------------------------------------------------------------
    // 9. Totals at zero rate: no interest at all
    // -----------------------------------------------------------------------
    #[test]
    fn test_totals_zero_rate_no_interest() {
        let out = totals(dec!(12000), Decimal::ZERO, 48).unwrap();
        assert_eq!(out.total_paid, dec!(12000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 10. Contract violations are errors, never silently corrected
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_periods_is_invalid_term() {
        let err = payment(dec!(1000), dec!(0.01), 0).unwrap_err();
        match err {
            AmortError::InvalidTerm { periods } => assert_eq!(periods, 0),
            other => panic!("Expected InvalidTerm, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_principal_is_invalid_input() {
        let err = payment(dec!(-1), dec!(0.01), 12).unwrap_err();
        match err {
            AmortError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_is_invalid_input() {
        let err = payment(dec!(1000), dec!(-0.01), 12).unwrap_err();
        match err {
            AmortError::InvalidInput { field, .. } => assert_eq!(field, "periodic_rate"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 11. Rate unit conversion helpers
    // -----------------------------------------------------------------------
    #[test]
    fn test_rate_unit_conversions() {
        assert_eq!(periodic_from_annual(dec!(0.06), 12).unwrap(), dec!(0.005));
        assert_eq!(annual_from_periodic(dec!(0.005), 12).unwrap(), dec!(0.06));

        let err = periodic_from_annual(dec!(0.06), 0).unwrap_err();
        assert!(matches!(err, AmortError::InvalidTerm { periods: 0 }));

        let err = periodic_from_annual(dec!(-0.01), 12).unwrap_err();
        assert!(matches!(err, AmortError::InvalidInput { .. }));
    }
}
