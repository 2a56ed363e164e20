//! Period-by-period amortization schedule.
//!
//! The calculator front-ends render these rows directly; the engine only
//! guarantees that interest accrues on the running balance and that the
//! final period retires the balance exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::types::{with_metadata, AmortizationResult, ComputationOutput, LoanTerms, Money};
use crate::AmortResult;

/// Rounding residual above which the final period gets a warning.
const RESIDUAL_WARNING_THRESHOLD: Decimal = dec!(0.01);

/// A single period in the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub period: u32,
    pub beginning_balance: Money,
    pub interest: Money,
    pub principal_portion: Money,
    pub ending_balance: Money,
}

/// Full schedule plus the summary totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub periods: Vec<AmortizationPeriod>,
    pub summary: AmortizationResult,
}

/// Build the full amortization schedule for `terms`.
///
/// The final period pays off the remaining balance rather than the level
/// payment, absorbing any accumulated precision residual; a warning is
/// attached when that residual is visible at cent scale.
pub fn build_schedule(terms: &LoanTerms) -> AmortResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = amortization::totals(terms.principal, terms.periodic_rate, terms.periods)?;
    let periodic_payment = summary.periodic_payment;

    let mut rows: Vec<AmortizationPeriod> = Vec::with_capacity(terms.periods as usize);
    let mut balance = terms.principal;

    for period in 1..=terms.periods {
        let beginning_balance = balance;
        let interest = beginning_balance * terms.periodic_rate;

        // Final period retires whatever remains.
        let principal_portion = if period == terms.periods {
            beginning_balance
        } else {
            periodic_payment - interest
        };

        let ending_balance = beginning_balance - principal_portion;

        rows.push(AmortizationPeriod {
            period,
            beginning_balance,
            interest,
            principal_portion,
            ending_balance,
        });

        balance = ending_balance;
    }

    if let Some(last) = rows.last() {
        let residual = (last.principal_portion + last.interest - periodic_payment).abs();
        if residual > RESIDUAL_WARNING_THRESHOLD {
            warnings.push(format!(
                "Final period differs from the level payment by {residual} to retire the balance exactly"
            ));
        }
    }

    let output = ScheduleOutput {
        periods: rows,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortization Schedule — level payment, final-period balance true-up",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "periodic_rate": terms.periodic_rate.to_string(),
            "periods": terms.periods,
        }),
        warnings,
        elapsed,
        output,
    ))
}
