use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amort_core::amortization;
use amort_core::schedule;
use amort_core::types::LoanTerms;

use crate::input;

/// Arguments for the fixed payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Periodic rate as a decimal (e.g. 0.005 for 0.5% per period)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Annual nominal rate, converted using --periods-per-year
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Payment periods per year, used with --annual-rate
    #[arg(long, default_value = "12")]
    pub periods_per_year: u32,

    /// Number of payment periods
    #[arg(long)]
    pub periods: u32,
}

/// Arguments for payment totals
#[derive(Args)]
pub struct TotalsArgs {
    #[command(flatten)]
    pub payment: PaymentArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file with loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Periodic rate as a decimal
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Annual nominal rate, converted using --periods-per-year
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Payment periods per year, used with --annual-rate
    #[arg(long, default_value = "12")]
    pub periods_per_year: u32,

    /// Number of payment periods
    #[arg(long)]
    pub periods: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = resolve_periodic_rate(args.rate, args.annual_rate, args.periods_per_year)?;
    let payment = amortization::payment(args.principal, rate, args.periods)?;
    Ok(serde_json::json!({ "periodic_payment": payment }))
}

pub fn run_totals(args: TotalsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = resolve_periodic_rate(
        args.payment.rate,
        args.payment.annual_rate,
        args.payment.periods_per_year,
    )?;
    let totals = amortization::totals(args.payment.principal, rate, args.payment.periods)?;
    Ok(serde_json::to_value(&totals)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let periods = args
            .periods
            .ok_or("--periods is required (or provide --input)")?;
        let periodic_rate = resolve_periodic_rate(args.rate, args.annual_rate, args.periods_per_year)?;
        LoanTerms {
            principal,
            periodic_rate,
            periods,
        }
    };

    let output = schedule::build_schedule(&terms)?;
    Ok(serde_json::to_value(&output)?)
}

/// Either --rate is the periodic rate already, or --annual-rate gets
/// divided by --periods-per-year. Exactly what the widget layer does
/// before calling the engine.
fn resolve_periodic_rate(
    rate: Option<Decimal>,
    annual_rate: Option<Decimal>,
    periods_per_year: u32,
) -> Result<Decimal, Box<dyn std::error::Error>> {
    match (rate, annual_rate) {
        (Some(r), _) => Ok(r),
        (None, Some(annual)) => Ok(amortization::periodic_from_annual(annual, periods_per_year)?),
        (None, None) => Err("--rate or --annual-rate is required".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolve_periodic_rate_prefers_explicit_rate() {
        let rate = resolve_periodic_rate(Some(dec!(0.005)), Some(dec!(0.12)), 12).unwrap();
        assert_eq!(rate, dec!(0.005));
    }

    #[test]
    fn test_resolve_periodic_rate_converts_annual() {
        let rate = resolve_periodic_rate(None, Some(dec!(0.06)), 12).unwrap();
        assert_eq!(rate, dec!(0.005));
    }

    #[test]
    fn test_resolve_periodic_rate_requires_one() {
        assert!(resolve_periodic_rate(None, None, 12).is_err());
    }

    #[test]
    fn test_run_payment_outputs_named_field() {
        let args = PaymentArgs {
            principal: dec!(100000),
            rate: Some(dec!(0.005)),
            annual_rate: None,
            periods_per_year: 12,
            periods: 360,
        };
        let value = run_payment(args).unwrap();
        let payment: Decimal = serde_json::from_value(value["periodic_payment"].clone()).unwrap();
        assert!((payment - dec!(599.55)).abs() < dec!(0.01));
    }
}
