use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amort_core::rate_solver;
use amort_core::types::RateSolveRequest;

use crate::input;

/// Arguments for the implied-rate solver
#[derive(Args)]
pub struct SolveRateArgs {
    /// Path to JSON input file with a full solve request (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Known fixed periodic payment
    #[arg(long, alias = "known-payment")]
    pub payment: Option<Decimal>,

    /// Number of payment periods
    #[arg(long)]
    pub periods: Option<u32>,

    /// Lower bracket bound for the periodic rate
    #[arg(long)]
    pub lower_bound: Option<Decimal>,

    /// Upper bracket bound for the periodic rate
    #[arg(long)]
    pub upper_bound: Option<Decimal>,

    /// Evaluation budget for the bisection search
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Convergence tolerance on bracket width and payment residual
    #[arg(long)]
    pub tolerance: Option<Decimal>,
}

pub fn run_solve_rate(args: SolveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: RateSolveRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let payment = args
            .payment
            .ok_or("--payment is required (or provide --input)")?;
        let periods = args
            .periods
            .ok_or("--periods is required (or provide --input)")?;

        let mut request = RateSolveRequest::new(principal, payment, periods);
        if let Some(low) = args.lower_bound {
            request.lower_bound = low;
        }
        if let Some(high) = args.upper_bound {
            request.upper_bound = high;
        }
        if let Some(budget) = args.max_iterations {
            request.max_iterations = budget;
        }
        if let Some(tol) = args.tolerance {
            request.tolerance = tol;
        }
        request
    };

    let result = rate_solver::solve_rate(&request)?;
    Ok(serde_json::to_value(&result)?)
}
