use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn payment(input_json: String) -> NapiResult<String> {
    let terms: amort_core::types::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment =
        amort_core::amortization::payment(terms.principal, terms.periodic_rate, terms.periods)
            .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "periodic_payment": payment }))
        .map_err(to_napi_error)
}

#[napi]
pub fn loan_totals(input_json: String) -> NapiResult<String> {
    let terms: amort_core::types::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amort_core::amortization::totals(terms.principal, terms.periodic_rate, terms.periods)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let terms: amort_core::types::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amort_core::schedule::build_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Implied rate
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_rate(input_json: String) -> NapiResult<String> {
    let request: amort_core::types::RateSolveRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amort_core::rate_solver::solve_rate(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
