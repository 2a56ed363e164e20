pub mod amortization;
pub mod rate;
