use thiserror::Error;

pub type HyResult<T> = Result<T, HyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HyError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No convergence for {what} after {iterations} iterations (residual = {residual:e})")]
    NonConvergence {
        what: &'static str,
        iterations: usize,
        residual: f64,
    },
}
