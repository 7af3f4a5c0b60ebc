//! Error types for pipe-network solving.

use hy_core::HyError;
use hy_friction::FrictionError;
use thiserror::Error;

/// Errors that can occur during pipe-run solves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipeNetError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    /// The converged discharge does not reproduce the imposed head
    /// difference within the residual tolerance.
    #[error("loss sum differs from imposed head by {residual:e} at the converged discharge")]
    ResidualCheck { residual: f64 },

    #[error("Non-physical result for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error(transparent)]
    Friction(#[from] FrictionError),

    #[error(transparent)]
    Core(#[from] HyError),
}

pub type PipeNetResult<T> = Result<T, PipeNetError>;
