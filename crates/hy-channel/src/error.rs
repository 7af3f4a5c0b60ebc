//! Error types for the open-channel solver.

use hy_core::HyError;
use thiserror::Error;

/// Errors that can occur during open-channel solves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    /// The Ruehlmann auxiliary function F(y) has a pole at depth ratio
    /// y = 1 (depth equal to normal depth). Callers step off the
    /// boundary instead of evaluating across it.
    #[error("depth ratio y = 1 is singular in the Ruehlmann auxiliary function")]
    SingularDepthRatio,

    /// The energy-line inclination equals the bed slope; the specific-
    /// energy balance has no finite transition length.
    #[error("energy-line inclination equals bed slope: transition length is unbounded")]
    UnboundedTransition,

    #[error("Non-physical result for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error(transparent)]
    Core(#[from] HyError),
}

pub type ChannelResult<T> = Result<T, ChannelError>;
