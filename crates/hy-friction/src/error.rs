//! Error types for friction-factor resolution.

use hy_core::HyError;
use thiserror::Error;

/// Errors that can occur while resolving pipe friction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrictionError {
    /// Re == 2320 exactly: the regime is ambiguous and no single factor
    /// exists. Callers must perturb the operating point or branch
    /// themselves.
    #[error("critical Reynolds number {reynolds}: friction regime is ambiguous")]
    CriticalReynolds { reynolds: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] HyError),
}

pub type FrictionResult<T> = Result<T, FrictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FrictionError::CriticalReynolds { reynolds: 2320.0 };
        assert!(err.to_string().contains("2320"));
    }

    #[test]
    fn core_conversion() {
        let core = HyError::InvalidArg { what: "test" };
        let err: FrictionError = core.into();
        assert!(matches!(err, FrictionError::Core(_)));
    }
}
