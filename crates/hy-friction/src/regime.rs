//! Pipe-flow regime classification for the Moody diagram.
//!
//! Classification is separate from the numeric factor resolution so that
//! branch selection stays a single testable function.

use crate::error::{FrictionError, FrictionResult};

/// Laminar/turbulent threshold. Exact; Re == 2320 is its own regime.
pub const RE_CRITICAL: f64 = 2320.0;

/// Relative-roughness bound below which the wall is fully rough (d/k < 100).
pub const RATIO_ROUGH: f64 = 100.0;

/// Relative-roughness bound above which the pipe behaves hydraulically
/// smooth (d/k > 300 000).
pub const RATIO_SMOOTH: f64 = 300_000.0;

/// Turbulent wall behavior, selected by the ratio diameter/roughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallLaw {
    /// d/k > 300 000: Prandtl smooth-pipe law (implicit)
    Smooth,
    /// 100 <= d/k <= 300 000: Colebrook-White (implicit)
    Transitional,
    /// d/k < 100: fully rough wall (explicit)
    Rough,
}

/// Flow regime tag driving the friction-factor branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeRegime {
    /// Re < 2320: factor is the closed form 64/Re
    Laminar,
    /// Re == 2320 exactly: ambiguous, reported rather than resolved
    CriticalReynolds,
    Turbulent(WallLaw),
}

/// Classify the flow regime from Reynolds number and relative roughness.
pub fn classify(reynolds: f64, diameter: f64, roughness: f64) -> FrictionResult<PipeRegime> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(FrictionError::InvalidArg {
            what: "Reynolds number must be positive and finite",
        });
    }
    if diameter <= 0.0 {
        return Err(FrictionError::InvalidArg {
            what: "pipe diameter must be positive",
        });
    }
    if roughness < 0.0 {
        return Err(FrictionError::InvalidArg {
            what: "roughness height must be non-negative",
        });
    }

    if reynolds < RE_CRITICAL {
        return Ok(PipeRegime::Laminar);
    }
    if reynolds == RE_CRITICAL {
        return Ok(PipeRegime::CriticalReynolds);
    }

    // Zero roughness: ratio is unbounded, the wall is smooth
    let law = if roughness == 0.0 {
        WallLaw::Smooth
    } else {
        let ratio = diameter / roughness;
        if ratio > RATIO_SMOOTH {
            WallLaw::Smooth
        } else if ratio < RATIO_ROUGH {
            WallLaw::Rough
        } else {
            WallLaw::Transitional
        }
    };
    Ok(PipeRegime::Turbulent(law))
}
