//! Darcy-Weisbach friction factor across the Moody diagram.

use crate::error::{FrictionError, FrictionResult};
use crate::regime::{classify, PipeRegime, WallLaw};
use hy_core::{solve_scalar_equation, RootConfig};
use tracing::trace;

/// Initial guess for the implicit turbulent laws.
const F_GUESS: f64 = 0.01;

/// Resolve the Darcy-Weisbach friction factor for the classified regime.
///
/// Laminar flow uses the closed form 64/Re. Turbulent flow dispatches on
/// the wall law: the smooth-pipe and Colebrook-White forms are implicit
/// and go through the shared scalar solver; the fully rough form is
/// explicit. Re == 2320 exactly is reported as `CriticalReynolds`.
pub fn friction_factor(roughness: f64, diameter: f64, reynolds: f64) -> FrictionResult<f64> {
    friction_factor_with(roughness, diameter, reynolds, &RootConfig::default())
}

/// As [`friction_factor`], with an explicit solver configuration.
pub fn friction_factor_with(
    roughness: f64,
    diameter: f64,
    reynolds: f64,
    config: &RootConfig,
) -> FrictionResult<f64> {
    let regime = classify(reynolds, diameter, roughness)?;
    let factor = match regime {
        PipeRegime::Laminar => 64.0 / reynolds,
        PipeRegime::CriticalReynolds => {
            return Err(FrictionError::CriticalReynolds { reynolds });
        }
        PipeRegime::Turbulent(WallLaw::Smooth) => solve_scalar_equation(
            |f| 2.0 * (reynolds * f.sqrt() / 2.51).log10() * f.sqrt() - 1.0,
            F_GUESS,
            "smooth-pipe friction factor",
            config,
        )?,
        PipeRegime::Turbulent(WallLaw::Transitional) => solve_scalar_equation(
            |f| {
                -2.0 * (2.51 / (reynolds * f.sqrt()) + roughness / (3.71 * diameter)).log10()
                    * f.sqrt()
                    - 1.0
            },
            F_GUESS,
            "Colebrook-White friction factor",
            config,
        )?,
        PipeRegime::Turbulent(WallLaw::Rough) => {
            let x = 2.0 * (3.71 * diameter / roughness).log10();
            1.0 / (x * x)
        }
    };
    trace!(reynolds, ?regime, factor, "friction factor resolved");
    Ok(factor)
}
