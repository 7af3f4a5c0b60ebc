//! Loss-head formulary: Reynolds number, local losses, distributed pipe
//! friction via Darcy-Weisbach.

use crate::error::FrictionResult;
use crate::factor::friction_factor_with;
use hy_core::units::constants::{G0_MPS2, NU_WATER_M2PS};
use hy_core::RootConfig;

/// Reynolds number for water from velocity and a characteristic diameter.
pub fn reynolds_number(velocity: f64, diameter: f64) -> f64 {
    velocity.abs() * diameter / NU_WATER_M2PS
}

/// Local loss head zeta/(2 g A^2) * Q^2 [m].
pub fn local_loss_head(coefficient: f64, area: f64, discharge: f64) -> f64 {
    coefficient / (2.0 * G0_MPS2 * area * area) * discharge * discharge
}

/// Distributed friction loss head of one pipe, f * (L/D) / (2 g A^2) * Q^2 [m].
///
/// Composes the Reynolds number and the Moody friction factor at the
/// given discharge. A standing water column (Q = 0) loses nothing and
/// short-circuits before any regime classification.
pub fn pipe_loss_head(
    length: f64,
    area: f64,
    roughness: f64,
    diameter: f64,
    discharge: f64,
) -> FrictionResult<f64> {
    pipe_loss_head_with(length, area, roughness, diameter, discharge, &RootConfig::default())
}

/// As [`pipe_loss_head`], with an explicit solver configuration.
pub fn pipe_loss_head_with(
    length: f64,
    area: f64,
    roughness: f64,
    diameter: f64,
    discharge: f64,
    config: &RootConfig,
) -> FrictionResult<f64> {
    if discharge == 0.0 {
        return Ok(0.0);
    }
    let velocity = discharge / area;
    let re = reynolds_number(velocity, diameter);
    let f = friction_factor_with(roughness, diameter, re, config)?;
    Ok(f * length / diameter / (2.0 * G0_MPS2 * area * area) * discharge * discharge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hy_geometry::area_circle;

    #[test]
    fn reynolds_uses_water_viscosity() {
        let re = reynolds_number(0.5, 1.5);
        assert!((re - 0.5 * 1.5 / NU_WATER_M2PS).abs() < 1e-6);
        // direction does not matter
        assert_eq!(re, reynolds_number(-0.5, 1.5));
    }

    #[test]
    fn local_loss_quadratic_in_discharge() {
        let a = area_circle(0.05);
        let l1 = local_loss_head(0.5, a, 0.001);
        let l2 = local_loss_head(0.5, a, 0.002);
        assert!((l2 / l1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn zero_discharge_zero_loss() {
        let a = area_circle(0.05);
        assert_eq!(pipe_loss_head(2.0, a, 0.0003, 0.05, 0.0).unwrap(), 0.0);
        assert_eq!(local_loss_head(0.5, a, 0.0), 0.0);
    }

    #[test]
    fn pipe_loss_grows_with_length() {
        let a = area_circle(0.7);
        let short = pipe_loss_head(150.0, a, 0.0003, 0.7, 1.2).unwrap();
        let long = pipe_loss_head(350.0, a, 0.0003, 0.7, 1.2).unwrap();
        assert!(long > short);
        assert!((long / short - 350.0 / 150.0).abs() < 1e-9);
    }

    #[test]
    fn pipe_loss_sign_independent() {
        let a = area_circle(0.05);
        let fwd = pipe_loss_head(2.0, a, 0.0003, 0.05, 0.003).unwrap();
        let rev = pipe_loss_head(2.0, a, 0.0003, 0.05, -0.003).unwrap();
        assert!((fwd - rev).abs() < 1e-12);
    }
}
