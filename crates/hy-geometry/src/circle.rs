//! Circular pipe cross sections.

use hy_core::{HyError, HyResult};
use std::f64::consts::PI;

/// Flow area of a full circular pipe from its diameter [m^2].
pub fn area_circle(diameter: f64) -> f64 {
    PI * diameter * diameter / 4.0
}

/// Validate a pipe diameter before a solve.
pub fn check_diameter(diameter: f64) -> HyResult<()> {
    if diameter <= 0.0 {
        return Err(HyError::InvalidArg {
            what: "pipe diameter must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_circle() {
        assert!((area_circle(1.0) - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn dn700() {
        // 70 cm penstock
        let a = area_circle(0.7);
        assert!((a - 0.384_845).abs() < 1e-5);
    }

    #[test]
    fn rejects_nonpositive() {
        assert!(check_diameter(0.0).is_err());
        assert!(check_diameter(0.05).is_ok());
    }
}
