//! Rectangular open-channel cross sections, parameterized by flow depth.

use hy_core::{HyError, HyResult};

/// Flow area of a rectangular section [m^2].
pub fn area(width: f64, depth: f64) -> f64 {
    width * depth
}

/// Wetted perimeter of a rectangular section [m].
///
/// Free surface: the top is not wetted.
pub fn wetted_perimeter(width: f64, depth: f64) -> f64 {
    width + 2.0 * depth
}

/// Hydraulic radius A/U of a rectangular section [m].
pub fn hydraulic_radius(width: f64, depth: f64) -> f64 {
    area(width, depth) / wetted_perimeter(width, depth)
}

/// Hydraulic diameter 4A/U for a closed rectangular profile [m].
pub fn hydraulic_diameter(width: f64, height: f64) -> f64 {
    4.0 * (width * height) / (2.0 * (width + height))
}

/// Validate channel dimensions before a solve.
pub fn check_section(width: f64, depth: f64) -> HyResult<()> {
    if width <= 0.0 {
        return Err(HyError::InvalidArg {
            what: "channel width must be positive",
        });
    }
    if depth <= 0.0 {
        return Err(HyError::InvalidArg {
            what: "flow depth must be positive",
        });
    }
    Ok(())
}
