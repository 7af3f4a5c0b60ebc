//! Pipe segments and series runs.

use crate::error::{PipeNetError, PipeNetResult};
use hy_core::units::Length;
use hy_geometry::area_circle;

/// One pressurized pipe: geometry, wall roughness and the axis
/// elevations at its entry and exit. Immutable per solve call.
#[derive(Debug, Clone, Copy)]
pub struct PipeSegment {
    /// Pipe length along the axis
    pub length: Length,
    /// Inner diameter
    pub diameter: Length,
    /// Equivalent sand roughness height
    pub roughness: Length,
    /// Axis elevation at the entry [m above datum]
    pub z_in: Length,
    /// Axis elevation at the exit [m above datum]
    pub z_out: Length,
}

impl PipeSegment {
    pub fn new(
        length: Length,
        diameter: Length,
        roughness: Length,
        z_in: Length,
        z_out: Length,
    ) -> PipeNetResult<Self> {
        if length.value <= 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "segment length must be positive",
            });
        }
        if diameter.value <= 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "segment diameter must be positive",
            });
        }
        if roughness.value < 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "roughness height must be non-negative",
            });
        }
        Ok(Self {
            length,
            diameter,
            roughness,
            z_in,
            z_out,
        })
    }

    /// Flow area [m^2].
    pub fn area(&self) -> f64 {
        area_circle(self.diameter.value)
    }
}

/// Ordered series of segments sharing one discharge, with a single
/// entry-loss coefficient at the upstream end.
#[derive(Debug, Clone)]
pub struct PipeRun {
    pub segments: Vec<PipeSegment>,
    /// Entry loss coefficient zeta [-]
    pub entry_loss: f64,
}

impl PipeRun {
    pub fn new(segments: Vec<PipeSegment>, entry_loss: f64) -> PipeNetResult<Self> {
        if segments.is_empty() {
            return Err(PipeNetError::InvalidInput {
                what: "a pipe run needs at least one segment",
            });
        }
        if entry_loss < 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "entry loss coefficient must be non-negative",
            });
        }
        Ok(Self {
            segments,
            entry_loss,
        })
    }

    /// Area of the first segment, where the entry loss acts [m^2].
    pub fn entry_area(&self) -> f64 {
        self.segments[0].area()
    }

    /// Area of the last segment, carrying the exit velocity head [m^2].
    pub fn exit_area(&self) -> f64 {
        self.segments[self.segments.len() - 1].area()
    }

    /// Total axis length [m].
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hy_core::units::m;

    fn seg(l: f64, d: f64) -> PipeSegment {
        PipeSegment::new(m(l), m(d), m(0.0003), m(10.0), m(5.0)).unwrap()
    }

    #[test]
    fn segment_validates() {
        assert!(PipeSegment::new(m(0.0), m(0.7), m(0.0003), m(0.0), m(0.0)).is_err());
        assert!(PipeSegment::new(m(2.0), m(-0.1), m(0.0003), m(0.0), m(0.0)).is_err());
        assert!(PipeSegment::new(m(2.0), m(0.05), m(-1e-4), m(0.0), m(0.0)).is_err());
    }

    #[test]
    fn run_needs_segments() {
        assert!(PipeRun::new(vec![], 0.5).is_err());
        assert!(PipeRun::new(vec![seg(2.0, 0.05)], -0.1).is_err());
        let run = PipeRun::new(vec![seg(280.0, 0.7), seg(150.0, 0.7)], 0.5).unwrap();
        assert_eq!(run.total_length(), 430.0);
        assert!((run.entry_area() - run.exit_area()).abs() < 1e-12);
    }
}
