//! Rectangular channel reach and flow-regime classification.

use crate::error::{ChannelError, ChannelResult};
use hy_core::units::Length;
use serde::{Deserialize, Serialize};

/// One prismatic rectangular reach: width, Strickler roughness and bed
/// inclination. Immutable per solve call.
#[derive(Debug, Clone, Copy)]
pub struct RectChannel {
    /// Channel bottom width
    pub width: Length,
    /// Strickler roughness coefficient kSt [m^(1/3)/s]
    pub strickler: f64,
    /// Bed inclination [-], downhill positive
    pub slope: f64,
}

impl RectChannel {
    /// Create a reach, rejecting non-positive width, roughness or slope.
    pub fn new(width: Length, strickler: f64, slope: f64) -> ChannelResult<Self> {
        if width.value <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "channel width must be positive",
            });
        }
        if strickler <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "Strickler coefficient must be positive",
            });
        }
        if slope <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "bed inclination must be positive",
            });
        }
        Ok(Self {
            width,
            strickler,
            slope,
        })
    }
}

/// Flow regime of a reach, from comparing normal depth to critical depth.
///
/// Equality is its own branch: the profile algorithms must never reach a
/// Bresse evaluation with depth ratio 1 through a float comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelRegime {
    /// Normal depth above critical depth (streaming flow)
    Subcritical,
    /// Normal depth below critical depth (shooting flow)
    Supercritical,
    /// Normal depth equal to critical depth
    Critical,
}

/// Classify a reach from its normal and critical depth.
pub fn classify(normal_depth: f64, critical_depth: f64) -> ChannelRegime {
    if normal_depth == critical_depth {
        ChannelRegime::Critical
    } else if normal_depth > critical_depth {
        ChannelRegime::Subcritical
    } else {
        ChannelRegime::Supercritical
    }
}
