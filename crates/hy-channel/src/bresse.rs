//! Bresse/Ruehlmann backwater-curve distance function.

use crate::error::{ChannelError, ChannelResult};
use crate::section::RectChannel;

/// Ruehlmann auxiliary function
/// `F(y) = 1/6 ln((y^2+y+1)/(y-1)^2) + 1/sqrt(3) atan((1+2y)/sqrt(3))`.
///
/// Singular at y = 1; callers approaching the normal depth step off the
/// boundary (0.99/1.01 factors) before evaluating.
pub fn ruehlmann_f(y: f64) -> ChannelResult<f64> {
    if y == 1.0 {
        return Err(ChannelError::SingularDepthRatio);
    }
    let num = y * y + y + 1.0;
    let den = (y - 1.0) * (y - 1.0);
    Ok((num / den).ln() / 6.0 + (1.0 + 2.0 * y).atan2(3.0f64.sqrt()) / 3.0f64.sqrt())
}

impl RectChannel {
    /// Distance from the reference water level to the given depth along
    /// the backwater curve, per Ruehlmann:
    /// `hn/i * (y0 - y + (1 - (hcr/hn)^3) * (F(y) - F(y0)))`
    /// with y = depth/hn and y0 = reference_depth/hn.
    pub fn backwater_distance(
        &self,
        depth: f64,
        normal_depth: f64,
        reference_depth: f64,
        critical_depth: f64,
    ) -> ChannelResult<f64> {
        if normal_depth <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "normal depth must be positive",
            });
        }
        let y = depth / normal_depth;
        let y0 = reference_depth / normal_depth;
        let hr = critical_depth / normal_depth;
        Ok(self.slope.recip()
            * normal_depth
            * (y0 - y + (1.0 - hr * hr * hr) * (ruehlmann_f(y)? - ruehlmann_f(y0)?)))
    }
}
