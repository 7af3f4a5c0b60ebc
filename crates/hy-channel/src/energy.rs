//! Energy-line balances: mean friction slope, transition length, and
//! station-to-station depth marching.

use crate::error::{ChannelError, ChannelResult};
use crate::section::RectChannel;
use hy_core::units::constants::G0_MPS2;
use hy_core::units::VolumeRate;
use hy_core::{solve_scalar_equation, RootConfig};
use tracing::trace;

/// Marching direction for depth propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// March against the flow; the starting depth is the control at the
    /// last position.
    Upstream,
    /// March with the flow; the starting depth is the control at the
    /// first position.
    Downstream,
}

impl RectChannel {
    /// Energy-line inclination between two depths, from the arithmetic
    /// mean area and wetted perimeter:
    /// `Ir = (Q / (Am * kSt * Rm^(2/3)))^2`.
    pub fn friction_slope_mean(&self, discharge: VolumeRate, depth1: f64, depth2: f64) -> f64 {
        let w = self.width.value;
        let a_m = w * (depth1 + depth2) / 2.0;
        let u_m = w + depth1 + depth2;
        let r_m = a_m / u_m;
        let denom = a_m * self.strickler * r_m.powf(2.0 / 3.0);
        (discharge.value / denom).powi(2)
    }

    /// Along-channel distance over which the specific-energy balance
    /// closes between `depth1` and `depth2`, using the mean energy-line
    /// inclination: `(E(depth2) - E(depth1)) / (i - Ir)`.
    pub fn transition_length(
        &self,
        discharge: VolumeRate,
        depth1: f64,
        depth2: f64,
    ) -> ChannelResult<f64> {
        if depth1 <= 0.0 || depth2 <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "transition depths must be positive",
            });
        }
        let w = self.width.value;
        let q = discharge.value;
        let i_r = self.friction_slope_mean(discharge, depth1, depth2);
        if self.slope == i_r {
            return Err(ChannelError::UnboundedTransition);
        }
        let v1 = q / (w * depth1);
        let v2 = q / (w * depth2);
        let e1 = depth1 + v1 * v1 / (2.0 * G0_MPS2);
        let e2 = depth2 + v2 * v2 / (2.0 * G0_MPS2);
        Ok((e2 - e1) / (self.slope - i_r))
    }

    /// Depth one station away from a known depth, from the energy balance
    /// `i*dx + h_k + v_k^2/2g = h + Ir(h_k,h)*dx + v^2/2g`
    /// with the friction slope taken on the mean section of the step.
    /// `dx` is signed: negative marches upstream.
    pub fn step_depth(
        &self,
        dx: f64,
        discharge: VolumeRate,
        depth_known: f64,
        config: &RootConfig,
    ) -> ChannelResult<f64> {
        let (modif, distance) = if dx >= 0.0 { (1.0, dx) } else { (-1.0, -dx) };
        let w = self.width.value;
        let q = discharge.value;
        let v_known = q / (w * depth_known);
        let lhs = modif * self.slope * distance + depth_known + v_known * v_known / (2.0 * G0_MPS2);

        let depth = solve_scalar_equation(
            |h| {
                let i_r = self.friction_slope_mean(discharge, depth_known, h);
                let v = q / (w * h);
                modif * i_r * distance + h + v * v / (2.0 * G0_MPS2) - lhs
            },
            depth_known,
            "energy-balance depth step",
            config,
        )?;

        if depth <= 0.0 || !depth.is_finite() {
            return Err(ChannelError::NonPhysical {
                what: "marched depth",
                value: depth,
            });
        }
        trace!(dx, depth_known, depth, "depth step");
        Ok(depth)
    }

    /// March depths along `positions`.
    ///
    /// Returns a lazy, finite iterator yielding one depth per station in
    /// march order: front-to-back for [`Direction::Downstream`],
    /// back-to-front for [`Direction::Upstream`]. The first yielded item
    /// is the starting depth itself. The iterator borrows the section and
    /// cannot be restarted; marching again requires a fresh call with the
    /// same starting depth.
    pub fn propagate_depth<'a>(
        &'a self,
        positions: &'a [f64],
        starting_depth: f64,
        discharge: VolumeRate,
        direction: Direction,
        config: RootConfig,
    ) -> DepthMarch<'a> {
        DepthMarch {
            section: self,
            positions,
            discharge,
            direction,
            config,
            depth: starting_depth,
            cursor: 0,
            failed: false,
        }
    }

    /// March depths along `positions` and collect them aligned to the
    /// input order (index k holds the depth at `positions[k]`, whichever
    /// direction the march ran).
    pub fn propagate_depth_vec(
        &self,
        positions: &[f64],
        starting_depth: f64,
        discharge: VolumeRate,
        direction: Direction,
        config: &RootConfig,
    ) -> ChannelResult<Vec<f64>> {
        let march: ChannelResult<Vec<f64>> = self
            .propagate_depth(positions, starting_depth, discharge, direction, *config)
            .collect();
        let mut depths = march?;
        if direction == Direction::Upstream {
            depths.reverse();
        }
        Ok(depths)
    }
}

/// Lazy depth-marching iterator; see [`RectChannel::propagate_depth`].
pub struct DepthMarch<'a> {
    section: &'a RectChannel,
    positions: &'a [f64],
    discharge: VolumeRate,
    direction: Direction,
    config: RootConfig,
    depth: f64,
    cursor: usize,
    failed: bool,
}

impl Iterator for DepthMarch<'_> {
    type Item = ChannelResult<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.positions.len() {
            return None;
        }
        let n = self.positions.len();
        let item = if self.cursor == 0 {
            Ok(self.depth)
        } else {
            let (from, to) = match self.direction {
                Direction::Downstream => (self.cursor - 1, self.cursor),
                Direction::Upstream => (n - self.cursor, n - 1 - self.cursor),
            };
            let dx = self.positions[to] - self.positions[from];
            match self
                .section
                .step_depth(dx, self.discharge, self.depth, &self.config)
            {
                Ok(depth) => {
                    self.depth = depth;
                    Ok(depth)
                }
                Err(e) => {
                    self.failed = true;
                    Err(e)
                }
            }
        };
        self.cursor += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.positions.len() - self.cursor;
        if self.failed { (0, Some(0)) } else { (rest, Some(rest)) }
    }
}
