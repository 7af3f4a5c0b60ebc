//! Two-reach water-surface profile composition.
//!
//! A channel break (roughness and/or slope change) at x = 0 joins an
//! upstream and a downstream reach carrying the same discharge. The
//! regime pair of the two reaches selects the profile construction:
//! monotonic Bresse backwater, critical fall with an energy-line
//! transition, or a hydraulic-jump decomposition with the physically
//! consistent jump location.

use crate::error::{ChannelError, ChannelResult};
use crate::jump::{conjugate_depth, jump_length};
use crate::section::{ChannelRegime, RectChannel};
use crate::energy::Direction;
use hy_core::units::constants::G0_MPS2;
use hy_core::units::VolumeRate;
use hy_core::RootConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling window around the channel break.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Half-width of the window on either side of the break [m]
    pub span: f64,
    /// Samples for marched (Bernoulli) sub-curves
    pub dense_samples: usize,
    /// Interior samples for Bresse-assembled sub-curves
    pub bresse_samples: usize,
    /// Extra window beyond computed transition ends [m]
    pub padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            span: 400.0,
            dense_samples: 101,
            bresse_samples: 22,
            padding: 25.0,
        }
    }
}

/// Location and extent of a hydraulic jump within a profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JumpLocation {
    /// Start of the roller [m from the break]
    pub x_start_m: f64,
    /// Roller length [m]
    pub length_m: f64,
    /// Supercritical depth entering the jump [m]
    pub depth_before_m: f64,
    /// Subcritical depth leaving the jump [m]
    pub depth_after_m: f64,
}

/// Water-surface profile over two joined reaches. Parallel arrays are
/// aligned sample-for-sample and ready for plotting; elevations use the
/// bed at the break as datum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoReachProfile {
    pub discharge_m3ps: f64,
    pub critical_depth_m: f64,
    pub normal_depth_upstream_m: f64,
    pub normal_depth_downstream_m: f64,
    pub regime_upstream: ChannelRegime,
    pub regime_downstream: ChannelRegime,
    /// Station [m], negative upstream of the break
    pub x_m: Vec<f64>,
    /// Bed elevation [m]
    pub bed_m: Vec<f64>,
    /// Water depth above the bed [m]
    pub depth_m: Vec<f64>,
    /// Energy-line elevation bed + depth + v^2/2g [m]
    pub energy_head_m: Vec<f64>,
    pub jump: Option<JumpLocation>,
}

fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![a];
    }
    let step = (b - a) / (n - 1) as f64;
    (0..n).map(|k| a + step * k as f64).collect()
}

/// Compose the water-surface profile across a channel break.
pub fn surface_profile(
    upstream: &RectChannel,
    downstream: &RectChannel,
    discharge: VolumeRate,
    grid: &GridConfig,
    config: &RootConfig,
) -> ChannelResult<TwoReachProfile> {
    if upstream.width.value != downstream.width.value {
        return Err(ChannelError::InvalidInput {
            what: "reach widths must match at the break",
        });
    }
    if grid.span <= 0.0 || grid.dense_samples < 2 || grid.bresse_samples < 3 {
        return Err(ChannelError::InvalidInput {
            what: "degenerate sampling grid",
        });
    }

    let w = upstream.width.value;
    let q = discharge.value;
    let hc = upstream.critical_depth(discharge)?.value;
    let hn1 = upstream.normal_depth_with(discharge, config)?.value;
    let hn2 = downstream.normal_depth_with(discharge, config)?.value;
    let r1 = crate::section::classify(hn1, hc);
    let r2 = crate::section::classify(hn2, hc);
    debug!(hn1, hn2, hc, ?r1, ?r2, "composing two-reach profile");

    // (x, depth) samples, ascending in x
    let mut pts: Vec<(f64, f64)> = Vec::new();
    let mut jump = None;
    let x_min = -grid.span;
    let x_max = grid.span;

    use ChannelRegime::{Subcritical as Sub, Supercritical as Super};

    if hn1 == hn2 {
        // uniform flow straight through the break
        pts.push((x_min, hn1));
        pts.push((x_max, hn2));
    } else if r1 == ChannelRegime::Critical || r2 == ChannelRegime::Critical {
        // a reach running exactly at critical depth has no gradually
        // varied curve toward its normal depth; emit the piecewise
        // uniform profile rather than evaluating the singular machinery
        pts.push((x_min, hn1));
        pts.push((0.0, hn1));
        pts.push((0.0, hn2));
        pts.push((x_max, hn2));
    } else {
        match (r1, r2) {
            (Sub, Sub) => {
                // Bresse backwater in the upstream reach, controlled by
                // the downstream normal depth at the break
                let factor = if hn2 < hn1 { 0.99 } else { 1.01 };
                let l_au = upstream.backwater_distance(factor * hn1, hn1, hn2, hc)?;
                let x_start = x_min.min(-l_au - grid.padding);
                pts.push((x_start, hn1));
                pts.push((-l_au, hn1));
                let ys = linspace(hn1, hn2, grid.bresse_samples);
                for &y in &ys[1..grid.bresse_samples - 1] {
                    let x = -upstream.backwater_distance(y, hn1, hn2, hc)?;
                    // samples inside the step-off band sit behind the
                    // curve start; drop them to keep stations ordered
                    if x <= -l_au {
                        continue;
                    }
                    pts.push((x, y));
                }
                pts.push((0.0, hn2));
                pts.push((x_max, hn2));
            }
            (Sub, Super) => {
                // fall through the critical depth at the break, then an
                // energy-line transition down to the new normal depth
                let l_au = upstream.backwater_distance(0.99 * hn1, hn1, hc, hc)?;
                let x_start = x_min.min(-l_au - grid.padding);
                pts.push((x_start, hn1));
                pts.push((-l_au, hn1));
                let ys = linspace(hn1, hc, grid.bresse_samples);
                for &y in &ys[1..grid.bresse_samples - 1] {
                    let x = -upstream.backwater_distance(y, hn1, hc, hc)?;
                    if x <= -l_au {
                        continue;
                    }
                    pts.push((x, y));
                }
                pts.push((0.0, hc));
                let l_trans = downstream.transition_length(discharge, hc, hn2)?;
                pts.push((l_trans, hn2));
                pts.push((x_max.max(l_trans + grid.padding), hn2));
            }
            (Super, Super) => {
                // the upstream reach holds its normal depth up to the
                // break; the adjustment runs downstream
                pts.push((x_min, hn1));
                pts.push((0.0, hn1));
                let l_trans = downstream.transition_length(discharge, hn1, hn2)?;
                let x_end = x_max.max(l_trans + grid.padding);
                let xs = linspace(0.0, x_end, grid.dense_samples);
                let depths = downstream.propagate_depth_vec(
                    &xs,
                    hn1,
                    discharge,
                    Direction::Downstream,
                    config,
                )?;
                for (&x, &d) in xs.iter().zip(&depths).skip(1) {
                    pts.push((x, d));
                }
            }
            (Super, Sub) => {
                // hydraulic jump: candidate locations are a jump in the
                // downstream reach (after a supercritical run-in) or a
                // jump inside the upstream reach; the conjugate of the
                // receiving normal depth decides which is consistent
                let v_n2 = q / (w * hn2);
                let t1 = conjugate_depth(hn2, crate::uniform::froude(v_n2, hn2));
                if t1 > hn1 {
                    // jump in the downstream reach: supercritical inflow
                    // decelerates from hn1 to t1, then jumps to hn2
                    let v1 = q / (w * t1);
                    let fr1 = crate::uniform::froude(v1, t1);
                    let lw = jump_length(t1, fr1);
                    let lv = downstream.transition_length(discharge, hn1, t1)?;
                    pts.push((x_min, hn1));
                    pts.push((0.0, hn1));
                    let xs = linspace(0.0, lv, grid.dense_samples);
                    let depths = downstream.propagate_depth_vec(
                        &xs,
                        hn1,
                        discharge,
                        Direction::Downstream,
                        config,
                    )?;
                    for (&x, &d) in xs.iter().zip(&depths).skip(1) {
                        pts.push((x, d));
                    }
                    let depth_before = depths[depths.len() - 1];
                    pts.push((lv + lw, hn2));
                    let x_end = x_max.max(lv + lw + grid.padding);
                    pts.push((x_end, hn2));
                    jump = Some(JumpLocation {
                        x_start_m: lv,
                        length_m: lw,
                        depth_before_m: depth_before,
                        depth_after_m: hn2,
                    });
                } else {
                    // jump inside the upstream reach: from hn1 to its
                    // conjugate, then a subcritical transition reaches
                    // the break at hn2
                    let fr_n1 = crate::uniform::froude(q / (w * hn1), hn1);
                    let t2 = conjugate_depth(hn1, fr_n1);
                    let lw = jump_length(hn1, fr_n1);
                    let lv = upstream.transition_length(discharge, t2, hn2)?;
                    let x_start = x_min.min(-(lw + lv) - grid.padding);
                    pts.push((x_start, hn1));
                    pts.push((-(lw + lv), hn1));
                    pts.push((-lv, t2));
                    let xs = linspace(-lv, 0.0, grid.dense_samples);
                    let depths = upstream.propagate_depth_vec(
                        &xs,
                        hn2,
                        discharge,
                        Direction::Upstream,
                        config,
                    )?;
                    for (&x, &d) in xs.iter().zip(&depths).skip(1) {
                        pts.push((x, d));
                    }
                    pts.push((x_max, hn2));
                    jump = Some(JumpLocation {
                        x_start_m: -(lw + lv),
                        length_m: lw,
                        depth_before_m: hn1,
                        depth_after_m: t2,
                    });
                }
            }
            _ => unreachable!("critical regimes handled above"),
        }
    }

    let i1 = upstream.slope;
    let i2 = downstream.slope;
    let mut x_m = Vec::with_capacity(pts.len());
    let mut bed_m = Vec::with_capacity(pts.len());
    let mut depth_m = Vec::with_capacity(pts.len());
    let mut energy_head_m = Vec::with_capacity(pts.len());
    for &(x, depth) in &pts {
        let bed = if x <= 0.0 { -i1 * x } else { -i2 * x };
        let v = q / (w * depth);
        x_m.push(x);
        bed_m.push(bed);
        depth_m.push(depth);
        energy_head_m.push(bed + depth + v * v / (2.0 * G0_MPS2));
    }

    Ok(TwoReachProfile {
        discharge_m3ps: q,
        critical_depth_m: hc,
        normal_depth_upstream_m: hn1,
        normal_depth_downstream_m: hn2,
        regime_upstream: r1,
        regime_downstream: r2,
        x_m,
        bed_m,
        depth_m,
        energy_head_m,
        jump,
    })
}
