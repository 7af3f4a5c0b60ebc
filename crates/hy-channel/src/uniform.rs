//! Uniform-flow quantities: critical depth, normal depth, Froude number.

use crate::error::{ChannelError, ChannelResult};
use crate::section::{classify, ChannelRegime, RectChannel};
use hy_core::units::constants::G0_MPS2;
use hy_core::units::{Length, VolumeRate, m};
use hy_core::{solve_scalar_equation, RootConfig};
use hy_geometry::rect;

/// Initial guess for the Manning-Strickler depth root [m].
const DEPTH_GUESS: f64 = 1.0;

/// Froude number from velocity and depth.
pub fn froude(velocity: f64, depth: f64) -> f64 {
    velocity / (G0_MPS2 * depth).sqrt()
}

/// Critical depth of a rectangular section, (Q^2/(w^2 g))^(1/3).
pub fn critical_depth(discharge: VolumeRate, width: Length) -> ChannelResult<Length> {
    let q = discharge.value;
    let w = width.value;
    if q <= 0.0 {
        return Err(ChannelError::InvalidInput {
            what: "discharge must be positive",
        });
    }
    if w <= 0.0 {
        return Err(ChannelError::InvalidInput {
            what: "channel width must be positive",
        });
    }
    Ok(m((q * q / (w * w * G0_MPS2)).cbrt()))
}

impl RectChannel {
    /// Critical depth for the given discharge in this section.
    pub fn critical_depth(&self, discharge: VolumeRate) -> ChannelResult<Length> {
        critical_depth(discharge, self.width)
    }

    /// Normal depth: root of Manning-Strickler
    /// `kSt * sqrt(i) * R(h)^(2/3) * A(h) = Q` over the depth.
    pub fn normal_depth(&self, discharge: VolumeRate) -> ChannelResult<Length> {
        self.normal_depth_with(discharge, &RootConfig::default())
    }

    /// As [`Self::normal_depth`], with an explicit solver configuration.
    pub fn normal_depth_with(
        &self,
        discharge: VolumeRate,
        config: &RootConfig,
    ) -> ChannelResult<Length> {
        let q = discharge.value;
        let w = self.width.value;
        if q <= 0.0 {
            return Err(ChannelError::InvalidInput {
                what: "discharge must be positive",
            });
        }

        let ks = self.strickler;
        let sqrt_i = self.slope.sqrt();
        let depth = solve_scalar_equation(
            |h| ks * sqrt_i * rect::hydraulic_radius(w, h).powf(2.0 / 3.0) * rect::area(w, h) - q,
            DEPTH_GUESS,
            "normal depth",
            config,
        )?;

        if depth <= 0.0 || !depth.is_finite() {
            return Err(ChannelError::NonPhysical {
                what: "normal depth",
                value: depth,
            });
        }
        Ok(m(depth))
    }

    /// Mean velocity at the given depth [m/s].
    pub fn velocity(&self, discharge: VolumeRate, depth: f64) -> f64 {
        discharge.value / (self.width.value * depth)
    }

    /// Froude number at the given depth.
    pub fn froude_at(&self, discharge: VolumeRate, depth: f64) -> f64 {
        froude(self.velocity(discharge, depth), depth)
    }

    /// Regime of this reach for the given discharge.
    pub fn regime(&self, discharge: VolumeRate) -> ChannelResult<ChannelRegime> {
        let hn = self.normal_depth(discharge)?;
        let hc = self.critical_depth(discharge)?;
        Ok(classify(hn.value, hc.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hy_core::units::m3ps;
    use proptest::prelude::*;

    fn channel(w: f64, ks: f64, i: f64) -> RectChannel {
        RectChannel::new(m(w), ks, i).unwrap()
    }

    #[test]
    fn critical_depth_round_trip() {
        // Q = w * h * sqrt(g h) at the critical depth
        let q = 30.0;
        let w = 4.0;
        let h = critical_depth(m3ps(q), m(w)).unwrap().value;
        let q_back = w * h * (G0_MPS2 * h).sqrt();
        assert!((q_back - q).abs() < 1e-9, "round trip gave {q_back}");
    }

    #[test]
    fn normal_depth_satisfies_strickler() {
        let ch = channel(4.0, 25.0, 0.0076);
        let q = 30.0;
        let h = ch.normal_depth(m3ps(q)).unwrap().value;
        let r = rect::hydraulic_radius(4.0, h);
        let lhs = 25.0 * 0.0076f64.sqrt() * r.powf(2.0 / 3.0) * rect::area(4.0, h);
        assert!((lhs - q).abs() < 1e-6);
    }

    #[test]
    fn rejects_nonpositive_discharge() {
        let ch = channel(4.0, 25.0, 0.0076);
        assert!(matches!(
            ch.normal_depth(m3ps(0.0)),
            Err(ChannelError::InvalidInput { .. })
        ));
        assert!(critical_depth(m3ps(-3.0), m(4.0)).is_err());
    }

    #[test]
    fn scenario_wide_channel_near_critical() {
        // w = 30, Q = 150, i = 0.008, kSt = 40: a near-critical reach.
        // Both depths are computable and the classification follows the
        // exact comparison, not a rounded one.
        let ch = channel(30.0, 40.0, 0.008);
        let q = m3ps(150.0);
        let hn = ch.normal_depth(q).unwrap().value;
        let hc = ch.critical_depth(q).unwrap().value;
        assert!((hn - 1.26).abs() < 0.01, "hn = {hn}");
        assert!((hc - 1.366).abs() < 0.01, "hc = {hc}");
        assert_eq!(ch.regime(q).unwrap(), ChannelRegime::Supercritical);

        // a rougher bed tips the same discharge subcritical
        let rough = channel(30.0, 30.0, 0.008);
        let hn_rough = rough.normal_depth(q).unwrap().value;
        assert!(hn_rough > hc, "hn = {hn_rough}, hc = {hc}");
        assert_eq!(rough.regime(q).unwrap(), ChannelRegime::Subcritical);
    }

    #[test]
    fn froude_partitions_at_critical_depth() {
        let q = m3ps(150.0);
        let ch = channel(30.0, 40.0, 0.008);
        let hc = ch.critical_depth(q).unwrap().value;
        assert!((ch.froude_at(q, hc) - 1.0).abs() < 1e-9);
        assert!(ch.froude_at(q, 2.0 * hc) < 1.0);
        assert!(ch.froude_at(q, 0.5 * hc) > 1.0);
    }

    proptest! {
        #[test]
        fn normal_depth_monotone_in_discharge(
            q1 in 1.0f64..100.0,
            dq in 1.0f64..100.0,
        ) {
            let ch = channel(10.0, 30.0, 0.004);
            let h1 = ch.normal_depth(m3ps(q1)).unwrap().value;
            let h2 = ch.normal_depth(m3ps(q1 + dq)).unwrap().value;
            prop_assert!(h2 > h1);
        }

        #[test]
        fn normal_depth_monotone_in_slope(
            i1 in 0.0005f64..0.01,
            di in 0.0005f64..0.01,
        ) {
            let q = m3ps(30.0);
            let flat = channel(10.0, 30.0, i1);
            let steep = channel(10.0, 30.0, i1 + di);
            let h_flat = flat.normal_depth(q).unwrap().value;
            let h_steep = steep.normal_depth(q).unwrap().value;
            prop_assert!(h_steep < h_flat);
        }
    }
}
