//! Energy- and pressure-line reconstruction along a pipe run.

use crate::error::PipeNetResult;
use crate::segment::PipeRun;
use hy_core::units::constants::G0_MPS2;
use hy_core::units::{Length, VolumeRate};
use hy_core::RootConfig;
use hy_friction::{local_loss_head, pipe_loss_head_with};
use serde::{Deserialize, Serialize};

/// Hydraulic grade lines along a run, two samples per segment so local
/// losses and diameter changes render as steps. Parallel arrays, ready
/// for plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeRunProfile {
    pub discharge_m3ps: f64,
    /// Cumulative distance along the axis [m]
    pub x_m: Vec<f64>,
    /// Pipe axis elevation [m above datum]
    pub pipe_axis_m: Vec<f64>,
    /// Upstream energy level, constant [m above datum]
    pub energy_horizon_m: Vec<f64>,
    /// Energy horizon minus cumulative losses [m above datum]
    pub energy_line_m: Vec<f64>,
    /// Energy line minus the local velocity head [m above datum]
    pub pressure_line_m: Vec<f64>,
}

impl PipeRun {
    /// Reconstruct the grade lines at the given discharge, with the
    /// upstream reservoir level as the energy horizon.
    pub fn profile(
        &self,
        energy_horizon: Length,
        discharge: VolumeRate,
        config: &RootConfig,
    ) -> PipeNetResult<PipeRunProfile> {
        let q = discharge.value;
        let horizon = energy_horizon.value;
        let n = 2 * self.segments.len();

        let mut x_m = Vec::with_capacity(n);
        let mut pipe_axis_m = Vec::with_capacity(n);
        let mut energy_line_m = Vec::with_capacity(n);
        let mut pressure_line_m = Vec::with_capacity(n);

        // the entry loss drops the energy line at the very first sample
        let mut cum_loss = local_loss_head(self.entry_loss, self.entry_area(), q);
        let mut x = 0.0;
        for seg in &self.segments {
            let area = seg.area();
            let v = q / area;
            let kinetic = v * v / (2.0 * G0_MPS2);

            // segment entry
            x_m.push(x);
            pipe_axis_m.push(seg.z_in.value);
            energy_line_m.push(horizon - cum_loss);
            pressure_line_m.push(horizon - cum_loss - kinetic);

            // segment exit: friction accumulated over the full length
            cum_loss += pipe_loss_head_with(
                seg.length.value,
                area,
                seg.roughness.value,
                seg.diameter.value,
                q,
                config,
            )?;
            x += seg.length.value;
            x_m.push(x);
            pipe_axis_m.push(seg.z_out.value);
            energy_line_m.push(horizon - cum_loss);
            pressure_line_m.push(horizon - cum_loss - kinetic);
        }

        Ok(PipeRunProfile {
            discharge_m3ps: q,
            x_m,
            pipe_axis_m,
            energy_horizon_m: vec![horizon; n],
            energy_line_m,
            pressure_line_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::PipeSegment;
    use hy_core::units::{m, mm, m3ps};

    fn penstock() -> PipeRun {
        // the classic three-segment reservoir line: DN700, k = 0.3 mm
        let segs = vec![
            PipeSegment::new(m(280.0), m(0.7), mm(0.3), m(350.0), m(231.6)).unwrap(),
            PipeSegment::new(m(150.0), m(0.7), mm(0.3), m(231.6), m(260.5)).unwrap(),
            PipeSegment::new(m(350.0), m(0.7), mm(0.3), m(260.5), m(210.45)).unwrap(),
        ];
        PipeRun::new(segs, 0.5).unwrap()
    }

    #[test]
    fn two_samples_per_segment() {
        let run = penstock();
        let p = run
            .profile(m(360.0), m3ps(4.7), &RootConfig::default())
            .unwrap();
        assert_eq!(p.x_m.len(), 6);
        assert_eq!(p.x_m, vec![0.0, 280.0, 280.0, 430.0, 430.0, 780.0]);
        assert_eq!(p.pipe_axis_m[1], p.pipe_axis_m[2]);
    }

    #[test]
    fn energy_line_steps_down_monotonically() {
        let run = penstock();
        let p = run
            .profile(m(360.0), m3ps(4.7), &RootConfig::default())
            .unwrap();
        for w in p.energy_line_m.windows(2) {
            assert!(w[1] <= w[0]);
        }
        // entry loss is already charged at the first sample
        assert!(p.energy_line_m[0] < 360.0);
        // the pressure line sits one velocity head below the energy line
        for (e, pr) in p.energy_line_m.iter().zip(&p.pressure_line_m) {
            assert!(pr < e);
        }
    }

    #[test]
    fn standing_water_lines_coincide() {
        let run = penstock();
        let p = run
            .profile(m(360.0), m3ps(0.0), &RootConfig::default())
            .unwrap();
        assert!(p.energy_line_m.iter().all(|&e| e == 360.0));
        assert!(p.pressure_line_m.iter().all(|&pl| pl == 360.0));
    }

    #[test]
    fn record_serializes() {
        let run = penstock();
        let p = run
            .profile(m(360.0), m3ps(4.7), &RootConfig::default())
            .unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: PipeRunProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.x_m, p.x_m);
    }
}
