//! Two-reservoir pipe with an inline turbine/pump machine.

use crate::error::{PipeNetError, PipeNetResult};
use hy_core::units::constants::{G0_MPS2, GAMMA_WATER_N_M3};
use hy_core::units::{Length, VolumeRate};
use hy_core::RootConfig;
use hy_friction::{friction_factor_with, reynolds_number};
use hy_geometry::area_circle;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sense of the flow through the machine pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Upper reservoir to lower reservoir
    Forward,
    /// Lower reservoir to upper reservoir
    Reverse,
}

/// Operating point of the inline machine. The branches are mutually
/// exclusive, selected by the signs of discharge and net head alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OperatingPoint {
    /// Forward flow with head to spare: the machine generates
    Turbining { power_w: f64 },
    /// Forward flow short of head: the machine pumps along the gradient
    Pumping { power_w: f64 },
    /// Reverse flow: the machine pumps against the natural gradient
    PumpingReverse { power_w: f64 },
    /// No flow; hydrostatic lines, no power
    Standstill,
}

/// Solved machine problem: classification plus the four-point energy and
/// pressure polylines (pipe start, machine inlet, machine outlet, pipe
/// end).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSolution {
    /// Signed discharge as given [m^3/s]
    pub discharge_m3ps: f64,
    pub direction: Option<FlowDirection>,
    pub operating: OperatingPoint,
    pub x_m: Vec<f64>,
    pub pipe_axis_m: Vec<f64>,
    pub energy_horizon_m: Vec<f64>,
    pub energy_line_m: Vec<f64>,
    pub pressure_line_m: Vec<f64>,
}

/// Single pipe of constant diameter connecting two reservoirs with an
/// inline machine between the headrace and the tailrace.
#[derive(Debug, Clone, Copy)]
pub struct MachinePipe {
    pub diameter: Length,
    pub roughness: Length,
    /// Lumped local loss coefficient of the line [-]
    pub zeta_local: f64,
    /// Length from the upper reservoir to the machine
    pub length_headrace: Length,
    /// Length from the machine to the lower reservoir
    pub length_tailrace: Length,
    pub upper_level: Length,
    pub lower_level: Length,
    /// Axis elevation at the upper intake
    pub z_intake: Length,
    /// Axis elevation at the machine
    pub z_machine: Length,
    /// Axis elevation at the lower outlet
    pub z_outlet: Length,
    pub eta_turbine: f64,
    pub eta_pump: f64,
}

impl MachinePipe {
    pub fn validate(&self) -> PipeNetResult<()> {
        if self.diameter.value <= 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "machine pipe diameter must be positive",
            });
        }
        if self.roughness.value < 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "roughness height must be non-negative",
            });
        }
        if self.length_headrace.value <= 0.0 || self.length_tailrace.value <= 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "headrace and tailrace lengths must be positive",
            });
        }
        if self.zeta_local < 0.0 {
            return Err(PipeNetError::InvalidInput {
                what: "local loss coefficient must be non-negative",
            });
        }
        if self.eta_turbine <= 0.0 || self.eta_turbine > 1.0 {
            return Err(PipeNetError::InvalidInput {
                what: "turbine efficiency must be in (0, 1]",
            });
        }
        if self.eta_pump <= 0.0 || self.eta_pump > 1.0 {
            return Err(PipeNetError::InvalidInput {
                what: "pump efficiency must be in (0, 1]",
            });
        }
        Ok(())
    }

    fn stations(&self) -> (Vec<f64>, Vec<f64>) {
        let l1 = self.length_headrace.value;
        let l2 = self.length_tailrace.value;
        let x = vec![0.0, l1, l1, l1 + l2];
        let axis = vec![
            self.z_intake.value,
            self.z_machine.value,
            self.z_machine.value,
            self.z_outlet.value,
        ];
        (x, axis)
    }

    /// Balance the line for a signed discharge: net machine head,
    /// operating classification and the grade-line polylines.
    ///
    /// Forward flow (q > 0) runs upper to lower reservoir; the sign of
    /// the remaining net head decides between generation and forward
    /// pumping. Reverse flow (q < 0) always pumps. Zero discharge is the
    /// hydrostatic branch.
    pub fn balance(
        &self,
        discharge: VolumeRate,
        config: &RootConfig,
    ) -> PipeNetResult<MachineSolution> {
        self.validate()?;
        let q = discharge.value;
        let h_o = self.upper_level.value;
        let h_u = self.lower_level.value;
        let d = self.diameter.value;
        let l1 = self.length_headrace.value;
        let l2 = self.length_tailrace.value;
        let zeta = self.zeta_local;
        let (x_m, pipe_axis_m) = self.stations();

        if q == 0.0 {
            // level lines on both reservoirs, no losses, no power
            return Ok(MachineSolution {
                discharge_m3ps: 0.0,
                direction: None,
                operating: OperatingPoint::Standstill,
                energy_line_m: vec![h_o, h_o, h_u, h_u],
                pressure_line_m: vec![h_o, h_o, h_u, h_u],
                energy_horizon_m: vec![h_o; 4],
                x_m,
                pipe_axis_m,
            });
        }

        let q_abs = q.abs();
        let v = q_abs / area_circle(d);
        let re = reynolds_number(v, d);
        let lambda = friction_factor_with(self.roughness.value, d, re, config)?;
        let ke = v * v / (2.0 * G0_MPS2);
        debug!(q, v, lambda, "machine line resolved");

        let (direction, operating, energy_line_m, pressure_line_m) = if q > 0.0 {
            // forward: losses eat into the gross head h_o - h_u
            let head = h_o - h_u - ke * (zeta + lambda * (l1 + l2) / d + 1.0);
            if head > 0.0 {
                let power = self.eta_turbine * GAMMA_WATER_N_M3 * q * head;
                let e = vec![
                    h_o - ke * zeta,
                    h_o - ke * (zeta + lambda * l1 / d),
                    h_o - ke * (zeta + lambda * l1 / d) - head,
                    h_u + ke,
                ];
                let p = vec![
                    h_o - ke * (zeta + 1.0),
                    h_o - ke * (zeta + lambda * l1 / d + 1.0),
                    h_o - ke * (zeta + lambda * l1 / d + 1.0) - head,
                    h_u,
                ];
                (
                    Some(FlowDirection::Forward),
                    OperatingPoint::Turbining { power_w: power },
                    e,
                    p,
                )
            } else {
                // the gradient alone cannot push this discharge; the
                // machine must add the deficit
                let head = head.abs();
                let power = GAMMA_WATER_N_M3 * q * head / self.eta_pump;
                let e = vec![
                    h_o - ke * zeta,
                    h_o - ke * (zeta + lambda * l1 / d),
                    h_u + ke * (lambda * l2 / d + 1.0),
                    h_u + ke,
                ];
                let p = vec![
                    h_o - ke * (zeta + 1.0),
                    h_o - ke * (zeta + lambda * l1 / d + 1.0),
                    h_u + ke * (lambda * l2 / d),
                    h_u,
                ];
                (
                    Some(FlowDirection::Forward),
                    OperatingPoint::Pumping { power_w: power },
                    e,
                    p,
                )
            }
        } else {
            // reverse: the machine lifts against gradient plus losses
            let head = h_o - h_u + ke * (zeta + lambda * (l1 + l2) / d + 1.0);
            let power = GAMMA_WATER_N_M3 * q_abs * head / self.eta_pump;
            let e = vec![
                h_o + ke,
                h_o + ke * (lambda * l1 / d + 1.0),
                h_u - ke * (zeta + lambda * l2 / d),
                h_u - ke * zeta,
            ];
            let p = vec![
                h_o,
                h_o + ke * (lambda * l1 / d),
                h_u - ke * (zeta + lambda * l2 / d + 1.0),
                h_u - ke * (zeta + 1.0),
            ];
            (
                Some(FlowDirection::Reverse),
                OperatingPoint::PumpingReverse { power_w: power },
                e,
                p,
            )
        };

        Ok(MachineSolution {
            discharge_m3ps: q,
            direction,
            operating,
            energy_line_m,
            pressure_line_m,
            energy_horizon_m: vec![h_o; 4],
            x_m,
            pipe_axis_m,
        })
    }
}
