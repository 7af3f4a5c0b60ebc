//! Integration tests for reservoir pipe problems.

use hy_core::units::{m, mm, m3ps};
use hy_core::RootConfig;
use hy_pipenet::{effective_tailwater, PipeRun, PipeSegment};

/// Three DN700 segments between two reservoirs, 149.55 m of gross head.
/// The solved discharge must reproduce the head from its own losses, and
/// the reconstructed pressure line must land on the outlet axis.
#[test]
fn three_segment_penstock() {
    let ha = 360.0;
    let h4 = 210.45;
    let segs = vec![
        PipeSegment::new(m(280.0), m(0.7), mm(0.3), m(350.0), m(231.6)).unwrap(),
        PipeSegment::new(m(150.0), m(0.7), mm(0.3), m(231.6), m(260.5)).unwrap(),
        PipeSegment::new(m(350.0), m(0.7), mm(0.3), m(260.5), m(210.45)).unwrap(),
    ];
    let run = PipeRun::new(segs, 0.5).unwrap();
    let cfg = RootConfig::default();

    let q = run.discharge(m(ha - h4), &cfg).unwrap();
    // hand-checked: ~4.7 m^3/s for this line
    assert!((q.value - 4.71).abs() < 0.05, "q = {}", q.value);

    let head = run.total_head(q.value, &cfg).unwrap();
    assert!((head - (ha - h4)).abs() < 1e-6);

    let p = run.profile(m(ha), q, &cfg).unwrap();
    assert_eq!(p.x_m.len(), 6);
    // energy line starts one entry loss below the horizon and only falls
    assert!(p.energy_line_m[0] < ha);
    for w in p.energy_line_m.windows(2) {
        assert!(w[1] <= w[0]);
    }
    // at the outlet the remaining pressure head is exactly the axis
    // elevation of the receiving end
    let last_pressure = *p.pressure_line_m.last().unwrap();
    assert!((last_pressure - h4).abs() < 1e-6, "p = {last_pressure}");
}

/// Small-bore basin outflow (5 cm, 2 m long): the controlling downstream
/// head switches between tailwater and outlet as the basin drains.
#[test]
fn basin_outflow_with_tailwater_control() {
    let ha = 1.5;
    let hout = 0.3;
    let seg = PipeSegment::new(m(2.0), m(0.05), mm(0.3), m(0.65), m(0.3)).unwrap();
    let run = PipeRun::new(vec![seg], 0.5).unwrap();
    let cfg = RootConfig::default();

    // submerged outfall: basin level governs
    let hb_high = 0.8;
    let control = effective_tailwater(m(hb_high), m(hout));
    assert_eq!(control.value, hb_high);
    let q_submerged = run.discharge(m(ha - control.value), &cfg).unwrap().value;

    // free outfall: outlet axis governs, more head drives more flow
    let hb_low = 0.2;
    let control = effective_tailwater(m(hb_low), m(hout));
    assert_eq!(control.value, hout);
    let q_free = run.discharge(m(ha - control.value), &cfg).unwrap().value;

    assert!(q_free > q_submerged);

    // level basins: nothing flows and the grade lines are flat
    let q0 = run.discharge(m(0.0), &cfg).unwrap();
    assert_eq!(q0.value, 0.0);
    let p = run.profile(m(ha), q0, &cfg).unwrap();
    assert!(p.energy_line_m.iter().all(|&e| e == ha));
    assert!(p.pressure_line_m.iter().all(|&pl| pl == ha));
}

/// Identical inputs give identical solutions: the solver owns no state
/// between calls.
#[test]
fn solves_are_pure() {
    let seg = PipeSegment::new(m(2.0), m(0.05), mm(0.3), m(1.5), m(0.3)).unwrap();
    let run = PipeRun::new(vec![seg], 0.5).unwrap();
    let cfg = RootConfig::default();
    let a = run.discharge(m(1.2), &cfg).unwrap().value;
    let b = run.discharge(m(1.2), &cfg).unwrap().value;
    assert_eq!(a, b);
}
