//! hy-geometry: cross-section formulary for channels and pipes.
//!
//! Pure closed-form area / perimeter / hydraulic-radius functions over
//! SI scalars. Solver crates call these inside root-finding closures, so
//! everything here is `f64` in, `f64` out; validation helpers return the
//! shared error type for the non-positive-dimension cases.

pub mod circle;
pub mod rect;

pub use circle::{area_circle, check_diameter};
pub use rect::{area, check_section, hydraulic_diameter, hydraulic_radius, wetted_perimeter};
