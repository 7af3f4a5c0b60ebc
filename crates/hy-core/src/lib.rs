//! hy-core: stable foundation for the hydraulic solvers.
//!
//! Contains:
//! - units (uom SI types + constructors, water constants)
//! - numeric (Real + tolerances + the shared scalar root finder)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HyError, HyResult};
pub use numeric::*;
pub use units::*;
