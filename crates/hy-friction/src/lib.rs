//! hy-friction: Darcy-Weisbach friction resolution across the Moody diagram.
//!
//! Regime classification (laminar / critical Reynolds / turbulent with
//! smooth, transitional or rough wall law) is a pure tagged-enum step,
//! separate from the numeric factor resolution that dispatches on it.
//! The implicit turbulent laws are solved with the shared scalar root
//! finder from `hy-core`.

pub mod error;
pub mod factor;
pub mod losses;
pub mod regime;

// Re-exports
pub use error::{FrictionError, FrictionResult};
pub use factor::{friction_factor, friction_factor_with};
pub use losses::{local_loss_head, pipe_loss_head, pipe_loss_head_with, reynolds_number};
pub use regime::{classify, PipeRegime, WallLaw, RE_CRITICAL};
