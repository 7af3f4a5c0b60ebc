//! hy-channel: steady open-channel flow for rectangular sections.
//!
//! Provides uniform-flow depths (normal, critical), regime
//! classification, the Bresse/Ruehlmann backwater-curve distance
//! function, energy-line transitions with station-to-station depth
//! marching, hydraulic-jump relations, and a two-reach water-surface
//! profile composer that dispatches on the regime pair.
//!
//! All solves are pure functions of the section parameters and the
//! discharge; implicit equations go through the shared scalar root
//! finder in `hy-core`.

pub mod bresse;
pub mod energy;
pub mod error;
pub mod jump;
pub mod profile;
pub mod section;
pub mod uniform;

// Re-exports
pub use bresse::ruehlmann_f;
pub use energy::{DepthMarch, Direction};
pub use error::{ChannelError, ChannelResult};
pub use jump::{conjugate_depth, jump_length};
pub use profile::{surface_profile, GridConfig, JumpLocation, TwoReachProfile};
pub use section::{classify, ChannelRegime, RectChannel};
pub use uniform::{critical_depth, froude};
