//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ascending particle id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod kind;
pub mod state;
pub mod tick;

pub use collision::{WallHits, WallResult, in_contact, resolve_walls};
pub use kind::{Kind, KindCounts};
pub use state::{Particle, ParticleStore, ParticleView, SimParams};
pub use tick::{StepSummary, step, step_by};
