//! RPS Arena - a cyclic-dominance particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particle store, motion, walls, conversions)
//! - `driver`: Fixed-cadence pump that feeds ticks to the simulation
//! - `stats`: Population census and history
//! - `settings`: JSON-backed configuration

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;
pub mod stats;

pub use driver::Driver;
pub use error::{Error, Result};
pub use settings::{PopulationPreset, Settings};
pub use sim::{Kind, KindCounts, ParticleStore, SimParams, step, step_by};
pub use stats::{Census, PopulationHistory};

/// Simulation configuration constants
pub mod consts {
    /// Interval between ticks (~33 ticks per second)
    pub const TICK_INTERVAL_SECS: f64 = 0.030;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for in one update
    pub const MAX_FRAME_SECS: f64 = 0.1;

    /// Arena defaults
    pub const DEFAULT_ARENA_WIDTH: f64 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f64 = 720.0;
    pub const DEFAULT_HEADER_HEIGHT: f64 = 60.0;

    /// Particle defaults
    pub const DEFAULT_PARTICLE_SIZE: f64 = 24.0;
    pub const DEFAULT_SPEED_MULTIPLIER: f64 = 3.0;
    pub const DEFAULT_COUNT_PER_KIND: u32 = 50;

    /// Ranges offered to interactive hosts
    pub const SPEED_RANGE: (f64, f64) = (0.5, 10.0);
    pub const SIZE_RANGE: (f64, f64) = (10.0, 60.0);

    /// Spawned velocity components lie in [-SPAWN_SPEED, SPAWN_SPEED) * multiplier
    pub const SPAWN_SPEED: f64 = 2.0;
    /// Speed changes redraw each component magnitude from [0, RESCALE_SPEED) * multiplier
    pub const RESCALE_SPEED: f64 = 4.0;
    /// Walls are tested against the particle edge at size * WALL_EXTENT
    pub const WALL_EXTENT: f64 = 1.5;
    /// Contact when centers are closer than size * CONTACT_FACTOR
    pub const CONTACT_FACTOR: f64 = 2.0;

    /// Upper bound on the total population (the contact scan is O(n²))
    pub const MAX_POPULATION: u32 = 10_000;
}
