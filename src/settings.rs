//! Simulation settings
//!
//! Persisted as JSON next to the binary (or wherever the host points).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::sim::{KindCounts, ParticleStore, SimParams};

/// Starting population presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PopulationPreset {
    Sparse,
    #[default]
    Balanced,
    Crowded,
}

impl PopulationPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationPreset::Sparse => "Sparse",
            PopulationPreset::Balanced => "Balanced",
            PopulationPreset::Crowded => "Crowded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sparse" => Some(PopulationPreset::Sparse),
            "balanced" | "default" => Some(PopulationPreset::Balanced),
            "crowded" => Some(PopulationPreset::Crowded),
            _ => None,
        }
    }

    /// Particles per kind
    pub fn per_kind(&self) -> u32 {
        match self {
            PopulationPreset::Sparse => 15,
            PopulationPreset::Balanced => DEFAULT_COUNT_PER_KIND,
            PopulationPreset::Crowded => 150,
        }
    }

    pub fn counts(&self) -> KindCounts {
        KindCounts::uniform(self.per_kind())
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Population ===
    pub counts: KindCounts,

    // === Motion ===
    pub speed_multiplier: f64,
    pub particle_size: f64,

    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,
    pub header_height: f64,

    // === Timing ===
    pub tick_interval_secs: f64,
    /// Tick budget for headless runs
    pub max_ticks: u64,
    /// RNG seed; drawn at startup when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            counts: KindCounts::uniform(DEFAULT_COUNT_PER_KIND),

            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            particle_size: DEFAULT_PARTICLE_SIZE,

            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,

            tick_interval_secs: TICK_INTERVAL_SECS,
            max_ticks: 10_000,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a population preset
    pub fn from_preset(preset: PopulationPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    pub fn apply_preset(&mut self, preset: PopulationPreset) {
        self.counts = preset.counts();
    }

    pub fn sim_params(&self) -> SimParams {
        SimParams {
            particle_size: self.particle_size,
            speed_multiplier: self.speed_multiplier,
            arena_width: self.arena_width,
            arena_height: self.arena_height,
            header_height: self.header_height,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sim_params().validate()?;
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs <= 0.0 {
            return Err(Error::invalid(format!(
                "tick interval must be finite and > 0, got {}",
                self.tick_interval_secs
            )));
        }
        if self.counts.total() > MAX_POPULATION as u64 {
            return Err(Error::invalid(format!(
                "total population {} exceeds the maximum of {}",
                self.counts.total(),
                MAX_POPULATION
            )));
        }
        Ok(())
    }

    /// Clamp speed and size into the ranges interactive hosts expose
    pub fn clamp_to_ui_ranges(&mut self) {
        if self.speed_multiplier.is_finite() {
            self.speed_multiplier = self.speed_multiplier.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        }
        if self.particle_size.is_finite() {
            self.particle_size = self.particle_size.clamp(SIZE_RANGE.0, SIZE_RANGE.1);
        }
    }

    /// Seed to use for this run, drawing one if none is configured
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            use rand::Rng;
            let seed = rand::rng().random();
            log::info!("No seed configured, using {seed}");
            seed
        })
    }

    /// Build a populated store from these settings
    pub fn build_store(&self) -> Result<ParticleStore> {
        self.validate()?;
        let mut store = ParticleStore::new(self.sim_params(), self.resolve_seed())?;
        store.resize(self.counts)?;
        Ok(store)
    }

    /// Build a store and wrap it in a driver paced at `tick_interval_secs`
    pub fn build_driver(&self) -> Result<Driver> {
        Ok(Driver::with_interval(
            self.build_store()?,
            self.tick_interval_secs,
        ))
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
