//! Particle store and simulation parameters
//!
//! The store exclusively owns every particle, the arena parameters and the
//! seeded RNG. Particles are kept in ascending id order at all times.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kind::{Kind, KindCounts};
use crate::consts::*;
use crate::error::{Error, Result};
use crate::stats::Census;

/// A particle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub kind: Kind,
    /// Top-left corner in arena coordinates (y grows downward)
    pub pos: DVec2,
    /// Distance per tick
    pub vel: DVec2,
}

/// Read-only view handed to renderers and statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub id: u64,
    pub kind: Kind,
    pub x: f64,
    pub y: f64,
}

/// Global simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Visual diameter; also drives the wall extent and contact radius
    pub particle_size: f64,
    pub speed_multiplier: f64,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Exclusion band at the top that particles bounce off
    pub header_height: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            particle_size: DEFAULT_PARTICLE_SIZE,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
        }
    }
}

impl SimParams {
    pub fn validate(&self) -> Result<()> {
        check_size(self.particle_size)?;
        check_speed(self.speed_multiplier)?;
        check_bounds(self.arena_width, self.arena_height, self.header_height)
    }

    /// Distance below which two particle centers are in contact
    #[inline]
    pub fn contact_radius(&self) -> f64 {
        self.particle_size * CONTACT_FACTOR
    }

    /// Distance from a particle's position to its far edge for wall tests
    #[inline]
    pub fn wall_extent(&self) -> f64 {
        self.particle_size * WALL_EXTENT
    }
}

fn check_size(size: f64) -> Result<()> {
    if !size.is_finite() || size < 0.0 {
        return Err(Error::invalid(format!(
            "particle size must be finite and >= 0, got {size}"
        )));
    }
    Ok(())
}

fn check_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(Error::invalid(format!(
            "speed multiplier must be finite and >= 0, got {speed}"
        )));
    }
    Ok(())
}

fn check_bounds(width: f64, height: f64, header: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(Error::invalid(format!(
            "arena width must be finite and > 0, got {width}"
        )));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::invalid(format!(
            "arena height must be finite and > 0, got {height}"
        )));
    }
    if !header.is_finite() || header < 0.0 {
        return Err(Error::invalid(format!(
            "header height must be finite and >= 0, got {header}"
        )));
    }
    Ok(())
}

/// Uniform draw from `[lo, hi)`, collapsing to `lo` when the span is empty
fn sample_span(rng: &mut Pcg32, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Sign of a velocity component, with zero (and -0.0) mapping to zero
#[inline]
fn heading(component: f64) -> f64 {
    if component == 0.0 { 0.0 } else { component.signum() }
}

/// The particle collection plus everything needed to mutate it
#[derive(Debug, Clone)]
pub struct ParticleStore {
    /// Seed the RNG was created from (for replays)
    pub seed: u64,
    /// Number of steps applied so far
    pub time_ticks: u64,
    params: SimParams,
    particles: Vec<Particle>,
    rng: Pcg32,
    next_id: u64,
}

impl ParticleStore {
    /// Create an empty store after validating `params`
    pub fn new(params: SimParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            seed,
            time_ticks: 0,
            params,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Particles in ascending id order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Particle> {
        self.particles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.particles[i])
    }

    /// Split borrow for the step engine
    pub(crate) fn engine_view(&mut self) -> (&SimParams, &mut [Particle]) {
        (&self.params, &mut self.particles)
    }

    /// Allocate a new particle ID
    fn next_particle_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, kind: Kind, pos: DVec2, vel: DVec2) -> u64 {
        let id = self.next_particle_id();
        self.particles.push(Particle { id, kind, pos, vel });
        id
    }

    /// Place a particle explicitly. Returns its id.
    ///
    /// Errors: `Error::InvalidParameter` if any position or velocity component
    /// is NaN/inf; no id is consumed in that case.
    pub fn insert(&mut self, kind: Kind, pos: DVec2, vel: DVec2) -> Result<u64> {
        if !pos.is_finite() {
            return Err(Error::invalid(format!("position must be finite, got {pos}")));
        }
        if !vel.is_finite() {
            return Err(Error::invalid(format!("velocity must be finite, got {vel}")));
        }
        Ok(self.push(kind, pos, vel))
    }

    /// Spawn a particle at a random position with a random velocity
    fn spawn(&mut self, kind: Kind) -> u64 {
        let p = self.params;
        let x = sample_span(&mut self.rng, 0.0, p.arena_width - p.particle_size);
        let y = sample_span(
            &mut self.rng,
            p.header_height,
            p.arena_height - p.particle_size,
        );
        let vx = self.rng.random_range(-SPAWN_SPEED..SPAWN_SPEED) * p.speed_multiplier;
        let vy = self.rng.random_range(-SPAWN_SPEED..SPAWN_SPEED) * p.speed_multiplier;
        self.push(kind, DVec2::new(x, y), DVec2::new(vx, vy))
    }

    fn check_population(targets: &KindCounts) -> Result<()> {
        if targets.total() > MAX_POPULATION as u64 {
            return Err(Error::invalid(format!(
                "total population {} exceeds the maximum of {}",
                targets.total(),
                MAX_POPULATION
            )));
        }
        Ok(())
    }

    /// Grow or shrink each kind to its target count.
    ///
    /// Shrinking removes the most recently created particles of that kind
    /// (highest id first). Growing appends random particles, kinds in
    /// `Kind::ALL` order.
    pub fn resize(&mut self, targets: KindCounts) -> Result<()> {
        Self::check_population(&targets)?;

        let current = self.census().counts;
        let mut excess = [0u32; 3];
        for kind in Kind::ALL {
            excess[kind.index()] = current.get(kind).saturating_sub(targets.get(kind));
        }

        if excess.iter().any(|&n| n > 0) {
            let mut keep = vec![true; self.particles.len()];
            for (i, p) in self.particles.iter().enumerate().rev() {
                let slot = &mut excess[p.kind.index()];
                if *slot > 0 {
                    *slot -= 1;
                    keep[i] = false;
                }
            }
            let mut flags = keep.into_iter();
            self.particles.retain(|_| flags.next().unwrap_or(true));
        }

        for kind in Kind::ALL {
            let deficit = targets.get(kind).saturating_sub(current.get(kind));
            self.particles.reserve(deficit as usize);
            for _ in 0..deficit {
                self.spawn(kind);
            }
        }

        log::info!(
            "Resized population: paper={} rock={} scissors={} (was {}/{}/{})",
            targets.paper,
            targets.rock,
            targets.scissors,
            current.paper,
            current.rock,
            current.scissors
        );
        Ok(())
    }

    /// Discard every particle and spawn a fresh population. Ids keep increasing.
    pub fn repopulate(&mut self, targets: KindCounts) -> Result<()> {
        Self::check_population(&targets)?;
        self.particles.clear();
        self.resize(targets)
    }

    /// Change the speed multiplier and redraw every velocity magnitude.
    ///
    /// Each component keeps its sign; the magnitude becomes
    /// `uniform[0, RESCALE_SPEED) * v`. Zero components stay zero.
    pub fn set_speed_multiplier(&mut self, v: f64) -> Result<()> {
        check_speed(v)?;
        self.params.speed_multiplier = v;
        let rng = &mut self.rng;
        for p in &mut self.particles {
            let sx = heading(p.vel.x);
            let sy = heading(p.vel.y);
            let mx = rng.random_range(0.0..RESCALE_SPEED) * v;
            let my = rng.random_range(0.0..RESCALE_SPEED) * v;
            p.vel = DVec2::new(sx * mx, sy * my);
        }
        log::info!("Speed multiplier set to {v}");
        Ok(())
    }

    /// Particles outside the new geometry are clamped on the next step
    pub fn set_particle_size(&mut self, v: f64) -> Result<()> {
        check_size(v)?;
        self.params.particle_size = v;
        log::info!("Particle size set to {v}");
        Ok(())
    }

    /// Particles outside the new bounds are clamped on the next step
    pub fn set_arena_bounds(&mut self, width: f64, height: f64, header_height: f64) -> Result<()> {
        check_bounds(width, height, header_height)?;
        self.params.arena_width = width;
        self.params.arena_height = height;
        self.params.header_height = header_height;
        log::info!("Arena bounds set to {width}x{height} (header {header_height})");
        Ok(())
    }

    /// Settled positions and kinds, in ascending id order
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.particles
            .iter()
            .map(|p| ParticleView {
                id: p.id,
                kind: p.kind,
                x: p.pos.x,
                y: p.pos.y,
            })
            .collect()
    }

    pub fn census(&self) -> Census {
        Census::from_kinds(self.particles.iter().map(|p| p.kind))
    }
}
