//! Fixed timestep simulation tick
//!
//! One tick runs three phases over the whole population:
//! 1. integrate and resolve walls for every particle
//! 2. scan every unordered pair for contact
//! 3. convert the losing particle of each contact, in pair order
//!
//! Conversions are applied as soon as a pair is visited, so a particle
//! converted earlier in the tick meets later partners with its new kind.

use super::collision::{in_contact, resolve_walls};
use super::kind::Kind;
use super::state::{Particle, ParticleStore, SimParams};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// Pairs closer than the contact radius
    pub contacts: u32,
    /// Contacts that changed a particle's kind
    pub conversions: u32,
    /// Particles that touched any wall
    pub wall_hits: u32,
}

/// Advance the store by one tick
pub fn step(store: &mut ParticleStore) -> StepSummary {
    step_by(store, 1.0)
}

/// Advance the store by `dt_ticks` ticks worth of motion.
///
/// Velocities are expressed per tick, so `dt_ticks` is normally 1; fractional
/// values are accepted for determinism tests. Contact resolution runs once
/// regardless of `dt_ticks`.
pub fn step_by(store: &mut ParticleStore, dt_ticks: f64) -> StepSummary {
    let (params, particles) = store.engine_view();
    let wall_hits = advance_positions(particles, params, dt_ticks);
    let (contacts, conversions) = resolve_contacts(particles, params.contact_radius());

    store.time_ticks += 1;

    let summary = StepSummary {
        contacts,
        conversions,
        wall_hits,
    };
    if summary.conversions > 0 {
        log::debug!(
            "Tick {}: {} contacts, {} conversions",
            store.time_ticks,
            summary.contacts,
            summary.conversions
        );
    }
    summary
}

/// Integrate and bounce every particle. Returns how many touched a wall.
fn advance_positions(particles: &mut [Particle], params: &SimParams, dt_ticks: f64) -> u32 {
    let mut hits = 0;
    for p in particles.iter_mut() {
        let next = p.pos + p.vel * dt_ticks;
        let resolved = resolve_walls(next, p.vel, params);
        p.pos = resolved.pos;
        p.vel = resolved.vel;
        if resolved.hits.any() {
            hits += 1;
        }
    }
    hits
}

/// Scan all pairs `i < j` and convert losers in place.
fn resolve_contacts(particles: &mut [Particle], contact_radius: f64) -> (u32, u32) {
    let mut contacts = 0;
    let mut conversions = 0;
    let n = particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if !in_contact(particles[i].pos, particles[j].pos, contact_radius) {
                continue;
            }
            contacts += 1;
            let (a, b) = (particles[i].kind, particles[j].kind);
            match Kind::winner(a, b) {
                Some(w) if w == a => {
                    particles[j].kind = w;
                    conversions += 1;
                }
                Some(w) => {
                    particles[i].kind = w;
                    conversions += 1;
                }
                None => {}
            }
        }
    }
    (contacts, conversions)
}
