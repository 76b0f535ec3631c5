//! Wall bounces and particle contact tests
//!
//! Walls are resolved on the tentative (post-integration) position. The left,
//! right and bottom walls only reflect velocity for the next tick; the header
//! band also snaps the particle onto its edge.

use glam::DVec2;

use super::state::SimParams;

/// Which boundaries a particle touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub side: bool,
    pub bottom: bool,
    pub header: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.side || self.bottom || self.header
    }
}

/// Result of resolving walls for one particle
#[derive(Debug, Clone, Copy)]
pub struct WallResult {
    pub pos: DVec2,
    pub vel: DVec2,
    pub hits: WallHits,
}

/// Resolve walls for a particle whose tentative position is `next`.
///
/// `vel` is the velocity that produced `next`; the returned velocity is the
/// one to use on the following tick.
pub fn resolve_walls(next: DVec2, vel: DVec2, params: &SimParams) -> WallResult {
    let extent = params.wall_extent();
    let header = params.header_height;
    let mut pos = next;
    let mut out_vel = vel;
    let mut hits = WallHits::default();

    if pos.x <= 0.0 || pos.x + extent >= params.arena_width {
        out_vel.x = -vel.x;
        hits.side = true;
    }

    if pos.y + extent >= params.arena_height {
        out_vel.y = -vel.y;
        hits.bottom = true;
    }

    // Header wins over the bottom wall when both fire
    if pos.y <= header {
        out_vel.y = vel.y.abs();
        pos.y = header;
        hits.header = true;
    }

    // min-then-max: degenerate arenas collapse onto the lower bound
    pos.x = pos.x.min(params.arena_width - extent).max(0.0);
    pos.y = pos.y.min(params.arena_height - extent).max(header);

    WallResult {
        pos,
        vel: out_vel,
        hits,
    }
}

/// True when two particle centers are strictly closer than the contact radius
#[inline]
pub fn in_contact(a: DVec2, b: DVec2, contact_radius: f64) -> bool {
    a.distance(b) < contact_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimParams {
        SimParams {
            particle_size: 10.0,
            speed_multiplier: 1.0,
            arena_width: 200.0,
            arena_height: 100.0,
            header_height: 20.0,
        }
    }

    #[test]
    fn test_free_flight_untouched() {
        let r = resolve_walls(DVec2::new(50.0, 50.0), DVec2::new(2.0, -1.0), &params());
        assert_eq!(r.pos, DVec2::new(50.0, 50.0));
        assert_eq!(r.vel, DVec2::new(2.0, -1.0));
        assert!(!r.hits.any());
    }

    #[test]
    fn test_left_wall_reflects_and_clamps() {
        let r = resolve_walls(DVec2::new(-3.0, 50.0), DVec2::new(-4.0, 1.0), &params());
        assert_eq!(r.vel, DVec2::new(4.0, 1.0));
        assert_eq!(r.pos.x, 0.0);
        assert!(r.hits.side);
    }

    #[test]
    fn test_right_wall_uses_extent() {
        // 186 + 15 >= 200
        let r = resolve_walls(DVec2::new(186.0, 50.0), DVec2::new(3.0, 0.0), &params());
        assert_eq!(r.vel.x, -3.0);
        assert_eq!(r.pos.x, 185.0);
    }

    #[test]
    fn test_reflection_is_not_abs() {
        // Particle already moving away from the left wall still gets its x flipped
        let r = resolve_walls(DVec2::new(0.0, 50.0), DVec2::new(2.0, 0.0), &params());
        assert_eq!(r.vel.x, -2.0);
    }

    #[test]
    fn test_bottom_wall_reflects() {
        let r = resolve_walls(DVec2::new(50.0, 90.0), DVec2::new(0.0, 5.0), &params());
        assert_eq!(r.vel.y, -5.0);
        assert_eq!(r.pos.y, 85.0);
        assert!(r.hits.bottom);
    }

    #[test]
    fn test_header_snaps_and_forces_downward() {
        let r = resolve_walls(DVec2::new(50.0, 12.5), DVec2::new(1.0, -7.5), &params());
        assert_eq!(r.pos.y, 20.0);
        assert_eq!(r.vel.y, 7.5);
        assert!(r.hits.header);

        // Moving down but touching the band still ends up non-negative
        let r = resolve_walls(DVec2::new(50.0, 20.0), DVec2::new(0.0, 2.0), &params());
        assert_eq!(r.vel.y, 2.0);
    }

    #[test]
    fn test_degenerate_arena_collapses_to_lower_bound() {
        let tiny = SimParams {
            arena_width: 5.0,
            arena_height: 5.0,
            header_height: 3.0,
            ..params()
        };
        let r = resolve_walls(DVec2::new(40.0, 40.0), DVec2::new(1.0, 1.0), &tiny);
        assert_eq!(r.pos, DVec2::new(0.0, 3.0));
        assert!(r.vel.is_finite());
    }

    #[test]
    fn test_contact_is_strict() {
        assert!(in_contact(DVec2::ZERO, DVec2::new(19.9, 0.0), 20.0));
        assert!(!in_contact(DVec2::ZERO, DVec2::new(20.0, 0.0), 20.0));
        assert!(in_contact(DVec2::ZERO, DVec2::new(12.0, 12.0), 20.0));
    }
}
