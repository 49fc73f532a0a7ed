//! Boundary collision response
//!
//! Reflection against the four canvas edges with energy damping, plus the
//! rest heuristic that keeps the floor bounce from oscillating forever.

use glam::Vec2;

use super::state::Body;

/// Which of the top/left/right edges fired this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeHits {
    pub top: bool,
    pub left: bool,
    pub right: bool,
}

impl EdgeHits {
    pub fn any(&self) -> bool {
        self.top || self.left || self.right
    }
}

/// Bounce the body off the floor, damping the reflected velocity.
///
/// When the reflected bounce can no longer overcome one tick of gravity,
/// the body is snapped to rest just above the floor. The threshold is a
/// stopping heuristic, not an exact rest detector; without it the
/// reflection would micro-bounce indefinitely.
///
/// Returns the impact speed when a live reflection fired; `None` on a miss
/// or when the body settled into rest.
pub fn collide_floor(
    body: &mut Body,
    bounds: Vec2,
    gravity_y: f32,
    bounce_factor: f32,
) -> Option<f32> {
    let floor = bounds.y - body.size.y;
    if body.pos.y < floor {
        return None;
    }

    let impact_speed = body.vel.y.abs();
    // Reflect the overshoot back above the floor
    body.pos.y = floor - (body.pos.y - floor);
    body.vel.y = -impact_speed * bounce_factor;

    if body.vel.y >= -gravity_y {
        body.vel.y = 0.0;
        body.pos.y = floor - gravity_y;
        return None;
    }

    Some(impact_speed)
}

/// Reflect off the top, left, and right edges, clamping back into bounds.
///
/// Each edge is checked independently every tick; a corner hit reflects
/// both axes in the same tick.
pub fn collide_walls(body: &mut Body, bounds: Vec2, bounce_factor: f32) -> EdgeHits {
    let mut hits = EdgeHits::default();

    if body.pos.y <= 0.0 {
        body.vel.y = body.vel.y.abs() * bounce_factor;
        body.pos.y = 0.0;
        hits.top = true;
    }
    if body.pos.x <= 0.0 {
        body.vel.x = body.vel.x.abs() * bounce_factor;
        body.pos.x = 0.0;
        hits.left = true;
    }
    if body.pos.x + body.size.x >= bounds.x {
        body.vel.x = -body.vel.x.abs() * bounce_factor;
        body.pos.x = bounds.x - body.size.x;
        hits.right = true;
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(200.0, 100.0);

    fn falling_body(pos: Vec2, vel: Vec2) -> Body {
        let mut body = Body::new(pos, Vec2::splat(10.0));
        body.vel = vel;
        body
    }

    #[test]
    fn test_floor_reflects_overshoot() {
        // Floor is at y=90; the body overshot it by 4
        let mut body = falling_body(Vec2::new(50.0, 94.0), Vec2::new(0.0, 8.0));

        let impact = collide_floor(&mut body, BOUNDS, 0.1, 0.9);
        assert_eq!(impact, Some(8.0));
        assert_eq!(body.pos.y, 86.0);
        assert_eq!(body.vel.y, -8.0 * 0.9);
    }

    #[test]
    fn test_floor_miss() {
        let mut body = falling_body(Vec2::new(50.0, 40.0), Vec2::new(0.0, 8.0));
        assert_eq!(collide_floor(&mut body, BOUNDS, 0.1, 0.9), None);
        assert_eq!(body.pos.y, 40.0);
        assert_eq!(body.vel.y, 8.0);
    }

    #[test]
    fn test_floor_rest_threshold() {
        // Impact slow enough that the damped bounce cannot beat one tick of
        // gravity: snapped to rest just above the floor
        let mut body = falling_body(Vec2::new(50.0, 90.05), Vec2::new(0.0, 0.1));

        let impact = collide_floor(&mut body, BOUNDS, 0.1, 0.9);
        assert_eq!(impact, None);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.pos.y, 90.0 - 0.1);
    }

    #[test]
    fn test_wall_left_reflects_rightward() {
        let mut body = falling_body(Vec2::new(-2.0, 50.0), Vec2::new(-2.0, 0.0));

        let hits = collide_walls(&mut body, BOUNDS, 0.9);
        assert!(hits.left && !hits.top && !hits.right);
        assert_eq!(body.pos.x, 0.0);
        assert_eq!(body.vel.x, 2.0 * 0.9);
    }

    #[test]
    fn test_wall_right_reflects_leftward() {
        let mut body = falling_body(Vec2::new(195.0, 50.0), Vec2::new(3.0, 0.0));

        let hits = collide_walls(&mut body, BOUNDS, 0.9);
        assert!(hits.right);
        assert_eq!(body.pos.x, 190.0);
        assert_eq!(body.vel.x, -3.0 * 0.9);
    }

    #[test]
    fn test_wall_top_reflects_downward() {
        let mut body = falling_body(Vec2::new(50.0, -1.0), Vec2::new(0.0, -4.0));

        let hits = collide_walls(&mut body, BOUNDS, 0.9);
        assert!(hits.top);
        assert_eq!(body.pos.y, 0.0);
        assert_eq!(body.vel.y, 4.0 * 0.9);
    }

    #[test]
    fn test_corner_hits_two_edges_in_one_tick() {
        let mut body = falling_body(Vec2::new(-1.0, -1.0), Vec2::new(-2.0, -2.0));

        let hits = collide_walls(&mut body, BOUNDS, 0.9);
        assert!(hits.top && hits.left);
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.vel, Vec2::new(2.0 * 0.9, 2.0 * 0.9));
    }
}
