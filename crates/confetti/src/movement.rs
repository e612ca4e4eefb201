//! Simulation step: boundary reflection and integration.
//!
//! Each axis is handled on its own. The edge test reads the position left by
//! the previous tick, before this tick's displacement is added, so a piece
//! can sit past an edge by up to one tick's displacement before the flipped
//! velocity carries it back. Positions are never clamped.

use crate::components::{Position, Velocity};
use crate::ecs::World;

/// Advance every entity with {Position, Velocity} by one tick inside the
/// domain `[0, width] x [0, height]`.
pub fn update_positions(world: &mut World, bounds: (f32, f32)) {
    let (width, height) = bounds;
    world.query::<(&mut Position, &mut Velocity)>(|_, (pos, vel)| {
        step_axis(&mut pos.x, &mut vel.dx, width);
        step_axis(&mut pos.y, &mut vel.dy, height);
    });
}

/// Flip `velocity` if `position` is on or past either edge, then integrate.
#[inline]
fn step_axis(position: &mut f32, velocity: &mut f32, bound: f32) {
    if *position >= bound || *position <= 0.0 {
        *velocity = -*velocity;
    }
    *position += *velocity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Color;

    const BOUNDS: (f32, f32) = (960.0, 540.0);

    fn single(pos: Position, vel: Velocity) -> (World, crate::ecs::Entity) {
        let mut world = World::new();
        let e = world.spawn((pos, vel, Color::rgb(200, 100, 80)));
        (world, e)
    }

    #[test]
    fn interior_step_integrates_without_flip() {
        let (mut world, e) = single(Position::new(5.0, 100.0), Velocity::new(-3.0, 2.0));
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Position>(e), Some(&Position::new(2.0, 102.0)));
        assert_eq!(world.get::<Velocity>(e), Some(&Velocity::new(-3.0, 2.0)));
    }

    #[test]
    fn left_edge_flips_then_integrates() {
        let (mut world, e) = single(Position::new(0.0, 50.0), Velocity::new(-4.0, 1.0));
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Velocity>(e), Some(&Velocity::new(4.0, 1.0)));
        assert_eq!(world.get::<Position>(e), Some(&Position::new(4.0, 51.0)));
    }

    #[test]
    fn far_edges_flip_at_or_beyond_bound() {
        let (mut world, e) = single(Position::new(960.0, 545.0), Velocity::new(3.0, 2.0));
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Velocity>(e), Some(&Velocity::new(-3.0, -2.0)));
        assert_eq!(world.get::<Position>(e), Some(&Position::new(957.0, 543.0)));
    }

    #[test]
    fn reflection_is_one_tick_late() {
        // 958 is inside, so this tick overshoots to 963 before any flip.
        let (mut world, e) = single(Position::new(958.0, 270.0), Velocity::new(5.0, 0.0));
        update_positions(&mut world, BOUNDS);
        let pos = *world.get::<Position>(e).unwrap();
        assert_eq!(pos.x, 963.0);
        assert!(pos.x - BOUNDS.0 <= 5.0);
        assert_eq!(world.get::<Velocity>(e).unwrap().dx, 5.0);

        // Next tick sees the overshoot and reflects.
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Velocity>(e).unwrap().dx, -5.0);
        assert_eq!(world.get::<Position>(e).unwrap().x, 958.0);
    }

    #[test]
    fn flips_once_per_crossing() {
        let (mut world, e) = single(Position::new(950.0, 270.0), Velocity::new(4.0, 0.0));
        let mut flips = 0;
        let mut last = 4.0f32;
        for _ in 0..20 {
            update_positions(&mut world, BOUNDS);
            let dx = world.get::<Velocity>(e).unwrap().dx;
            if dx.signum() != last.signum() {
                flips += 1;
            }
            last = dx;
        }
        // 950 -> 954 -> 958 -> 962 (past) -> flip -> 958 ... heads back left.
        assert_eq!(flips, 1);
        assert!(world.get::<Position>(e).unwrap().x < 960.0);
    }

    #[test]
    fn zero_velocity_on_edge_stays_put() {
        let (mut world, e) = single(Position::new(0.0, 0.0), Velocity::ZERO);
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Position>(e), Some(&Position::new(0.0, 0.0)));
    }

    #[test]
    fn entities_without_velocity_are_skipped() {
        let mut world = World::new();
        let still = world.spawn((Position::new(10.0, 10.0), Color::RED));
        update_positions(&mut world, BOUNDS);
        assert_eq!(world.get::<Position>(still), Some(&Position::new(10.0, 10.0)));
    }
}
