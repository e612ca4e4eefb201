//! Input step: key presses steer the whole population at once.
//!
//! A raw key code is first translated into a [`Command`], then the command
//! is applied to every entity with a [`Velocity`]. One key-down event is
//! handled per call; holding two keys steers diagonally over two ticks.
//!
//! | key                | command                |
//! |--------------------|------------------------|
//! | `A` / Left         | `Nudge { dx: -1 }`     |
//! | `D` / Right        | `Nudge { dx: +1 }`     |
//! | `W` / Up           | `Nudge { dy: -1 }`     |
//! | `S` / Down         | `Nudge { dy: +1 }`     |
//! | Space              | `HaltAll`              |
//!
//! Escape is not an input command; the frame driver treats it as quit.

pub use winit::keyboard::KeyCode;

use crate::components::Velocity;
use crate::ecs::World;

/// What a key press asks the population to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add `(dx, dy)` to every velocity.
    Nudge { dx: f32, dy: f32 },
    /// Set every velocity to zero.
    HaltAll,
}

impl Command {
    /// Translate a key press. Keys without a binding yield `None`.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let nudge = |dx, dy| Some(Self::Nudge { dx, dy });
        match key {
            KeyCode::KeyA | KeyCode::ArrowLeft => nudge(-1.0, 0.0),
            KeyCode::KeyD | KeyCode::ArrowRight => nudge(1.0, 0.0),
            KeyCode::KeyW | KeyCode::ArrowUp => nudge(0.0, -1.0),
            KeyCode::KeyS | KeyCode::ArrowDown => nudge(0.0, 1.0),
            KeyCode::Space => Some(Self::HaltAll),
            _ => None,
        }
    }
}

/// Apply a command to every entity with a [`Velocity`].
pub fn apply_command(world: &mut World, command: Command) {
    match command {
        Command::HaltAll => {
            world.query::<(&mut Velocity,)>(|_, (vel,)| *vel = Velocity::ZERO);
        }
        // A zero delta would touch every entity for nothing.
        Command::Nudge { dx, dy } if dx == 0.0 && dy == 0.0 => {}
        Command::Nudge { dx, dy } => {
            world.query::<(&mut Velocity,)>(|_, (vel,)| {
                vel.dx += dx;
                vel.dy += dy;
            });
        }
    }
}

/// Translate and apply one key-down event. Returns the command that ran.
pub fn handle_key(world: &mut World, key: KeyCode) -> Option<Command> {
    let command = Command::from_key(key)?;
    log::debug!("key {:?} -> {:?}", key, command);
    apply_command(world, command);
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Color, Position};

    fn population() -> World {
        let mut world = World::new();
        world.spawn((Position::new(1.0, 1.0), Velocity::new(2.0, -3.0), Color::RED));
        world.spawn((Position::new(2.0, 2.0), Velocity::new(-5.0, 4.0), Color::RED));
        world.spawn((Position::new(3.0, 3.0), Velocity::new(0.0, 1.0), Color::RED));
        world
    }

    fn velocities(world: &mut World) -> Vec<Velocity> {
        let mut out = Vec::new();
        world.query::<(&Velocity,)>(|_, (v,)| out.push(*v));
        out
    }

    #[test]
    fn key_bindings() {
        use Command::*;
        let cases = [
            (KeyCode::KeyA, Nudge { dx: -1.0, dy: 0.0 }),
            (KeyCode::ArrowLeft, Nudge { dx: -1.0, dy: 0.0 }),
            (KeyCode::KeyD, Nudge { dx: 1.0, dy: 0.0 }),
            (KeyCode::ArrowRight, Nudge { dx: 1.0, dy: 0.0 }),
            (KeyCode::KeyW, Nudge { dx: 0.0, dy: -1.0 }),
            (KeyCode::ArrowUp, Nudge { dx: 0.0, dy: -1.0 }),
            (KeyCode::KeyS, Nudge { dx: 0.0, dy: 1.0 }),
            (KeyCode::ArrowDown, Nudge { dx: 0.0, dy: 1.0 }),
            (KeyCode::Space, HaltAll),
        ];
        for (key, expected) in cases {
            assert_eq!(Command::from_key(key), Some(expected), "{key:?}");
        }
        assert_eq!(Command::from_key(KeyCode::KeyQ), None);
        assert_eq!(Command::from_key(KeyCode::Escape), None);
    }

    #[test]
    fn right_then_up_adds_uniformly() {
        let mut world = population();
        let before = velocities(&mut world);

        handle_key(&mut world, KeyCode::ArrowRight);
        handle_key(&mut world, KeyCode::ArrowUp);

        let after = velocities(&mut world);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a.dx, b.dx + 1.0);
            assert_eq!(a.dy, b.dy - 1.0);
        }
    }

    #[test]
    fn halt_zeroes_every_velocity() {
        let mut world = population();
        handle_key(&mut world, KeyCode::Space);
        assert!(velocities(&mut world).iter().all(|v| *v == Velocity::ZERO));
    }

    #[test]
    fn halt_then_tick_leaves_positions_unchanged() {
        let mut world = population();
        handle_key(&mut world, KeyCode::Space);

        let mut before = Vec::new();
        world.query::<(&Position,)>(|_, (p,)| before.push(*p));
        crate::movement::update_positions(&mut world, (960.0, 540.0));
        let mut after = Vec::new();
        world.query::<(&Position,)>(|_, (p,)| after.push(*p));

        assert_eq!(before, after);
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut world = population();
        let before = velocities(&mut world);
        assert_eq!(handle_key(&mut world, KeyCode::KeyZ), None);
        assert_eq!(velocities(&mut world), before);
    }

    #[test]
    fn zero_nudge_is_noop() {
        let mut world = population();
        let before = velocities(&mut world);
        apply_command(&mut world, Command::Nudge { dx: 0.0, dy: 0.0 });
        assert_eq!(velocities(&mut world), before);
    }
}
