//! Convenience re-exports: `use confetti::prelude::*` for the common items.

pub use crate::components::{Color, Position, Velocity};
pub use crate::config::{Config, WINDOW_TITLE};
pub use crate::driver::{DriverState, FrameDriver, PlatformEvent};
pub use crate::ecs::{Entity, World};
pub use crate::error::InitError;
pub use crate::game::Game;
pub use crate::input::{Command, KeyCode};
pub use crate::render2d::{DrawSurface, Rect};
pub use crate::scene::Scene;
pub use crate::time::{Clock, SystemClock, Time};
