//! # Render2d: Filled Rectangles
//!
//! The render step only needs four things from whatever it draws on: pick a
//! color, fill a rectangle, clear, present. [`DrawSurface`] is that seam.
//!
//! ```text
//!  Position + Color             DrawSurface
//!       │  │  │ ...                 ▲
//!       ▼  ▼  ▼                     │ set_draw_color / fill_rect
//!  ┌──────────────────┐             │
//!  │  draw_confetti   │ ────────────┘
//!  └──────────────────┘
//!
//!  GpuSurface: fill_rect appends a quad to a CPU batch; present uploads
//!  the batch and issues one indexed draw inside one render pass.
//! ```
//!
//! The draw color is sticky state, as in most immediate-mode 2D APIs:
//! `clear` fills with it, and `draw_confetti` leaves it opaque black so the
//! next frame clears to black. A fresh surface starts out red, so the very
//! first frame clears to red.

pub(crate) mod pipeline;
pub mod surface;
pub(crate) mod vertex;

pub use surface::GpuSurface;

use crate::components::{Color, Position};
use crate::ecs::World;

/// Draw color of a surface that has not drawn anything yet.
pub(crate) const INITIAL_DRAW_COLOR: Color = Color::RED;

/// An axis-aligned rectangle in window pixels, `(x, y)` at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left and bottom-right corners as floats.
    pub(crate) fn corners(self) -> ([f32; 2], [f32; 2]) {
        let min = [self.x as f32, self.y as f32];
        let max = [min[0] + self.w as f32, min[1] + self.h as f32];
        (min, max)
    }
}

/// Something the render step can draw on.
pub trait DrawSurface {
    /// Fill the whole surface with the current draw color, discarding
    /// anything drawn since the last present.
    fn clear(&mut self);

    fn set_draw_color(&mut self, color: Color);

    /// Fill `rect` with the current draw color.
    fn fill_rect(&mut self, rect: Rect);

    /// Show everything drawn since the last clear.
    fn present(&mut self);
}

/// Draw every entity with {Position, Color} as a `size x size` square whose
/// top-left corner is the position truncated to whole pixels. Leaves the
/// draw color set to opaque black.
pub fn draw_confetti(world: &mut World, surface: &mut impl DrawSurface, size: u32) {
    world.query::<(&Position, &Color)>(|_, (pos, color)| {
        surface.set_draw_color(*color);
        surface.fill_rect(Rect::new(pos.x as i32, pos.y as i32, size, size));
    });
    surface.set_draw_color(Color::BLACK);
}


#[cfg(test)]
mod tests {
    use super::recording::RecordingSurface;
    use super::*;
    use crate::components::Velocity;

    #[test]
    fn one_square_per_entity_at_truncated_position() {
        let mut world = World::new();
        let teal = Color::rgb(80, 200, 180);
        let pink = Color::rgba(255, 120, 200, 128);
        world.spawn((Position::new(12.9, 7.2), Velocity::ZERO, teal));
        world.spawn((Position::new(-0.5, 539.99), Velocity::ZERO, pink));

        let mut surface = RecordingSurface::new();
        draw_confetti(&mut world, &mut surface, 4);

        let mut fills = surface.fills();
        fills.sort_by_key(|(r, _)| r.x);
        assert_eq!(
            fills,
            vec![
                (Rect::new(0, 539, 4, 4), pink),
                (Rect::new(12, 7, 4, 4), teal),
            ]
        );
    }

    #[test]
    fn ends_with_black_draw_color() {
        let mut world = World::new();
        world.spawn((Position::new(1.0, 1.0), Color::rgb(90, 90, 90)));
        let mut surface = RecordingSurface::new();
        draw_confetti(&mut world, &mut surface, 4);
        assert_eq!(surface.color, Color::BLACK);
        assert_eq!(
            surface.calls.last(),
            Some(&recording::DrawCall::SetColor(Color::BLACK))
        );
    }

    #[test]
    fn entities_without_color_are_not_drawn() {
        let mut world = World::new();
        world.spawn((Position::new(1.0, 1.0), Velocity::new(1.0, 1.0)));
        let mut surface = RecordingSurface::new();
        draw_confetti(&mut world, &mut surface, 4);
        assert!(surface.fills().is_empty());
        assert_eq!(surface.color, Color::BLACK);
    }

    #[test]
    fn rect_corners() {
        assert_eq!(Rect::new(-2, 3, 4, 4).corners(), ([-2.0, 3.0], [2.0, 7.0]));
    }
}
