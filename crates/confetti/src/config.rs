//! Compile-time settings.
//!
//! The constants are the shipped values. [`Config`] bundles them so the
//! [`Game`](crate::game::Game) builder and the tests can run the same
//! code with a smaller window, fewer pieces, or a fixed seed.

use std::ops::RangeInclusive;
use std::time::Duration;

pub const WINDOW_TITLE: &str = "EnTT Confetti Party";
pub const WINDOW_WIDTH: u32 = 960;
pub const WINDOW_HEIGHT: u32 = 540;

pub const FPS: u32 = 60;
/// Whole milliseconds per frame, truncated (16 ms at 60 fps).
pub const FRAME_DELAY_MS: u64 = 1000 / FPS as u64;

pub const NUM_CONFETTI: usize = 1000;
/// Side length of each drawn square, in pixels.
pub const CONFETTI_SIZE: u32 = 4;

/// Distance from the window edge kept free when placing pieces.
pub const SPAWN_MARGIN: u32 = 10;
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=5;
pub const COLOR_CHANNEL_RANGE: RangeInclusive<u8> = 80..=255;

/// Everything the game reads at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    /// Top-left window position in logical pixels. `None` centers the
    /// window on the primary monitor.
    pub position: Option<(i32, i32)>,
    pub fullscreen: bool,
    pub fps: u32,
    pub population: usize,
    pub confetti_size: u32,
    pub spawn_margin: u32,
    /// Per-axis speed in pixels per tick. An empty range spawns every
    /// piece at its start value.
    pub speed_range: RangeInclusive<u32>,
    /// Range for each of r, g, b. Empty ranges behave as above.
    pub color_channel_range: RangeInclusive<u8>,
    /// Fixed RNG seed for reproducible spawns. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    /// Target time per tick. Integer milliseconds, like [`FRAME_DELAY_MS`].
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }

    /// Bounds of the reflection domain.
    pub fn bounds(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            position: None,
            fullscreen: false,
            fps: FPS,
            population: NUM_CONFETTI,
            confetti_size: CONFETTI_SIZE,
            spawn_margin: SPAWN_MARGIN,
            speed_range: SPEED_RANGE,
            color_channel_range: COLOR_CHANNEL_RANGE,
            seed: None,
        }
    }
}
