//! The confetti scene: one world, the domain it bounces in, and the three
//! per-frame steps.

use std::ops::RangeInclusive;

use rand::distributions::uniform::SampleUniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{Color, Position, Velocity};
use crate::config::Config;
use crate::ecs::World;
use crate::input::{self, Command, KeyCode};
use crate::movement;
use crate::render2d::{self, DrawSurface};

pub struct Scene {
    world: World,
    bounds: (f32, f32),
    confetti_size: u32,
}

impl Scene {
    /// Spawn `config.population` confetti pieces. Uses `config.seed` when
    /// set, OS entropy otherwise.
    pub fn new(config: &Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut world = World::new();
        spawn_confetti(&mut world, config, &mut rng);
        log::info!("Scene initialized...");
        Self {
            world,
            bounds: config.bounds(),
            confetti_size: config.confetti_size,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn bounds(&self) -> (f32, f32) {
        self.bounds
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<Command> {
        input::handle_key(&mut self.world, key)
    }

    pub fn update(&mut self) {
        movement::update_positions(&mut self.world, self.bounds);
    }

    pub fn render(&mut self, surface: &mut impl DrawSurface) {
        render2d::draw_confetti(&mut self.world, surface, self.confetti_size);
    }

    /// Release every entity.
    pub fn clean(&mut self) {
        self.world.clear();
    }
}

/// Spawn `config.population` entities with randomized records.
///
/// Positions are whole pixels at least `spawn_margin` from every edge.
/// Each axis draws its own speed; the spawn index picks the signs (`dx`
/// positive for odd indices, `dy` positive unless the index is a multiple
/// of three).
pub fn spawn_confetti(world: &mut World, config: &Config, rng: &mut impl Rng) {
    let margin = config.spawn_margin;
    let x_range = margin..=config.width.saturating_sub(margin).max(margin);
    let y_range = margin..=config.height.saturating_sub(margin).max(margin);

    let speed = &config.speed_range;
    let channel = &config.color_channel_range;

    for i in 0..config.population {
        let x = sample(rng, &x_range) as f32;
        let y = sample(rng, &y_range) as f32;

        let speed_x = sample(rng, speed) as f32;
        let speed_y = sample(rng, speed) as f32;
        let dx = if i % 2 != 0 { speed_x } else { -speed_x };
        let dy = if i % 3 != 0 { speed_y } else { -speed_y };

        let color = Color::rgb(
            sample(rng, channel),
            sample(rng, channel),
            sample(rng, channel),
        );

        world.spawn((Position::new(x, y), Velocity::new(dx, dy), color));
    }
}

/// Uniform draw from `range`; an empty range (`start > end`) yields its
/// start instead of panicking.
fn sample<T>(rng: &mut impl Rng, range: &RangeInclusive<T>) -> T
where
    T: SampleUniform + PartialOrd + Copy,
{
    if range.is_empty() {
        *range.start()
    } else {
        rng.gen_range(range.clone())
    }
}
