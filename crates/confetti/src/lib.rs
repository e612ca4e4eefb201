//! # Confetti
//!
//! A thousand colored squares bouncing around a window, driven by a small
//! archetype ECS, a fixed-interval frame loop, and a wgpu quad renderer.
//!
//! Start with `use confetti::prelude::*` and run a [`Game`](game::Game).

pub mod components;
pub mod config;
pub mod driver;
pub mod ecs;
pub mod error;
pub mod game;
pub mod input;
pub mod movement;
pub mod prelude;
pub mod render;
pub mod render2d;
pub mod scene;
pub mod time;
pub(crate) mod window;
