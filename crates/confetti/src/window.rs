//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`]: creates the window
//! and GPU surface on the first `resumed`, turns window events into
//! [`PlatformEvent`]s for the frame driver, and runs one driver tick per
//! `RedrawRequested`.
//!
//! Hidden windows (occluded or minimized) get no redraws on most
//! platforms, so while hidden the loop polls and ticks from
//! `about_to_wait` instead. That keeps a queued close request from waiting
//! until the window is shown again.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize, Position};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::Config;
use crate::driver::{FrameDriver, PlatformEvent};
use crate::error::InitError;
use crate::render::GpuContext;
use crate::render2d::GpuSurface;
use crate::scene::Scene;
use crate::time::SystemClock;

/// Why the window may not be receiving redraws.
#[derive(Debug, Default, Clone, Copy)]
struct Visibility {
    occluded: bool,
    minimized: bool,
}

impl Visibility {
    fn redraws_arrive(self) -> bool {
        !self.occluded && !self.minimized
    }
}

/// Top-left corner that centers `window` on a monitor, clamped so the
/// window never starts above or left of the monitor.
fn centered_origin(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |screen: u32, win: u32| (screen.saturating_sub(win) / 2) as i32;
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor_size.width, window.width),
        monitor_origin.y + offset(monitor_size.height, window.height),
    )
}

/// The application state that winit drives.
pub(crate) struct WinitApp {
    title: String,
    config: Config,
    window: Option<Arc<Window>>,
    visibility: Visibility,
    driver: FrameDriver<GpuSurface, SystemClock>,
    /// First startup failure, handed back to `Game::run`.
    error: Option<InitError>,
}

impl WinitApp {
    pub fn new(title: String, config: Config) -> Self {
        let driver = FrameDriver::new(SystemClock, config.frame_delay());
        Self {
            title,
            config,
            window: None,
            visibility: Visibility::default(),
            driver,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<InitError> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let cfg = &self.config;
        let mut attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
            .with_resizable(false);
        if let Some(position) = window_position(event_loop, cfg) {
            attrs = attrs.with_position(position);
        }
        if cfg.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(attrs).map_err(InitError::Window)?);
        log::info!("Window created...");

        let gpu = GpuContext::new(window.clone())?;
        let surface = GpuSurface::new(gpu, cfg.width, cfg.height);
        log::info!("Renderer created...");

        let scene = Scene::new(cfg);
        self.driver.start(scene, surface);

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn run_tick(&mut self, event_loop: &ActiveEventLoop) {
        self.driver.tick();

        if self.driver.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            self.window = None;
            event_loop.exit();
        }
    }
}

/// The configured position, or the primary monitor's center. `None` when
/// there is no monitor to center on.
fn window_position(event_loop: &ActiveEventLoop, cfg: &Config) -> Option<Position> {
    if let Some((x, y)) = cfg.position {
        return Some(LogicalPosition::new(x, y).into());
    }
    let monitor = event_loop.primary_monitor()?;
    let window = LogicalSize::new(cfg.width, cfg.height).to_physical(monitor.scale_factor());
    Some(centered_origin(monitor.position(), monitor.size(), window).into())
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.driver.push_event(PlatformEvent::CloseRequested);
            }

            WindowEvent::Destroyed => {
                self.driver.push_event(PlatformEvent::Quit);
            }

            WindowEvent::Occluded(occluded) => {
                self.visibility.occluded = occluded;
            }

            WindowEvent::Resized(size) => {
                self.visibility.minimized = size.width == 0 || size.height == 0;
                if let Some(surface) = self.driver.surface_mut() {
                    surface.resize(size.width, size.height);
                }
            }

            // Auto-repeat arrives as more presses; they count as key-downs.
            WindowEvent::KeyboardInput { event, .. } => {
                if let (PhysicalKey::Code(key), ElementState::Pressed) =
                    (event.physical_key, event.state)
                {
                    self.driver.push_event(PlatformEvent::KeyDown(key));
                }
            }

            WindowEvent::RedrawRequested => self.run_tick(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.is_running() && !self.visibility.redraws_arrive() {
            event_loop.set_control_flow(ControlFlow::Poll);
            self.run_tick(event_loop);
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.error.is_none() {
            self.driver.shutdown();
        }
        self.window = None;
    }
}
