//! # Frame Driver
//!
//! Owns the scene and the draw surface and runs them one tick at a time.
//! It knows nothing about winit: the window adapter translates OS events
//! into [`PlatformEvent`]s, queues them here, and calls [`FrameDriver::tick`]
//! once per redraw.
//!
//! ```text
//!           start(scene, surface)            quit / close / Escape
//!  Stopped ──────────────────────▶ Running ─────────────────────────▶ Stopped
//!                                   │  ▲                               (final)
//!                                   └──┘ tick
//! ```
//!
//! One tick:
//!
//! 1. note the start time
//! 2. pop at most one queued event; quit events stop the driver, key-downs
//!    go to the input step
//! 3. update positions
//! 4. clear, draw, present
//! 5. sleep whatever is left of the frame interval
//!
//! A tick that sees a quit event still finishes steps 3 to 5, then shuts
//! down. Events left in the queue at that point are dropped.

use std::collections::VecDeque;
use std::time::Duration;

use crate::input::KeyCode;
use crate::render2d::DrawSurface;
use crate::scene::Scene;
use crate::time::{Clock, FramePacer, Time};

/// Window-system events the driver cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    KeyDown(KeyCode),
    CloseRequested,
    /// The platform asked the application to terminate.
    Quit,
}

impl PlatformEvent {
    fn stops_driver(self) -> bool {
        matches!(
            self,
            Self::CloseRequested | Self::Quit | Self::KeyDown(KeyCode::Escape)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
}

pub struct FrameDriver<S: DrawSurface, C: Clock> {
    state: DriverState,
    /// Set once `shutdown` has run; the driver never restarts.
    finished: bool,
    scene: Option<Scene>,
    surface: Option<S>,
    events: VecDeque<PlatformEvent>,
    clock: C,
    pacer: FramePacer,
}

impl<S: DrawSurface, C: Clock> FrameDriver<S, C> {
    pub fn new(clock: C, frame_delay: Duration) -> Self {
        let pacer = FramePacer::new(frame_delay, clock.now());
        Self {
            state: DriverState::Stopped,
            finished: false,
            scene: None,
            surface: None,
            events: VecDeque::new(),
            clock,
            pacer,
        }
    }

    /// Hand over a populated scene and a ready surface and start running.
    /// Ignored once the driver has shut down.
    pub fn start(&mut self, scene: Scene, surface: S) {
        if self.finished {
            log::warn!("frame driver already shut down; start ignored");
            return;
        }
        self.scene = Some(scene);
        self.surface = Some(surface);
        self.state = DriverState::Running;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn time(&self) -> &Time {
        self.pacer.time()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Queue an event for a later tick. Events arriving while stopped are
    /// dropped.
    pub fn push_event(&mut self, event: PlatformEvent) {
        if self.is_running() {
            self.events.push_back(event);
        }
    }

    /// Run one tick. Does nothing unless the driver is running.
    pub fn tick(&mut self) {
        let (Some(scene), Some(surface)) = (self.scene.as_mut(), self.surface.as_mut()) else {
            return;
        };
        if self.state != DriverState::Running {
            return;
        }

        self.pacer.begin(self.clock.now());

        let mut keep_running = true;
        match self.events.pop_front() {
            Some(event) if event.stops_driver() => {
                log::debug!("{event:?} received, stopping");
                keep_running = false;
            }
            Some(PlatformEvent::KeyDown(key)) => {
                scene.handle_key(key);
            }
            _ => {}
        }

        scene.update();

        surface.clear();
        scene.render(surface);
        surface.present();

        if let Some(rest) = self.pacer.finish(self.clock.now()) {
            self.clock.sleep(rest);
        }

        if !keep_running {
            self.shutdown();
        }
    }

    /// Clear the scene and release the surface. Safe to call repeatedly;
    /// only the first call does anything.
    pub fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.state = DriverState::Stopped;
        self.events.clear();
        if let Some(scene) = self.scene.as_mut() {
            scene.clean();
        }
        self.surface = None;
        log::info!("Subsystems released!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Color, Position, Velocity};
    use crate::config::Config;
    use crate::ecs::Entity;
    use crate::render2d::Rect;
    use crate::render2d::recording::RecordingSurface;
    use crate::time::manual::ManualClock;

    const DELAY: Duration = Duration::from_millis(16);

    /// Counts frames without keeping the draw calls.
    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        fills: usize,
        presents: usize,
    }

    impl DrawSurface for CountingSurface {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn set_draw_color(&mut self, _: Color) {}
        fn fill_rect(&mut self, _: Rect) {
            self.fills += 1;
        }
        fn present(&mut self) {
            self.presents += 1;
        }
    }

    fn config(population: usize) -> Config {
        Config {
            population,
            seed: Some(99),
            ..Config::default()
        }
    }

    fn running<S: DrawSurface>(population: usize, surface: S) -> FrameDriver<S, ManualClock> {
        let mut driver = FrameDriver::new(ManualClock::new(), DELAY);
        driver.start(Scene::new(&config(population)), surface);
        driver
    }

    fn velocities(driver: &mut FrameDriver<impl DrawSurface, ManualClock>) -> Vec<Velocity> {
        let mut out = Vec::new();
        if let Some(scene) = driver.scene_mut() {
            scene
                .world_mut()
                .query::<(&Velocity,)>(|_, (v,)| out.push(*v));
        }
        out
    }

    #[test]
    fn starts_stopped_and_ignores_ticks() {
        let mut driver: FrameDriver<CountingSurface, _> = FrameDriver::new(ManualClock::new(), DELAY);
        assert_eq!(driver.state(), DriverState::Stopped);
        driver.push_event(PlatformEvent::Quit);
        driver.tick();
        assert_eq!(driver.pending_events(), 0);
        assert_eq!(driver.time().frame_count(), 0);
    }

    #[test]
    fn population_and_colors_survive_ten_thousand_ticks() {
        let mut driver = running(1000, CountingSurface::default());
        let colors = |driver: &mut FrameDriver<CountingSurface, ManualClock>| {
            let mut out: Vec<(Entity, Color)> = Vec::new();
            let scene = driver.scene_mut().unwrap();
            scene.world_mut().query::<(&Color,)>(|e, (c,)| out.push((e, *c)));
            out.sort_by_key(|(e, _)| e.index());
            out
        };
        let before = colors(&mut driver);

        for _ in 0..10_000 {
            driver.tick();
        }

        assert!(driver.is_running());
        assert_eq!(driver.scene().unwrap().world().entity_count(), 1000);
        assert_eq!(colors(&mut driver), before);
        let surface = driver.surface_mut().unwrap();
        assert_eq!(surface.presents, 10_000);
        assert_eq!(surface.clears, 10_000);
        assert_eq!(surface.fills, 10_000 * 1000);
    }

    #[test]
    fn one_event_per_tick() {
        let mut driver = running(5, CountingSurface::default());
        let before = velocities(&mut driver);
        driver.push_event(PlatformEvent::KeyDown(KeyCode::ArrowRight));
        driver.push_event(PlatformEvent::KeyDown(KeyCode::ArrowUp));

        driver.tick();
        assert_eq!(driver.pending_events(), 1);
        driver.tick();
        assert_eq!(driver.pending_events(), 0);

        // Spawn margins keep every piece off the walls for two ticks, so
        // no velocity has been reflected yet.
        let after = velocities(&mut driver);
        assert_eq!(after.len(), before.len());
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a.dx, b.dx + 1.0);
            assert_eq!(a.dy, b.dy - 1.0);
        }
    }

    #[test]
    fn unbound_key_after_halt_changes_nothing() {
        let mut driver = running(5, CountingSurface::default());
        driver.push_event(PlatformEvent::KeyDown(KeyCode::Space));
        driver.tick();
        driver.push_event(PlatformEvent::KeyDown(KeyCode::KeyQ));
        driver.tick();
        assert!(driver.is_running());
        assert!(velocities(&mut driver).iter().all(|v| *v == Velocity::ZERO));
    }

    #[test]
    fn escape_close_and_quit_stop_the_driver() {
        for event in [
            PlatformEvent::KeyDown(KeyCode::Escape),
            PlatformEvent::CloseRequested,
            PlatformEvent::Quit,
        ] {
            let mut driver = running(10, CountingSurface::default());
            driver.push_event(event);
            driver.push_event(PlatformEvent::KeyDown(KeyCode::Space));
            driver.tick();
            assert_eq!(driver.state(), DriverState::Stopped, "{event:?}");
            assert_eq!(driver.pending_events(), 0);
            assert!(driver.surface_mut().is_none());
            assert_eq!(driver.scene().unwrap().world().entity_count(), 0);

            driver.tick();
            assert_eq!(driver.time().frame_count(), 1);
        }
    }

    #[test]
    fn stopping_tick_still_runs_to_the_end() {
        let mut driver = running(3, CountingSurface::default());
        driver.push_event(PlatformEvent::Quit);
        driver.tick();
        assert_eq!(driver.time().frame_count(), 1);
        assert_eq!(driver.clock.sleeps, vec![DELAY]);
    }

    #[test]
    fn shutdown_runs_once_and_blocks_restart() {
        let mut driver = running(10, CountingSurface::default());
        driver.shutdown();
        driver.shutdown();
        assert_eq!(driver.state(), DriverState::Stopped);

        driver.start(Scene::new(&config(4)), CountingSurface::default());
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.scene().unwrap().world().entity_count(), 0);
    }

    #[test]
    fn frames_clear_to_black_and_draw_every_piece() {
        let mut driver = running(3, RecordingSurface::new());
        driver.tick();
        driver.tick();
        let surface = driver.surface_mut().unwrap();
        assert_eq!(surface.presents(), 2);
        assert_eq!(surface.fills().len(), 6);
        assert!(surface.calls.contains(&crate::render2d::recording::DrawCall::Clear(Color::BLACK)));
        assert_eq!(surface.color, Color::BLACK);
    }

    #[test]
    fn first_frame_clears_red_and_later_frames_black() {
        use crate::render2d::recording::DrawCall;

        let mut driver = running(2, RecordingSurface::new());
        driver.tick();
        driver.tick();
        let surface = driver.surface_mut().unwrap();
        let clears: Vec<_> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear(_)))
            .cloned()
            .collect();
        assert_eq!(
            clears,
            vec![DrawCall::Clear(Color::RED), DrawCall::Clear(Color::BLACK)]
        );
    }

    #[test]
    fn pacing_sleeps_only_the_remainder() {
        let mut driver = FrameDriver::new(ManualClock::with_cost(Duration::from_millis(5)), DELAY);
        driver.start(Scene::new(&config(1)), CountingSurface::default());
        driver.tick();
        driver.tick();
        assert_eq!(driver.clock.sleeps, vec![Duration::from_millis(11); 2]);
        assert_eq!(driver.time().last_tick(), Duration::from_millis(5));
    }

    #[test]
    fn slow_ticks_do_not_sleep() {
        let mut driver = FrameDriver::new(ManualClock::with_cost(Duration::from_millis(20)), DELAY);
        driver.start(Scene::new(&config(1)), CountingSurface::default());
        driver.tick();
        driver.tick();
        assert!(driver.clock.sleeps.is_empty());
        assert_eq!(driver.time().frame_count(), 2);
    }

    #[test]
    fn halted_population_stays_put() {
        let mut driver = running(20, CountingSurface::default());
        driver.push_event(PlatformEvent::KeyDown(KeyCode::Space));
        driver.tick();
        let positions = |driver: &mut FrameDriver<CountingSurface, ManualClock>| {
            let mut out = Vec::new();
            let scene = driver.scene_mut().unwrap();
            scene.world_mut().query::<(&Position,)>(|e, (p,)| out.push((e.index(), *p)));
            out.sort_by_key(|(i, _)| *i);
            out
        };
        let before = positions(&mut driver);
        driver.tick();
        assert_eq!(positions(&mut driver), before);
    }
}
