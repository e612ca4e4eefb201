//! Game builder.
//!
//! [`Game`] is the entry point: pick a title, optionally override the
//! [`Config`], then call [`run`](Game::run), which blocks until the window
//! closes.
//!
//! # Example
//!
//! ```no_run
//! use confetti::prelude::*;
//!
//! let result = Game::new(WINDOW_TITLE)
//!     .config(Config { seed: Some(7), ..Config::default() })
//!     .run();
//! ```

use winit::event_loop::EventLoop;

use crate::config::Config;
use crate::error::InitError;
use crate::window::WinitApp;

pub struct Game {
    title: String,
    config: Config,
}

impl Game {
    /// Create a game with the given window title and the default config.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            config: Config::default(),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Start the event loop and run until the driver stops.
    ///
    /// Returns the first initialization failure, if any. Nothing is ticked
    /// when startup fails.
    pub fn run(self) -> Result<(), InitError> {
        let event_loop = EventLoop::new().map_err(InitError::EventLoop)?;
        log::info!("Subsystems initialized...");

        let mut app = WinitApp::new(self.title, self.config);
        event_loop.run_app(&mut app).map_err(InitError::EventLoopRun)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
