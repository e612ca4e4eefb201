//! Startup failures.
//!
//! Every variant is fatal: the game logs it, never enters the frame loop,
//! and `main` exits with a non-zero status. Nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not initialize the windowing subsystem: {0}")]
    EventLoop(#[source] winit::error::EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[source] winit::error::OsError),
    #[error("could not create render surface: {0}")]
    Surface(#[source] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[source] wgpu::RequestAdapterError),
    #[error("could not create GPU device: {0}")]
    Device(#[source] wgpu::RequestDeviceError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] winit::error::EventLoopError),
}
